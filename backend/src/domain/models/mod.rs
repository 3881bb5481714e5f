pub mod calendar;
pub mod event;
