pub mod calendar_mapper;
pub mod event_mapper;
