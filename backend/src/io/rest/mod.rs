//! # REST API Interface Layer
//!
//! - **calendar_apis**: grids, navigation, selection, summary counts
//! - **event_apis**: event CRUD
//! - **event_flow_apis**: the add / view / edit panel
//! - **mappers**: domain <-> DTO conversion
//! - **errors**: domain error to HTTP status translation

pub mod calendar_apis;
pub mod errors;
pub mod event_apis;
pub mod event_flow_apis;
pub mod mappers;
