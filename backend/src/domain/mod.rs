//! # Domain Module
//!
//! Contains the business logic of the career calendar.
//!
//! ## Module Organization
//!
//! - **calendar**: Grid generation, date helpers, navigation and selection
//! - **event_binder**: Same-day matching of events to grid cells and summary counts
//! - **event_service**: Event CRUD against the shared event store
//! - **event_flow**: Add / view / edit / delete interaction state machine
//! - **commands**: Internal command and result types
//! - **models**: Domain entities
//!
//! ## Business Rules
//!
//! - Grids always cover whole weeks; week grids are exactly seven days
//! - An event belongs to the cell of its calendar day, time of day ignored
//! - Title and time of day are required on create and edit
//! - Edits keep the event ID; edits and deletes of unknown events are no-ops

pub mod calendar;
pub mod commands;
pub mod event_binder;
pub mod event_flow;
pub mod event_service;
pub mod models;

pub use calendar::*;
pub use event_flow::{EventFlowError, EventFlowService};
pub use event_service::*;
