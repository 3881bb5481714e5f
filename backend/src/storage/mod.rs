//! # Storage Module
//!
//! Holds the calendar event list behind the `EventStorage` abstraction.
//!
//! Events are transient: the only backend is an in-memory repository that
//! lives as long as the server process. Both calendar views are handed the
//! same repository so they always agree on the event list.

pub mod memory;
pub mod traits;

pub use memory::InMemoryEventRepository;
pub use traits::EventStorage;
