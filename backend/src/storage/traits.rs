//! # Storage Traits
//!
//! This module defines the storage abstraction that the calendar page and
//! the dashboard widget both read from, so a single event list backs every
//! view.

use crate::domain::models::event::DomainEvent;
use anyhow::Result;
use async_trait::async_trait;

/// Trait defining the interface for calendar event storage operations
#[async_trait]
pub trait EventStorage: Send + Sync {
    /// All events in insertion order
    async fn list_events(&self) -> Result<Vec<DomainEvent>>;

    /// Retrieve a specific event by ID
    async fn get_event(&self, event_id: &str) -> Result<Option<DomainEvent>>;

    /// Append a new event
    async fn store_event(&self, event: &DomainEvent) -> Result<()>;

    /// Replace the event with the same ID in place.
    /// Returns false if no such event exists.
    async fn update_event(&self, event: &DomainEvent) -> Result<bool>;

    /// Delete an event by ID.
    /// Returns true if the event was found and deleted, false otherwise
    async fn delete_event(&self, event_id: &str) -> Result<bool>;
}
