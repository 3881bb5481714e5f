//! Event service domain logic for the career calendar.
//!
//! Owns event CRUD against the injected `EventStorage`, required-field
//! validation, and the calendar read models built on top of the event list
//! (bound grids and summary counts).
//!
//! ## Business Rules
//!
//! - Title and time of day are required; everything else is optional
//! - IDs are generated on create and never change on edit
//! - Updating or deleting an unknown event is a no-op, not an error
//! - Events are returned in insertion order

use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::calendar::CalendarService;
use crate::domain::commands::events::{
    CreateEventCommand, DeleteEventResult, EventListQuery, UpdateEventCommand, UpdateEventResult,
};
use crate::domain::event_binder::{self, BoundGrid, EventSummary};
use crate::domain::models::calendar::CalendarGrid;
use crate::domain::models::event::{optional_field, require_field, DomainEvent, EventValidationError};
use crate::storage::EventStorage;

/// Service for managing calendar events
#[derive(Clone)]
pub struct EventService {
    storage: Arc<dyn EventStorage>,
    calendar_service: CalendarService,
}

impl EventService {
    pub fn new(storage: Arc<dyn EventStorage>, calendar_service: CalendarService) -> Self {
        Self {
            storage,
            calendar_service,
        }
    }

    /// List events, optionally restricted to one day or an inclusive range
    /// and to one category
    pub async fn list_events(&self, query: EventListQuery) -> Result<Vec<DomainEvent>> {
        let (start, end) = match query.date {
            Some(date) => (date, date),
            None => (
                query.start_date.unwrap_or(NaiveDate::MIN),
                query.end_date.unwrap_or(NaiveDate::MAX),
            ),
        };
        if start > end {
            return Err(EventValidationError::InvalidDate(format!(
                "range start {} is after range end {}",
                start, end
            ))
            .into());
        }

        let events = self.storage.list_events().await?;
        Ok(event_binder::events_in_range(&events, start, end)
            .into_iter()
            .filter(|event| query.category.map_or(true, |category| event.category == category))
            .cloned()
            .collect())
    }

    pub async fn get_event(&self, event_id: &str) -> Result<Option<DomainEvent>> {
        self.storage.get_event(event_id).await
    }

    /// Create a new event
    pub async fn create_event(&self, command: CreateEventCommand) -> Result<DomainEvent> {
        info!("Creating event: {:?}", command);

        let title = require_field("title", &command.title)?;
        let time = require_field("time", &command.time)?;

        let event = DomainEvent {
            id: DomainEvent::generate_id(),
            date: command.date,
            title,
            category: command.category,
            time,
            location: optional_field(command.location),
            description: optional_field(command.description),
            invitees: optional_field(command.invitees),
        };

        self.storage.store_event(&event).await?;
        info!("Successfully created event: {} on {}", event.id, event.date);
        Ok(event)
    }

    /// Apply the submitted fields to an existing event
    pub async fn update_event(&self, command: UpdateEventCommand) -> Result<UpdateEventResult> {
        info!("Updating event: {:?}", command);

        let mut event = match self.storage.get_event(&command.event_id).await? {
            Some(event) => event,
            None => {
                warn!("Event {} not found, nothing to update", command.event_id);
                return Ok(UpdateEventResult { event: None });
            }
        };

        if let Some(title) = command.title {
            event.title = require_field("title", &title)?;
        }
        if let Some(time) = command.time {
            event.time = require_field("time", &time)?;
        }
        if let Some(date) = command.date {
            event.date = date;
        }
        if let Some(category) = command.category {
            event.category = category;
        }
        if command.location.is_some() {
            event.location = optional_field(command.location);
        }
        if command.description.is_some() {
            event.description = optional_field(command.description);
        }
        if command.invitees.is_some() {
            event.invitees = optional_field(command.invitees);
        }

        if !self.storage.update_event(&event).await? {
            warn!("Event {} disappeared before it could be updated", event.id);
            return Ok(UpdateEventResult { event: None });
        }

        info!("Successfully updated event: {}", event.id);
        Ok(UpdateEventResult { event: Some(event) })
    }

    /// Delete an event by ID
    pub async fn delete_event(&self, event_id: &str) -> Result<DeleteEventResult> {
        info!("Deleting event: {}", event_id);

        let deleted = self.storage.delete_event(event_id).await?;
        let message = if deleted {
            "Event deleted".to_string()
        } else {
            warn!("Event {} not found, nothing to delete", event_id);
            format!("Event {} was already removed", event_id)
        };

        Ok(DeleteEventResult { deleted, message })
    }

    /// Bind the current event list to a generated grid
    pub async fn bind_grid(&self, grid: &CalendarGrid) -> Result<BoundGrid> {
        let events = self.storage.list_events().await?;
        Ok(event_binder::bind_events(grid, &events))
    }

    /// Today / this week counts relative to `today`
    pub async fn summary(&self, today: NaiveDate) -> Result<EventSummary> {
        let events = self.storage.list_events().await?;
        Ok(event_binder::summarize(
            &events,
            today,
            self.calendar_service.week_start_of(today),
            self.calendar_service.week_end_of(today),
        ))
    }
}
