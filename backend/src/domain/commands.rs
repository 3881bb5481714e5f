//! Domain-level command and result types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined
//! in the `shared` crate to these internal types.

pub mod events {
    use crate::domain::models::event::{DomainEvent, DomainEventCategory};
    use chrono::NaiveDate;

    /// Input for creating a new event on a given day.
    #[derive(Debug, Clone)]
    pub struct CreateEventCommand {
        pub date: NaiveDate,
        pub title: String,
        pub category: DomainEventCategory,
        pub time: String,
        pub location: Option<String>,
        pub description: Option<String>,
        pub invitees: Option<String>,
    }

    /// Input for editing an event. `None` leaves the field as it is.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateEventCommand {
        pub event_id: String,
        pub date: Option<NaiveDate>,
        pub title: Option<String>,
        pub category: Option<DomainEventCategory>,
        pub time: Option<String>,
        pub location: Option<String>,
        pub description: Option<String>,
        pub invitees: Option<String>,
    }

    /// Optional filters for listing events.
    #[derive(Debug, Clone, Default)]
    pub struct EventListQuery {
        pub date: Option<NaiveDate>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub category: Option<DomainEventCategory>,
    }

    /// Result of an update; `event` is `None` when the ID was unknown.
    #[derive(Debug, Clone)]
    pub struct UpdateEventResult {
        pub event: Option<DomainEvent>,
    }

    /// Result of a delete.
    #[derive(Debug, Clone)]
    pub struct DeleteEventResult {
        pub deleted: bool,
        pub message: String,
    }
}
