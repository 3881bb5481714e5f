//! # REST API for Calendar Events
//!
//! Plain CRUD over the shared event list. The add/view/edit panel of the
//! calendar page goes through `event_flow_apis` instead.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;

use crate::domain::commands::events::EventListQuery;
use crate::domain::models::event::DomainEventCategory;
use crate::io::rest::errors::{error_response, not_found};
use crate::io::rest::mappers::event_mapper::EventMapper;
use crate::AppState;
use shared::{
    CreateEventRequest, DeleteEventResponse, EventListResponse, EventResponse, UpdateEventRequest,
    UpdateEventResponse,
};

#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    /// Only events on this day
    pub date: Option<NaiveDate>,
    /// Inclusive range start
    pub start: Option<NaiveDate>,
    /// Inclusive range end
    pub end: Option<NaiveDate>,
    /// Category name, e.g. "deadline"
    pub category: Option<String>,
}

/// Create a router for event related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
}

async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> impl IntoResponse {
    info!("GET /api/events - query: {:?}", params);

    let category = match params.category.as_deref().map(str::parse::<DomainEventCategory>) {
        Some(Ok(category)) => Some(category),
        Some(Err(e)) => return error_response(e.into(), "Invalid category filter"),
        None => None,
    };

    let query = EventListQuery {
        date: params.date,
        start_date: params.start,
        end_date: params.end,
        category,
    };

    match state.event_service.list_events(query).await {
        Ok(events) => {
            let response = EventListResponse {
                events: EventMapper::to_dto_list(events),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Failed to list events"),
    }
}

async fn get_event(State(state): State<AppState>, Path(event_id): Path<String>) -> impl IntoResponse {
    info!("GET /api/events/{}", event_id);

    match state.event_service.get_event(&event_id).await {
        Ok(Some(event)) => (StatusCode::OK, Json(EventMapper::to_dto(event))).into_response(),
        Ok(None) => not_found(format!("Event not found: {}", event_id)),
        Err(e) => error_response(e, "Failed to get event"),
    }
}

async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> impl IntoResponse {
    info!("POST /api/events - request: {:?}", request);

    let command = EventMapper::to_create_command(request);
    match state.event_service.create_event(command).await {
        Ok(event) => {
            let response = EventResponse {
                success_message: format!("Added \"{}\" on {}", event.title, event.date),
                event: EventMapper::to_dto(event),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Failed to create event"),
    }
}

/// Edit an event; an unknown ID answers `found: false` and changes nothing
async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(request): Json<UpdateEventRequest>,
) -> impl IntoResponse {
    info!("PUT /api/events/{} - request: {:?}", event_id, request);

    let command = EventMapper::to_update_command(event_id.clone(), request);
    match state.event_service.update_event(command).await {
        Ok(result) => {
            let response = match result.event {
                Some(event) => UpdateEventResponse {
                    found: true,
                    message: format!("Updated \"{}\"", event.title),
                    event: Some(EventMapper::to_dto(event)),
                },
                None => UpdateEventResponse {
                    found: false,
                    event: None,
                    message: format!("Event {} no longer exists", event_id),
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Failed to update event"),
    }
}

async fn delete_event(State(state): State<AppState>, Path(event_id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/events/{}", event_id);

    match state.event_service.delete_event(&event_id).await {
        Ok(result) => {
            let response = DeleteEventResponse {
                deleted: result.deleted,
                message: result.message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Failed to delete event"),
    }
}
