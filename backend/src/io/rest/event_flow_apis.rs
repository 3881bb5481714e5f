//! # REST API for the Event Panel
//!
//! Drives the add / view / edit / delete interaction of the calendar page.
//! Every endpoint answers with the resulting flow state; transitions that do
//! not apply in the current state answer 409 and leave it unchanged.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use log::info;

use crate::domain::event_flow::FlowOutcome;
use crate::io::rest::errors::error_response;
use crate::io::rest::mappers::calendar_mapper::CalendarMapper;
use crate::io::rest::mappers::event_mapper::EventMapper;
use crate::AppState;
use shared::{EventFormDraft, OpenCreateRequest};

/// Create a router for the event panel APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_flow))
        .route("/draft", put(update_draft))
        .route("/create/open", post(open_create))
        .route("/create/submit", post(submit_create))
        .route("/view/:id", post(view_event))
        .route("/edit", post(begin_edit))
        .route("/edit/save", post(save_edit))
        .route("/cancel", post(cancel))
        .route("/delete", post(delete_event))
        .route("/close", post(close))
}

fn flow_response(result: anyhow::Result<FlowOutcome>, context: &str) -> Response {
    match result {
        Ok(outcome) => (StatusCode::OK, Json(CalendarMapper::to_flow_response(outcome))).into_response(),
        Err(e) => error_response(e, context),
    }
}

async fn get_flow(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/event-flow");

    match state.event_flow_service.snapshot().await {
        Ok(snapshot) => (StatusCode::OK, Json(CalendarMapper::to_flow_state_dto(snapshot))).into_response(),
        Err(e) => error_response(e, "Failed to read event panel"),
    }
}

/// Open the add form for a day (defaults to the selected day)
async fn open_create(
    State(state): State<AppState>,
    Json(request): Json<OpenCreateRequest>,
) -> impl IntoResponse {
    info!("POST /api/event-flow/create/open - request: {:?}", request);

    flow_response(
        state.event_flow_service.open_create(request.date).await,
        "Failed to open add form",
    )
}

async fn update_draft(
    State(state): State<AppState>,
    Json(request): Json<EventFormDraft>,
) -> impl IntoResponse {
    info!("PUT /api/event-flow/draft - request: {:?}", request);

    flow_response(
        state
            .event_flow_service
            .update_draft(EventMapper::draft_to_domain(request))
            .await,
        "Failed to update form",
    )
}

async fn submit_create(
    State(state): State<AppState>,
    Json(request): Json<EventFormDraft>,
) -> impl IntoResponse {
    info!("POST /api/event-flow/create/submit - request: {:?}", request);

    flow_response(
        state
            .event_flow_service
            .submit_create(EventMapper::draft_to_domain(request))
            .await,
        "Failed to add event",
    )
}

async fn view_event(State(state): State<AppState>, Path(event_id): Path<String>) -> impl IntoResponse {
    info!("POST /api/event-flow/view/{}", event_id);

    flow_response(state.event_flow_service.view(&event_id).await, "Failed to open event")
}

async fn begin_edit(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/event-flow/edit");

    flow_response(state.event_flow_service.begin_edit().await, "Failed to start editing")
}

async fn save_edit(
    State(state): State<AppState>,
    Json(request): Json<EventFormDraft>,
) -> impl IntoResponse {
    info!("POST /api/event-flow/edit/save - request: {:?}", request);

    flow_response(
        state
            .event_flow_service
            .save_edit(EventMapper::draft_to_domain(request))
            .await,
        "Failed to save event",
    )
}

async fn cancel(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/event-flow/cancel");

    flow_response(state.event_flow_service.cancel().await, "Failed to cancel")
}

async fn delete_event(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/event-flow/delete");

    flow_response(state.event_flow_service.delete().await, "Failed to delete event")
}

async fn close(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/event-flow/close");

    flow_response(state.event_flow_service.close().await, "Failed to close panel")
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::{create_router, initialize_backend};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use shared::{CalendarEvent, ErrorResponse, EventFlowResponse, EventFlowState, EventListResponse};
    use tower::ServiceExt;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn test_app() -> Result<Router, Box<dyn std::error::Error>> {
        Ok(create_router(initialize_backend(&AppConfig::default())?))
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(StatusCode, axum::body::Bytes), Box<dyn std::error::Error>> {
        let builder = Request::builder().uri(uri).method(method);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };
        let response = app.clone().oneshot(request).await?;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, body))
    }

    fn form(title: &str, time: &str) -> serde_json::Value {
        serde_json::json!({
            "title": title,
            "category": "meeting",
            "time": time,
            "location": "Career Center",
        })
    }

    #[tokio::test]
    async fn test_full_panel_round() -> TestResult {
        let app = test_app()?;

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/event-flow/create/open",
            Some(serde_json::json!({ "date": "2024-04-15" })),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        let response: EventFlowResponse = serde_json::from_slice(&body)?;
        match response.flow {
            EventFlowState::Creating { date, draft } => {
                assert_eq!(date.to_string(), "2024-04-15");
                assert_eq!(draft.time, "09:00");
                assert!(draft.title.is_empty());
            }
            other => panic!("unexpected flow state {:?}", other),
        }

        let (status, body) = call(&app, Method::POST, "/api/event-flow/create/submit", Some(form("Mock Interview", "14:00"))).await?;
        assert_eq!(status, StatusCode::OK);
        let response: EventFlowResponse = serde_json::from_slice(&body)?;
        assert_eq!(response.flow, EventFlowState::Idle);
        let event_id = response.affected_event_id.ok_or("missing event id")?;

        let (status, body) = call(&app, Method::POST, &format!("/api/event-flow/view/{}", event_id), None).await?;
        assert_eq!(status, StatusCode::OK);
        let response: EventFlowResponse = serde_json::from_slice(&body)?;
        assert!(matches!(response.flow, EventFlowState::Viewing { ref event } if event.title == "Mock Interview"));

        let (status, _) = call(&app, Method::POST, "/api/event-flow/edit", None).await?;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&app, Method::POST, "/api/event-flow/edit/save", Some(form("Final Interview", "15:30"))).await?;
        assert_eq!(status, StatusCode::OK);
        let response: EventFlowResponse = serde_json::from_slice(&body)?;
        match response.flow {
            EventFlowState::Viewing { event } => {
                assert_eq!(event.id, event_id);
                assert_eq!(event.title, "Final Interview");
                assert_eq!(event.time, "15:30");
            }
            other => panic!("unexpected flow state {:?}", other),
        }

        let (status, body) = call(&app, Method::POST, "/api/event-flow/delete", None).await?;
        assert_eq!(status, StatusCode::OK);
        let response: EventFlowResponse = serde_json::from_slice(&body)?;
        assert_eq!(response.flow, EventFlowState::Idle);

        let (_, body) = call(&app, Method::GET, "/api/events", None).await?;
        let list: EventListResponse = serde_json::from_slice(&body)?;
        assert!(list.events.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_without_time_keeps_form_open() -> TestResult {
        let app = test_app()?;
        call(&app, Method::POST, "/api/event-flow/create/open", Some(serde_json::json!({}))).await?;

        let (status, body) = call(&app, Method::POST, "/api/event-flow/create/submit", Some(form("Resume Review", ""))).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body)?;
        assert_eq!(error.field.as_deref(), Some("time"));

        let (_, body) = call(&app, Method::GET, "/api/event-flow", None).await?;
        let flow: EventFlowState = serde_json::from_slice(&body)?;
        match flow {
            EventFlowState::Creating { draft, .. } => assert_eq!(draft.title, "Resume Review"),
            other => panic!("unexpected flow state {:?}", other),
        }

        let (_, body) = call(&app, Method::GET, "/api/events", None).await?;
        let list: EventListResponse = serde_json::from_slice(&body)?;
        assert!(list.events.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_transition_is_conflict() -> TestResult {
        let app = test_app()?;

        let (status, _) = call(&app, Method::POST, "/api/event-flow/delete", None).await?;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(&app, Method::POST, "/api/event-flow/edit/save", Some(form("x", "09:00"))).await?;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(&app, Method::POST, "/api/event-flow/view/event::missing", None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = call(&app, Method::GET, "/api/event-flow", None).await?;
        let flow: EventFlowState = serde_json::from_slice(&body)?;
        assert_eq!(flow, EventFlowState::Idle);

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_edit_discards_changes() -> TestResult {
        let app = test_app()?;
        let (_, body) = call(
            &app,
            Method::POST,
            "/api/events",
            Some(serde_json::json!({
                "date": "2024-04-17",
                "title": "Networking Lunch",
                "category": "personal",
                "time": "12:00",
            })),
        )
        .await?;
        let created: shared::EventResponse = serde_json::from_slice(&body)?;
        let event: CalendarEvent = created.event;

        call(&app, Method::POST, &format!("/api/event-flow/view/{}", event.id), None).await?;
        call(&app, Method::POST, "/api/event-flow/edit", None).await?;
        let (status, _) = call(&app, Method::PUT, "/api/event-flow/draft", Some(form("Changed", "13:00"))).await?;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&app, Method::POST, "/api/event-flow/cancel", None).await?;
        assert_eq!(status, StatusCode::OK);
        let response: EventFlowResponse = serde_json::from_slice(&body)?;
        assert_eq!(response.flow, EventFlowState::Viewing { event: event.clone() });

        let (status, body) = call(&app, Method::POST, "/api/event-flow/close", None).await?;
        assert_eq!(status, StatusCode::OK);
        let response: EventFlowResponse = serde_json::from_slice(&body)?;
        assert_eq!(response.flow, EventFlowState::Idle);

        Ok(())
    }
}
