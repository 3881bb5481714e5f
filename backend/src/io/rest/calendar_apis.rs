use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;

use crate::domain::models::calendar::DomainViewMode;
use crate::io::rest::errors::error_response;
use crate::io::rest::mappers::calendar_mapper::CalendarMapper;
use crate::AppState;
use shared::{SelectDateRequest, SetViewModeRequest, ViewMode};

/// Optional overrides for rendering a grid without touching the view state
#[derive(Debug, Default, Deserialize)]
pub struct CalendarGridQuery {
    pub reference: Option<NaiveDate>,
    pub view_mode: Option<ViewMode>,
    pub selected: Option<NaiveDate>,
}

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/grid", get(get_calendar_grid))
        .route("/widget", get(get_calendar_widget))
        .route("/view-state", get(get_view_state))
        .route("/navigate/previous", post(navigate_previous))
        .route("/navigate/next", post(navigate_next))
        .route("/navigate/today", post(navigate_today))
        .route("/select", post(select_date))
        .route("/view-mode", post(set_view_mode))
        .route("/summary", get(get_summary))
        .route("/current-date", get(get_current_date))
}

async fn render_grid(
    state: &AppState,
    reference: NaiveDate,
    view_mode: DomainViewMode,
    selected: NaiveDate,
) -> axum::response::Response {
    let calendar = &state.calendar_service;
    let grid = calendar.generate_grid(reference, view_mode, calendar.today(), selected);

    match state.event_service.bind_grid(&grid).await {
        Ok(bound) => {
            let limit = state.config.calendar.max_visible_events;
            let response = CalendarMapper::to_grid_dto(calendar, bound, selected, limit);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Failed to bind events to calendar grid"),
    }
}

/// Grid for the current view state, or for the dates given in the query
async fn get_calendar_grid(
    State(state): State<AppState>,
    Query(query): Query<CalendarGridQuery>,
) -> impl IntoResponse {
    info!("GET /api/calendar/grid - query: {:?}", query);

    let view_state = state.calendar_service.get_view_state();
    let reference = query.reference.unwrap_or(view_state.reference_date);
    let view_mode = query
        .view_mode
        .map(CalendarMapper::view_mode_to_domain)
        .unwrap_or(view_state.view_mode);
    let selected = query.selected.unwrap_or(view_state.selected_date);

    render_grid(&state, reference, view_mode, selected).await
}

/// Month containing today, for the dashboard widget
async fn get_calendar_widget(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/widget");

    let today = state.calendar_service.today();
    render_grid(&state, today, DomainViewMode::Month, today).await
}

async fn get_view_state(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/view-state");

    let view_state = state.calendar_service.get_view_state();
    let response = CalendarMapper::to_view_state_dto(&state.calendar_service, view_state);
    (StatusCode::OK, Json(response)).into_response()
}

/// Navigate to the previous month or week
async fn navigate_previous(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/calendar/navigate/previous");

    let view_state = state.calendar_service.navigate_previous();
    let response = CalendarMapper::to_view_state_dto(&state.calendar_service, view_state);
    (StatusCode::OK, Json(response)).into_response()
}

/// Navigate to the next month or week
async fn navigate_next(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/calendar/navigate/next");

    let view_state = state.calendar_service.navigate_next();
    let response = CalendarMapper::to_view_state_dto(&state.calendar_service, view_state);
    (StatusCode::OK, Json(response)).into_response()
}

async fn navigate_today(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/calendar/navigate/today");

    let view_state = state.calendar_service.navigate_today();
    let response = CalendarMapper::to_view_state_dto(&state.calendar_service, view_state);
    (StatusCode::OK, Json(response)).into_response()
}

async fn select_date(
    State(state): State<AppState>,
    Json(request): Json<SelectDateRequest>,
) -> impl IntoResponse {
    info!("POST /api/calendar/select - request: {:?}", request);

    let view_state = state.calendar_service.select_date(request.date);
    let response = CalendarMapper::to_view_state_dto(&state.calendar_service, view_state);
    (StatusCode::OK, Json(response)).into_response()
}

async fn set_view_mode(
    State(state): State<AppState>,
    Json(request): Json<SetViewModeRequest>,
) -> impl IntoResponse {
    info!("POST /api/calendar/view-mode - request: {:?}", request);

    let view_mode = CalendarMapper::view_mode_to_domain(request.view_mode);
    let view_state = state.calendar_service.set_view_mode(view_mode);
    let response = CalendarMapper::to_view_state_dto(&state.calendar_service, view_state);
    (StatusCode::OK, Json(response)).into_response()
}

/// Events today / this week / upcoming this week
async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/summary");

    let today = state.calendar_service.today();
    match state.event_service.summary(today).await {
        Ok(summary) => {
            let response = CalendarMapper::to_summary_dto(today, summary);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Failed to summarize events"),
    }
}

/// Get current date information from the backend
async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/current-date");

    let current_date = state.calendar_service.get_current_date();
    (StatusCode::OK, Json(current_date)).into_response()
}
