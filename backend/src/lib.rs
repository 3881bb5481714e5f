//! # Career Calendar Backend
//!
//! Calendar subsystem of the career portal: month/week grid generation, the
//! binding of events to grid cells, and event management.
//!
//! ```text
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (grids, binding, event flow, services)
//!     ↓
//! Storage Layer (in-memory event list)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::domain::{CalendarService, EventFlowService, EventService};
use crate::storage::InMemoryEventRepository;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub calendar_service: CalendarService,
    pub event_service: EventService,
    pub event_flow_service: EventFlowService,
    pub config: AppConfig,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up domain model");
    let calendar_service = CalendarService::new(config.week_start()?);

    info!("Setting up event store");
    let repository = if config.calendar.seed_sample_events {
        InMemoryEventRepository::with_events(InMemoryEventRepository::sample_events(
            calendar_service.today(),
        ))
    } else {
        InMemoryEventRepository::new()
    };

    let event_service = EventService::new(Arc::new(repository), calendar_service.clone());
    let event_flow_service = EventFlowService::new(event_service.clone(), calendar_service.clone());

    info!("Setting up application state");
    Ok(AppState {
        calendar_service,
        event_service,
        event_flow_service,
        config: config.clone(),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = match app_state.config.server.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            warn!(
                "Ignoring unparseable CORS origin {:?}",
                app_state.config.server.cors_origin
            );
            CorsLayer::new()
        }
    }
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
    .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/calendar", io::rest::calendar_apis::router())
        .nest("/events", io::rest::event_apis::router())
        .nest("/event-flow", io::rest::event_flow_apis::router());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health() -> &'static str {
    "ok"
}

/// Bind the configured address and serve until the process stops
pub async fn serve(app_state: AppState) -> Result<()> {
    let addr = app_state.config.socket_addr()?;
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
