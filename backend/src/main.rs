use career_calendar::config::AppConfig;
use career_calendar::{initialize_backend, serve};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    info!(
        "Starting career calendar (week starts {}, {} events per month cell)",
        config.calendar.week_start, config.calendar.max_visible_events
    );

    let app_state = initialize_backend(&config)?;
    serve(app_state).await
}
