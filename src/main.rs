use std::sync::Arc;

use taskdesk::{app_state::AppState, map_routes, settings::Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskdesk=info")))
        .init();

    // ── Settings ───────────────────────────────────────────────
    let settings = Settings::load()?;
    tracing::info!(api = %settings.api_base_url, "remote api");

    // ── Router ─────────────────────────────────────────────────
    let app_state = Arc::new(AppState::from_settings(&settings));
    let app = map_routes(app_state);

    // ── Start ──────────────────────────────────────────────────
    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "dashboard service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
