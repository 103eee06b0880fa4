pub mod app;
pub mod error;
pub mod handlers;

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::services::config_service::Config;

pub async fn start_server(data_dir: &Path, config: &Config) -> Result<()> {
    let state = app::AppState::from_config(data_dir, config)?;
    let app = app::create_app(state, config.cors_origin.as_deref()).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /api/site-content           - About page document (GET, POST)");
    info!("  /api/projects               - Project showcase");
    info!("  /api/blog                   - Blog posts and categories");
    info!("  /api/about, /api/contact    - About page and contact form");
    info!("  /api/admin/*                - Admin dashboard (bearer token)");
}
