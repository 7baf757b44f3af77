//! HTTP surface: one GET route per lookup handler.

pub mod error;
pub mod handlers;

use crate::config::PortalConfig;
use crate::core::Portal;
use crate::utils::error::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

pub fn build_router(portal: Arc<Portal>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/domain/:domain", get(handlers::lookup_domain))
        .route("/api/email/:email", get(handlers::lookup_email))
        .route("/api/ip/:ip", get(handlers::lookup_ip))
        .route("/api/username/:username", get(handlers::lookup_username))
        .route("/api/intel/hibp/:email", get(handlers::intel_hibp))
        .route("/api/intel/ipinfo/:ip", get(handlers::intel_ipinfo))
        .route("/api/intel/shodan/:ip", get(handlers::intel_shodan))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(portal)
}

pub async fn serve(config: &PortalConfig, portal: Arc<Portal>) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("OSINT portal listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(portal)).await?;
    Ok(())
}
