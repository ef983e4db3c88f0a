//! Web server module

pub mod http;
pub mod pages;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::selector::DailySelector;

/// Shared server state
#[derive(Clone)]
pub struct ServerState {
    pub selector: Arc<DailySelector>,
}

impl ServerState {
    pub fn new(selector: Arc<DailySelector>) -> Self {
        Self { selector }
    }
}

/// Build the application router
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/api/today", get(http::today_handler))
        .route("/api/concepts", get(http::list_handler))
        .route("/api/concepts/{name}", get(http::concept_handler))
        .route("/api/history", get(http::history_handler))
        .route("/api/status", get(http::status_handler));

    let pages = Router::new()
        .route("/", get(http::daily_page))
        .route("/library", get(http::library_page));

    Router::new()
        .merge(api)
        .merge(pages)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server
pub async fn start(config: &ServerConfig, selector: Arc<DailySelector>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let concepts = selector.store().size();
    let app = router(ServerState::new(selector));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Serving {} concepts on http://{}", concepts, addr);
    println!("🚀 Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
