//! HTTP server
//!
//! Assembles the axum application and runs it until Ctrl-C.

mod routes;
mod state;

pub use routes::*;
pub use state::*;

use axum::{http::HeaderValue, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::config::{ServerConfig, Settings};
use crate::handlers;
use crate::middleware::{locale_redirect, log_requests};
use crate::services::Catalog;
use crate::utils::errors::{MinbarError, Result};

/// Bind the configured address and serve until shutdown
pub async fn start_server(settings: Settings, catalog: Catalog) -> Result<()> {
    let state = AppState::new(&settings, catalog)?;
    let app = build_app(state, &settings.server);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🌍 Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(MinbarError::Io)?;

    Ok(())
}

/// Build the application router
pub fn build_app(state: AppState, server: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health_handler))
        .nest("/api", build_api_router())
        .merge(build_page_router())
        .fallback(handlers::not_found_handler)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            locale_redirect,
        ))
        .layer(axum::middleware::from_fn(log_requests));

    if let Some(cors) = cors_layer(&server.cors_origins) {
        app = app.layer(cors);
    }

    app.layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
            .allow_headers([axum::http::header::ACCEPT, axum::http::header::CONTENT_TYPE]),
    )
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
