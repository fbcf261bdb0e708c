use axum::{routing::get, Router};

use crate::handlers;
use super::state::AppState;

pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/audio", get(handlers::get_audio_library_handler))
        .route("/audio-proxy", get(handlers::audio_proxy_handler))
        .route("/videos", get(handlers::get_video_library_handler))
}

pub fn build_page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/:locale", get(handlers::locale_home_handler))
        .route("/:locale/", get(handlers::locale_home_handler))
        .route("/:locale/*rest", get(handlers::locale_page_handler))
}
