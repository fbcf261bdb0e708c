//! Video library handler

use axum::{
    extract::{Query, State},
    response::Json,
};

use crate::models::VideoLibrary;
use crate::server::AppState;
use crate::services::VideoQuery;

/// `GET /api/videos?category=&q=`
pub async fn get_video_library_handler(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Json<VideoLibrary> {
    Json(state.catalog.video_library(&query))
}
