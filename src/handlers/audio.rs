//! Audio library handler

use axum::{
    extract::{Query, State},
    response::Json,
};

use crate::models::AudioLibrary;
use crate::server::AppState;
use crate::services::AudioQuery;

/// `GET /api/audio?reciter=&surah=&q=`
pub async fn get_audio_library_handler(
    State(state): State<AppState>,
    Query(query): Query<AudioQuery>,
) -> Json<AudioLibrary> {
    Json(state.catalog.audio_library(&query))
}
