//! Audio proxy handler

use axum::{
    extract::{Query, State},
    http::{self, header},
    response::Response,
};
use serde::Deserialize;

use crate::server::{AppError, AppState};

#[derive(Deserialize)]
pub struct ProxyQuery {
    pub url: String,
}

/// `GET /api/audio-proxy?url=`
pub async fn audio_proxy_handler(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response, AppError> {
    let audio = state.proxy.fetch(&query.url).await?;

    let mut builder = http::Response::builder()
        .header(header::CONTENT_TYPE, audio.content_type.as_str())
        .header(header::CACHE_CONTROL, "public, max-age=86400");
    if let Some(length) = audio.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    builder
        .body(audio.into_body())
        .map_err(|e| AppError::InternalServerError(e.into()))
}
