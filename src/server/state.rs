use std::sync::Arc;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::Settings;
use crate::routing::LocaleRouter;
use crate::services::{AudioProxy, Catalog};
use crate::utils::errors::{MinbarError, Result};

/// Shared state for web server handlers
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<LocaleRouter>,
    pub catalog: Arc<Catalog>,
    pub proxy: AudioProxy,
    /// Redirect to the `Accept-Language` locale instead of the default
    pub negotiate_locale: bool,
}

impl AppState {
    pub fn new(settings: &Settings, catalog: Catalog) -> Result<Self> {
        Ok(Self {
            router: Arc::new(LocaleRouter::from_settings(settings)?),
            catalog: Arc::new(catalog),
            proxy: AudioProxy::new(&settings.proxy)?,
            negotiate_locale: settings.routing.negotiate_from_header,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Custom error type for API handlers
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    InternalServerError(anyhow::Error),
}

impl From<MinbarError> for AppError {
    fn from(err: MinbarError) -> Self {
        crate::utils::logging::log_api_error("handler", &err);
        match err {
            MinbarError::InvalidInput(msg) => Self::BadRequest(msg),
            MinbarError::NotFound(msg) => Self::NotFound(msg),
            e @ (MinbarError::Upstream { .. } | MinbarError::ServiceUnavailable(_) | MinbarError::Http(_)) => {
                Self::BadGateway(e.to_string())
            }
            other => Self::InternalServerError(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::InternalServerError(e) => {
                error!("API Error: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(ApiResponse::<String>::error(error));
        (status, body).into_response()
    }
}
