//! Error responses of the dashboard API.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::hierarchy::SelectorError;
use crate::upstream::error::UpstreamError;
use crate::upstream::tracker::TrackerError;

/// Error body returned by every dashboard endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "code": "UPSTREAM_ERROR",
    "message": "Attendance service unavailable"
}))]
pub struct ErrorBody {
    /// Error code for programmatic handling
    pub code: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Superseded(#[from] TrackerError),
}

impl From<SelectorError> for ApiError {
    fn from(e: SelectorError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Upstream(UpstreamError::Timeout) => "UPSTREAM_TIMEOUT",
            ApiError::Upstream(_) => "UPSTREAM_ERROR",
            ApiError::Superseded(_) => "SUPERSEDED",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(UpstreamError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Superseded(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        })
    }
}
