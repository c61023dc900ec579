use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nutrigoal_core::domain::daily_goals::errors::DailyGoalsError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Every variant is answered with `400 { "error": <message> }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Recalculation(#[from] DailyGoalsError),

    #[error("{0}")]
    BadRequest(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_kind = match &self {
            ApiError::Recalculation(e) => e.kind().as_str(),
            ApiError::BadRequest(_) => "bad_request",
        };
        tracing::error!(error_kind, "Request failed: {}", self);

        (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
