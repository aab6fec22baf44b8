use crate::booking_store::{StoreError, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failures a handler turns into a non-200 response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// The submitted form is echoed back together with its field errors.
    #[error("Invalid form submission ({} errors)", .errors.len())]
    Validation {
        form: serde_json::Value,
        errors: Vec<ValidationError>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation<F: Serialize>(form: &F, errors: Vec<ValidationError>) -> Self {
        ApiError::Validation {
            form: serde_json::to_value(form).unwrap_or_default(),
            errors,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Validation { form, errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "form": form, "errors": errors })),
            )
                .into_response(),
            ApiError::Internal(message) => {
                error!("{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
