//! Outcome messages of mutation routes.
//!
//! A mutation either succeeds or hits an expected persistence fault; both end
//! in a 200 response carrying a `Flash` for the presentation layer.

use super::ApiError;
use crate::booking_store::StoreResult;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            category: FlashCategory::Success,
            message: message.into(),
            redirect_to: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            category: FlashCategory::Error,
            message: message.into(),
            redirect_to: None,
        }
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = Some(path.into());
        self
    }
}

impl IntoResponse for Flash {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Turns the result of a store write into the route's response.
///
/// Constraint violations and an unavailable database are logged and reported
/// through `on_failure`; any other fault propagates as an `ApiError`.
pub fn settle<T>(
    result: StoreResult<T>,
    on_success: impl FnOnce(T) -> Flash,
    on_failure: impl FnOnce() -> Flash,
) -> Result<Flash, ApiError> {
    match result {
        Ok(value) => Ok(on_success(value)),
        Err(err) if err.is_expected_fault() => {
            error!("Write failed: {}", err);
            Ok(on_failure())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking_store::StoreError;

    fn settle_with(result: StoreResult<i64>) -> Result<Flash, ApiError> {
        settle(
            result,
            |id| Flash::success(format!("created {}", id)),
            || Flash::error("failed"),
        )
    }

    #[test]
    fn success_uses_the_written_value() {
        let flash = settle_with(Ok(5)).unwrap();
        assert_eq!(flash, Flash::success("created 5"));
    }

    #[test]
    fn expected_faults_become_error_flash() {
        let flash = settle_with(Err(StoreError::ConstraintViolation(
            "FOREIGN KEY constraint failed".to_string(),
        )))
        .unwrap();
        assert_eq!(flash.category, FlashCategory::Error);

        let flash = settle_with(Err(StoreError::Unavailable("database is locked".to_string())))
            .unwrap();
        assert_eq!(flash.message, "failed");
    }

    #[test]
    fn missing_records_and_unexpected_faults_propagate() {
        let missing = settle_with(Err(StoreError::NotFound {
            entity: "Venue",
            id: 1,
        }));
        assert!(matches!(missing, Err(ApiError::NotFound(_))));

        let broken = settle_with(Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery)));
        assert!(matches!(broken, Err(ApiError::Internal(_))));
    }

    #[test]
    fn serialized_shape() {
        let json = serde_json::to_value(Flash::success("ok")).unwrap();
        assert_eq!(json, serde_json::json!({ "category": "success", "message": "ok" }));

        let json = serde_json::to_value(Flash::error("no").redirect_to("/")).unwrap();
        assert_eq!(json["redirect_to"], "/");
    }
}
