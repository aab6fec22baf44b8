use super::ApiError;
use axum::{
    extract::{FromRequestParts, OriginalUri, Path},
    http::request::Parts,
};

/// Numeric id taken from a route's `{id}` segment.
///
/// A segment that is not an integer names no record and is rejected as not
/// found.
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extracted = Path::<i64>::from_request_parts(parts, state).await;
        extracted.map(|Path(id)| RecordId(id)).map_err(|_| {
            // Nested routers see the uri with their prefix stripped.
            let path = parts
                .extensions
                .get::<OriginalUri>()
                .map_or(parts.uri.path(), |original| original.path());
            ApiError::NotFound(format!("No record at {}", path))
        })
    }
}
