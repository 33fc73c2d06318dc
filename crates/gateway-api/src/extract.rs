//! Request extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

/// JSON request body.
///
/// Unlike `axum::Json`, any failure (unreadable body, bad syntax, wrong
/// shape, missing `Content-Type`) is rejected the same way: 400 with
/// `{"error": "Invalid request body"}`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "Failed to read request body");
            AppError::invalid_body()
        })?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            debug!(error = %e, "Rejected request body");
            AppError::invalid_body()
        })
    }
}
