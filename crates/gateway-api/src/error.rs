//! Error types for the gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blob_listing::BlobStoreError;
use item_store::ItemStoreError;
use kv_cache::CacheError;
use serde_json::json;
use std::fmt;

use crate::cache_aside::WriteError;

/// Message returned for any body that fails to parse
pub const INVALID_BODY: &str = "Invalid request body";

/// Request-level error that converts to an HTTP response.
///
/// Backend variants carry the client-facing message separately from the
/// underlying error; only the message leaves the process.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Store {
        message: &'static str,
        source: ItemStoreError,
    },
    Cache {
        message: &'static str,
        source: CacheError,
    },
    Blob {
        message: &'static str,
        source: BlobStoreError,
    },
}

impl AppError {
    pub fn invalid_body() -> Self {
        AppError::BadRequest(INVALID_BODY.to_string())
    }

    pub fn store(message: &'static str, source: ItemStoreError) -> Self {
        AppError::Store { message, source }
    }

    pub fn cache(message: &'static str, source: CacheError) -> Self {
        AppError::Cache { message, source }
    }

    pub fn blob(message: &'static str, source: BlobStoreError) -> Self {
        AppError::Blob { message, source }
    }

    /// Map a write-then-invalidate failure onto the side that failed
    pub fn write(message: &'static str, err: WriteError) -> Self {
        match err {
            WriteError::Store(e) => AppError::store(message, e),
            WriteError::Invalidate(e) => AppError::cache(message, e),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Store { message, source } => write!(f, "{}: {}", message, source),
            AppError::Cache { message, source } => write!(f, "{}: {}", message, source),
            AppError::Blob { message, source } => write!(f, "{}: {}", message, source),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Cache { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Blob { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Startup and serving failures for the process as a whole
#[derive(Debug)]
pub enum GatewayError {
    Config(String),
    Cache(CacheError),
    Io(Box<std::io::Error>),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GatewayError::Cache(err) => write!(f, "Cache setup error: {}", err),
            GatewayError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::Cache(err) => Some(err),
            GatewayError::Io(err) => Some(err.as_ref()),
            GatewayError::Config(_) => None,
        }
    }
}

impl From<CacheError> for GatewayError {
    fn from(err: CacheError) -> Self {
        GatewayError::Cache(err)
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for GatewayError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        GatewayError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
