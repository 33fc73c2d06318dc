use axum::extract::{Path, State};
use axum::Json;
use kv_cache::Ttl;
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;
use crate::extract::JsonBody;
use crate::state::AppState;
use crate::types::{CacheDeleteResponse, CacheSetResponse, CacheValueResponse, SetCacheRequest};

pub async fn set_cache(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SetCacheRequest>,
) -> Result<Json<CacheSetResponse>, AppError> {
    if body.key.is_empty() {
        return Err(AppError::invalid_body());
    }
    let ttl = Ttl::checked_from_secs(body.ttl).ok_or_else(AppError::invalid_body)?;

    state
        .cache
        .set(&body.key, body.value.to_string(), ttl)
        .await
        .map_err(|e| AppError::cache("Failed to set cache", e))?;

    debug!(key = %body.key, ttl = body.ttl, "Cached value");
    Ok(Json(CacheSetResponse {
        message: "Value cached successfully",
        key: body.key,
        ttl: body.ttl,
    }))
}

pub async fn get_cache(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheValueResponse>, AppError> {
    let raw = state
        .cache
        .get(&key)
        .await
        .map_err(|e| AppError::cache("Failed to get cache", e))?
        .ok_or_else(|| AppError::NotFound("Key not found in cache".to_string()))?;

    // Entries written by other clients may not be JSON
    let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));

    Ok(Json(CacheValueResponse { key, value }))
}

pub async fn delete_cache(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheDeleteResponse>, AppError> {
    let removed = state
        .cache
        .delete(&key)
        .await
        .map_err(|e| AppError::cache("Failed to delete cache", e))?;

    Ok(Json(CacheDeleteResponse {
        message: "Key deleted successfully",
        deleted: removed > 0,
    }))
}
