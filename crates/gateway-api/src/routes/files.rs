use axum::extract::State;
use axum::Json;
use blob_listing::DEFAULT_MAX_KEYS;

use crate::error::AppError;
use crate::state::AppState;
use crate::types::{FileListResponse, MessageResponse};

pub async fn list_files(State(state): State<AppState>) -> Result<Json<FileListResponse>, AppError> {
    let files = state
        .blobs
        .list_objects(&state.data_bucket, DEFAULT_MAX_KEYS)
        .await
        .map_err(|e| AppError::blob("Failed to list files", e))?;

    Ok(Json(FileListResponse {
        bucket: state.data_bucket.clone(),
        count: files.len(),
        files,
    }))
}

/// Placeholder; multipart upload is not implemented
pub async fn upload() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Upload endpoint - implement multipart file upload",
    })
}
