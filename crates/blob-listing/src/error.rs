//! Error types for blob listing

use std::fmt;

#[derive(Debug)]
pub enum BlobStoreError {
    /// The object store could not be reached or rejected the request
    Unavailable(String),
}

impl fmt::Display for BlobStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobStoreError::Unavailable(msg) => write!(f, "Blob store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for BlobStoreError {}

pub type Result<T> = std::result::Result<T, BlobStoreError>;
