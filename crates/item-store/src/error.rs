//! Error types for item storage

use std::fmt;

/// Errors surfaced by an [`ItemStore`](crate::ItemStore)
#[derive(Debug)]
pub enum ItemStoreError {
    /// The backend could not be reached or rejected the request
    Unavailable(String),
    /// An item could not be converted to or from the backend's representation
    Serialization(String),
}

impl fmt::Display for ItemStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Item store unavailable: {}", msg),
            Self::Serialization(msg) => write!(f, "Item serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ItemStoreError {}

impl From<serde_json::Error> for ItemStoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ItemStoreError>;
