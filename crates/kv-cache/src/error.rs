//! Error types for the cache

use std::fmt;

#[derive(Debug)]
pub enum CacheError {
    /// The cache backend could not be reached or failed the command
    Unavailable(String),
    /// The configured endpoint is not a usable address
    InvalidEndpoint(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Unavailable(msg) => write!(f, "Cache unavailable: {}", msg),
            CacheError::InvalidEndpoint(msg) => write!(f, "Invalid cache endpoint: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Unavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
