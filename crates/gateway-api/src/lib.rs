//! HTTP gateway over a DynamoDB item table, a Redis cache and an S3 bucket.
//!
//! Single-item reads go through the cache ([`cache_aside::CachedItems`]);
//! listings always hit the backend directly.

pub mod cache_aside;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod server;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_support;

pub use cache_aside::{CachedItems, ItemLookup, Source};
pub use config::Config;
pub use error::{AppError, GatewayError, Result};
pub use server::{create_router, start_server};
pub use state::AppState;
