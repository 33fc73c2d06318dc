//! Key/value cache with optional per-key TTL
//!
//! Values are opaque strings; callers choose the encoding. Expiry is
//! enforced by the backend, never by callers.
//!
//! - [`RedisCache`] is the production backend.
//! - [`MemoryCache`] keeps entries in process with the same TTL semantics.

mod cache;
mod error;
mod memory;
mod redis_cache;

pub use cache::{KvCache, Ttl, MAX_TTL_SECS};
pub use error::{CacheError, Result};
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;
