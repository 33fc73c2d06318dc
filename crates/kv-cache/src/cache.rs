use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Largest TTL in seconds accepted by [`Ttl::checked_from_secs`].
///
/// Redis stores expiry as an absolute millisecond time in an `i64`, adding
/// the current time to `EX`; half that range always fits.
pub const MAX_TTL_SECS: u64 = (i64::MAX / 1000 / 2) as u64;

/// Lifetime of a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Never expires
    Persistent,
    /// Expires after the given duration
    Expires(Duration),
}

impl Ttl {
    /// `0` means no expiry, anything else is a lifetime in seconds
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            Ttl::Persistent
        } else {
            Ttl::Expires(Duration::from_secs(secs))
        }
    }

    /// Like [`Ttl::from_secs`], but `None` above [`MAX_TTL_SECS`]
    pub fn checked_from_secs(secs: u64) -> Option<Self> {
        (secs <= MAX_TTL_SECS).then(|| Self::from_secs(secs))
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Ttl::Persistent => None,
            Ttl::Expires(d) => Some(*d),
        }
    }
}

/// A networked key/value cache
#[async_trait]
pub trait KvCache: Send + Sync {
    /// Stored value for `key`, or `None` on a miss
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any existing entry
    async fn set(&self, key: &str, value: String, ttl: Ttl) -> Result<()>;

    /// Remove `key`, returning how many entries were removed (0 or 1)
    async fn delete(&self, key: &str) -> Result<u64>;

    /// Round-trip to the backend to check it is reachable
    async fn ping(&self) -> Result<()>;
}
