use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out millisecond timestamps that never repeat or go backwards
/// within one process, even when several writes land in the same
/// millisecond or the wall clock steps back.
#[derive(Debug, Default)]
pub struct VersionClock {
    last: AtomicI64,
}

impl VersionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next timestamp: the current time in milliseconds, or one past the
    /// previously issued value if that is later.
    pub fn next(&self) -> i64 {
        self.next_after(Utc::now().timestamp_millis())
    }

    fn next_after(&self, now_ms: i64) -> i64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}
