//! Item types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary JSON object carried by an item
pub type ItemData = Map<String, Value>;

/// One stored version of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    /// Milliseconds since the Unix epoch, assigned when the version is written
    pub timestamp: i64,
    #[serde(default)]
    pub data: ItemData,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// An item as submitted for creation, before the store stamps it
#[derive(Debug, Clone)]
pub struct NewItem {
    pub id: String,
    pub data: ItemData,
}

impl NewItem {
    pub fn new(id: impl Into<String>, data: ItemData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Turn into a stored version. `createdAt` is derived from `timestamp`
    /// so both fields describe the same instant.
    pub(crate) fn stamp(self, timestamp: i64) -> Item {
        let created = DateTime::from_timestamp_millis(timestamp).unwrap_or_else(Utc::now);
        Item {
            id: self.id,
            timestamp,
            data: self.data,
            created_at: rfc3339(created),
            updated_at: None,
        }
    }
}

/// RFC 3339 in UTC with second precision, e.g. `2024-05-01T12:00:00Z`
pub(crate) fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
