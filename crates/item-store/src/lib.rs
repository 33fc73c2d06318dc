//! Versioned item storage
//!
//! Items are keyed by `(id, timestamp)`. Every write creates a new version
//! stamped server-side; the "latest" item for an id is the version with the
//! greatest timestamp.
//!
//! Two backends implement [`ItemStore`]:
//!
//! - [`DynamoItemStore`] talks to a DynamoDB table whose partition key is
//!   `id` (string) and sort key is `timestamp` (number).
//! - [`MemoryItemStore`] keeps versions in process, for tests and local runs.

mod clock;
pub mod conversions;
mod dynamo;
mod error;
mod memory;
mod store;
mod types;

pub use clock::VersionClock;
pub use dynamo::DynamoItemStore;
pub use error::{ItemStoreError, Result};
pub use memory::MemoryItemStore;
pub use store::{ItemStore, DEFAULT_LIST_LIMIT};
pub use types::{Item, ItemData, NewItem};
