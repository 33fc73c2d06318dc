//! Read-only object listings
//!
//! [`S3BlobStore`] lists objects from S3 with `ListObjectsV2`;
//! [`MemoryBlobStore`] serves listings seeded in process.

mod error;
mod memory;
mod s3;
mod store;

pub use error::{BlobStoreError, Result};
pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;
pub use store::{BlobEntry, BlobStore, DEFAULT_MAX_KEYS};
