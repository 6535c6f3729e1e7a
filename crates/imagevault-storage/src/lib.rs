//! Imagevault Storage Library
//!
//! Object-store abstraction and backends. The orchestration layer persists
//! every original and variant through the [`ObjectStore`] trait; S3 (via
//! the `object_store` crate) and the local filesystem implement it.
//!
//! # Object key format
//!
//! Keys follow the direct-access URL path so URLs and keys line up:
//! `{store_name}/{collection}/{file_id}-{file_name}`. Keys must not contain
//! `..` or a leading `/`. Key generation is centralized in the `keys`
//! module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_object_store;
pub use keys::object_key;
#[cfg(feature = "storage-local")]
pub use local::LocalObjectStore;
#[cfg(feature = "storage-s3")]
pub use s3::S3ObjectStore;
pub use traits::{ObjectStore, StorageError, StorageResult};
