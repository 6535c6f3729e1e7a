//! Imagevault Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! constants shared across all imagevault components.

pub mod bucket_url;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use bucket_url::BucketUrlConfig;
pub use config::{Config, Credentials};
pub use error::{AppError, AppResult};
pub use models::{AccessPolicy, Dimensions, FileRecord, StoreDefinition, VariantSpec};
