//! Imagevault
//!
//! Multi-variant file-storage orchestration: one uploaded image becomes an
//! untouched original plus a set of named fixed-dimension variants, each
//! persisted independently in object storage and addressable by a resolved
//! URL.
//!
//! The entry point is [`CollectionFactory`]: construct it once with
//! credentials, bucket addressing, and the upload policy, then call
//! [`CollectionFactory::create_collection`] per logical collection. The
//! returned [`Collection`] gates uploads through its filter, fans each
//! accepted file out to every store definition concurrently, and resolves
//! per-variant URLs according to the configured access policy.
//!
//! ```no_run
//! use imagevault::{CollectionFactory, Collection};
//! use imagevault_core::{AccessPolicy, BucketUrlConfig, VariantSpec};
//! use imagevault_storage::LocalObjectStore;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(LocalObjectStore::new("/var/lib/imagevault").await?);
//! let factory = CollectionFactory::builder()
//!     .bucket_url(BucketUrlConfig::new("photos", "", AccessPolicy::PublicRead))
//!     .object_store(store)
//!     .build()?;
//!
//! let sizes = VariantSpec::new().with("thumb", 50, 50)?;
//! let avatars: Collection = factory.create_collection("avatars", &sizes)?;
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod planner;
pub mod registry;
pub mod resolver;
pub mod upload;

// Re-export commonly used types
pub use factory::{Collection, CollectionFactory, CollectionFactoryBuilder};
pub use planner::VariantPlanner;
pub use registry::StoreRegistry;
pub use resolver::{AppServedUrls, ServedUrlSource, UrlResolver};

pub use imagevault_core::{
    AccessPolicy, AppError, AppResult, BucketUrlConfig, Config, Dimensions, FileRecord,
    StoreDefinition, VariantSpec,
};
pub use imagevault_processing::{FileMetadata, UploadFilter, UploadFilterPolicy};
