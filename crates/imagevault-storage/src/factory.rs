//! Backend selection from configuration.

use crate::{ObjectStore, StorageError, StorageResult};
use imagevault_core::Config;
use std::sync::Arc;

enum Backend {
    S3,
    Local,
}

/// Create an object-store backend based on configuration.
///
/// S3 is the default; setting `LOCAL_STORAGE_PATH` selects the local
/// filesystem backend instead (tests and development).
pub async fn create_object_store(config: &Config) -> StorageResult<Arc<dyn ObjectStore>> {
    let backend = if config.local_storage_path.is_some() {
        Backend::Local
    } else {
        Backend::S3
    };

    match backend {
        #[cfg(feature = "storage-s3")]
        Backend::S3 => {
            let store = crate::S3ObjectStore::new(
                &config.credentials,
                config.bucket.clone(),
                config.bucket_region.clone(),
                config.endpoint.clone(),
            )?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-s3"))]
        Backend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        Backend::Local => {
            let base_path = config
                .local_storage_path
                .clone()
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;
            let store = crate::LocalObjectStore::new(base_path).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-local"))]
        Backend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
