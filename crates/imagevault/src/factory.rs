//! Collection factory: the top-level wiring point.
//!
//! Constructed once per credential/bucket pair; collections created from it
//! share the bucket addressing, filter policy, transformer, and object
//! store, but each collection owns its store definitions and resolver.
//! Nothing here is process-global: a second factory with a different access
//! policy cannot affect URLs resolved by this one.

use crate::planner::VariantPlanner;
use crate::registry::StoreRegistry;
use crate::resolver::{AppServedUrls, ServedUrlSource, UrlResolver};
use crate::upload;
use bytes::Bytes;
use imagevault_core::{
    AppError, AppResult, BucketUrlConfig, Config, FileRecord, StoreDefinition, VariantSpec,
};
use imagevault_processing::{
    CoverCropTransformer, FileMetadata, ImageTransformer, UploadFilter, UploadFilterPolicy,
};
use imagevault_storage::ObjectStore;
use std::sync::Arc;

/// A named logical collection: store definitions, the admission filter,
/// and URL resolution, bound to the factory's object store.
#[derive(Clone)]
pub struct Collection {
    name: String,
    stores: Vec<StoreDefinition>,
    filter: UploadFilter,
    transformer: Option<Arc<dyn ImageTransformer>>,
    object_store: Arc<dyn ObjectStore>,
    resolver: UrlResolver,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The collection's store definitions; the original is always first.
    pub fn stores(&self) -> &[StoreDefinition] {
        &self.stores
    }

    /// Run one file through the filter and, if admitted, persist the
    /// original and every variant concurrently. `Ok(None)` means the filter
    /// rejected the file and nothing was stored.
    pub async fn store_file(
        &self,
        meta: &FileMetadata,
        data: Bytes,
    ) -> AppResult<Option<FileRecord>> {
        upload::store_file(
            &self.name,
            &self.stores,
            &self.filter,
            self.transformer.clone(),
            self.object_store.clone(),
            meta,
            data,
        )
        .await
    }

    /// Resolve the externally visible URL for one store's copy of a file.
    pub fn resolve_url(&self, file: &FileRecord, store: &str) -> Option<String> {
        self.resolver.resolve(file, store)
    }
}

/// Top-level entry point; see the crate docs for an example.
pub struct CollectionFactory {
    bucket_url: BucketUrlConfig,
    filter: UploadFilter,
    transformer: Option<Arc<dyn ImageTransformer>>,
    object_store: Arc<dyn ObjectStore>,
    served: Arc<dyn ServedUrlSource>,
    registry: StoreRegistry,
}

impl CollectionFactory {
    pub fn builder() -> CollectionFactoryBuilder {
        CollectionFactoryBuilder::default()
    }

    /// Wire a factory from environment configuration plus an object store.
    pub fn from_config(config: &Config, object_store: Arc<dyn ObjectStore>) -> AppResult<Self> {
        let policy = UploadFilterPolicy {
            max_size_bytes: config.max_upload_size_bytes,
            allowed_content_type_patterns: config.allowed_content_type_patterns.clone(),
            allowed_extensions: config.allowed_extensions.clone(),
        };
        Self::builder()
            .bucket_url(config.bucket_url())
            .filter_policy(policy)
            .object_store(object_store)
            .build()
    }

    /// Derived bucket base URL, fixed at construction.
    pub fn bucket_url(&self) -> String {
        self.bucket_url.base_url()
    }

    /// Create one logical collection: plan its store definitions, record
    /// them in the registry, and bundle them with the filter and resolver.
    ///
    /// Fails fast on invalid names/dimensions or a duplicate collection
    /// name; no partial collection is returned.
    pub fn create_collection(&self, name: &str, sizes: &VariantSpec) -> AppResult<Collection> {
        let stores = VariantPlanner::plan(
            name,
            sizes,
            &self.bucket_url.bucket,
            self.bucket_url.access_policy,
        )?;
        self.registry.register(name, stores.clone())?;

        tracing::info!(
            collection = %name,
            stores = stores.len(),
            public_read = self.bucket_url.is_public_read(),
            "Collection created"
        );

        Ok(Collection {
            name: name.to_string(),
            stores,
            filter: self.filter.clone(),
            transformer: self.transformer.clone(),
            object_store: self.object_store.clone(),
            resolver: UrlResolver::new(self.bucket_url.clone(), self.served.clone()),
        })
    }

    /// Store definitions previously registered for a collection.
    pub fn stores_for(&self, collection: &str) -> Option<Vec<StoreDefinition>> {
        self.registry.get(collection)
    }

    /// Names of every collection created from this factory, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        self.registry.collection_names()
    }
}

/// Builder for [`CollectionFactory`]. `bucket_url` and `object_store` are
/// required; everything else has defaults (10 MiB image-only filter policy
/// logging rejections, the cover-crop transformer, and an application-
/// served URL source under `/files`).
#[derive(Default)]
pub struct CollectionFactoryBuilder {
    bucket_url: Option<BucketUrlConfig>,
    filter: Option<UploadFilter>,
    filter_policy: Option<UploadFilterPolicy>,
    transformer: Option<Option<Arc<dyn ImageTransformer>>>,
    object_store: Option<Arc<dyn ObjectStore>>,
    served: Option<Arc<dyn ServedUrlSource>>,
}

impl CollectionFactoryBuilder {
    pub fn bucket_url(mut self, bucket_url: BucketUrlConfig) -> Self {
        self.bucket_url = Some(bucket_url);
        self
    }

    /// Replace the whole filter, including its `on_invalid` hook.
    pub fn filter(mut self, filter: UploadFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Override just the acceptance policy, keeping the log-sink hook.
    pub fn filter_policy(mut self, policy: UploadFilterPolicy) -> Self {
        self.filter_policy = Some(policy);
        self
    }

    pub fn transformer(mut self, transformer: Arc<dyn ImageTransformer>) -> Self {
        self.transformer = Some(Some(transformer));
        self
    }

    /// Build without an image transformer: variant writes are skipped with
    /// a diagnostic and only originals persist (degraded mode).
    pub fn without_transformer(mut self) -> Self {
        self.transformer = Some(None);
        self
    }

    pub fn object_store(mut self, object_store: Arc<dyn ObjectStore>) -> Self {
        self.object_store = Some(object_store);
        self
    }

    pub fn served_urls(mut self, served: Arc<dyn ServedUrlSource>) -> Self {
        self.served = Some(served);
        self
    }

    pub fn build(self) -> AppResult<CollectionFactory> {
        let bucket_url = self
            .bucket_url
            .ok_or_else(|| AppError::missing("bucket url configuration"))?;
        let object_store = self
            .object_store
            .ok_or_else(|| AppError::missing("object store"))?;

        let filter = match (self.filter, self.filter_policy) {
            (Some(filter), _) => filter,
            (None, Some(policy)) => UploadFilter::with_log_sink(policy),
            (None, None) => UploadFilter::with_log_sink(UploadFilterPolicy::default()),
        };

        let transformer = self
            .transformer
            .unwrap_or_else(|| Some(Arc::new(CoverCropTransformer)));

        let served = self
            .served
            .unwrap_or_else(|| Arc::new(AppServedUrls::new("/files")));

        Ok(CollectionFactory {
            bucket_url,
            filter,
            transformer,
            object_store,
            served,
            registry: StoreRegistry::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagevault_core::AccessPolicy;
    use imagevault_storage::LocalObjectStore;

    async fn local_store() -> (Arc<dyn ObjectStore>, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = LocalObjectStore::new(dir.path()).await.unwrap();
        (Arc::new(store), dir)
    }

    #[tokio::test]
    async fn test_builder_requires_object_store() {
        let result = CollectionFactory::builder()
            .bucket_url(BucketUrlConfig::new("photos", "", AccessPolicy::Private))
            .build();
        assert!(matches!(result, Err(AppError::MissingParameter(_))));
    }

    #[tokio::test]
    async fn test_builder_requires_bucket_url() {
        let (store, _dir) = local_store().await;
        let result = CollectionFactory::builder().object_store(store).build();
        assert!(matches!(result, Err(AppError::MissingParameter(_))));
    }

    #[tokio::test]
    async fn test_duplicate_collection_rejected() {
        let (store, _dir) = local_store().await;
        let factory = CollectionFactory::builder()
            .bucket_url(BucketUrlConfig::new("photos", "", AccessPolicy::Private))
            .object_store(store)
            .build()
            .unwrap();

        let sizes = VariantSpec::new().with("thumb", 50, 50).unwrap();
        factory.create_collection("avatars", &sizes).unwrap();
        assert!(factory.create_collection("avatars", &sizes).is_err());
    }

    #[tokio::test]
    async fn test_registry_scoped_per_collection() {
        let (store, _dir) = local_store().await;
        let factory = CollectionFactory::builder()
            .bucket_url(BucketUrlConfig::new("photos", "eu-west-1", AccessPolicy::Private))
            .object_store(store)
            .build()
            .unwrap();
        assert_eq!(
            factory.bucket_url(),
            "https://photos-eu-west-1.s3.amazonaws.com/"
        );

        let sizes = VariantSpec::new().with("thumb", 50, 50).unwrap();
        factory.create_collection("avatars", &sizes).unwrap();
        factory
            .create_collection("covers", &VariantSpec::new())
            .unwrap();

        assert_eq!(factory.stores_for("avatars").unwrap().len(), 2);
        assert_eq!(factory.stores_for("covers").unwrap().len(), 1);
        assert_eq!(factory.collection_names(), vec!["avatars", "covers"]);
    }
}
