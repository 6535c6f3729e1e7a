//! Per-variant URL resolution.
//!
//! The resolver is injected per factory rather than installed globally, so
//! two factories with different access policies never interfere. Server-
//! mediated access stays an opaque capability behind [`ServedUrlSource`];
//! its non-`None` answer doubles as the "this variant has finished
//! persisting" signal.

use imagevault_core::{BucketUrlConfig, FileRecord};
use std::sync::Arc;

/// Server-mediated URL capability, supplied by the host application.
///
/// `serve_url` returns `Some` only when the requested store's copy of the
/// file exists; the resolver relies on that to avoid handing out direct
/// bucket URLs for variants still being produced.
pub trait ServedUrlSource: Send + Sync {
    fn serve_url(&self, file: &FileRecord, store: &str) -> Option<String>;
}

/// Default server-mediated source: routes through the application server
/// under a configured base path, answering from the file record's
/// persistence status.
#[derive(Debug, Clone)]
pub struct AppServedUrls {
    base: String,
}

impl AppServedUrls {
    pub fn new(base: impl Into<String>) -> Self {
        AppServedUrls { base: base.into() }
    }
}

impl ServedUrlSource for AppServedUrls {
    fn serve_url(&self, file: &FileRecord, store: &str) -> Option<String> {
        if !file.is_stored(store) {
            return None;
        }
        Some(format!(
            "{}/{}/{}/{}-{}",
            self.base.trim_end_matches('/'),
            store,
            file.collection,
            file.id,
            file.name
        ))
    }
}

/// Decides, per file and store, between a server-mediated URL and a direct
/// bucket URL.
#[derive(Clone)]
pub struct UrlResolver {
    bucket_url: BucketUrlConfig,
    served: Arc<dyn ServedUrlSource>,
}

impl UrlResolver {
    pub fn new(bucket_url: BucketUrlConfig, served: Arc<dyn ServedUrlSource>) -> Self {
        UrlResolver { bucket_url, served }
    }

    /// Resolve the externally visible URL for one store's copy of a file.
    ///
    /// Private policy delegates to the server-mediated source unchanged.
    /// Public-read consults the same source as a stored-status check: a
    /// variant not yet persisted resolves to `None` ("pending", not an
    /// error), and a persisted one gets a direct bucket URL of the form
    /// `{base_url}{store}/{collection}/{file_id}-{file_name}`.
    pub fn resolve(&self, file: &FileRecord, store: &str) -> Option<String> {
        if !self.bucket_url.is_public_read() {
            return self.served.serve_url(file, store);
        }

        self.served.serve_url(file, store)?;
        Some(format!(
            "{}{}/{}/{}-{}",
            self.bucket_url.base_url(),
            store,
            file.collection,
            file.id,
            file.name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagevault_core::AccessPolicy;

    fn stored_record() -> FileRecord {
        let mut record = FileRecord::new("photo.jpg", "avatars");
        record.stored.insert("avatars-thumb".to_string());
        record
    }

    fn resolver(policy: AccessPolicy) -> UrlResolver {
        UrlResolver::new(
            BucketUrlConfig::new("photos", "", policy),
            Arc::new(AppServedUrls::new("http://localhost:3000/files")),
        )
    }

    #[test]
    fn test_private_policy_never_returns_direct_url() {
        let resolver = resolver(AccessPolicy::Private);
        let record = stored_record();

        let url = resolver.resolve(&record, "avatars-thumb").unwrap();
        assert!(url.starts_with("http://localhost:3000/files/"));
        assert!(!url.contains("s3.amazonaws.com"));
    }

    #[test]
    fn test_public_read_pending_variant_resolves_to_none() {
        let resolver = resolver(AccessPolicy::PublicRead);
        let record = FileRecord::new("photo.jpg", "avatars");
        assert!(resolver.resolve(&record, "avatars-thumb").is_none());
    }

    #[test]
    fn test_public_read_stored_variant_gets_direct_url() {
        let resolver = resolver(AccessPolicy::PublicRead);
        let record = stored_record();

        let url = resolver.resolve(&record, "avatars-thumb").unwrap();
        assert_eq!(
            url,
            format!(
                "https://photos.s3.amazonaws.com/avatars-thumb/avatars/{}-photo.jpg",
                record.id
            )
        );
    }

    #[test]
    fn test_private_pending_variant_also_none() {
        let resolver = resolver(AccessPolicy::Private);
        let record = FileRecord::new("photo.jpg", "avatars");
        assert!(resolver.resolve(&record, "avatars-thumb").is_none());
    }
}
