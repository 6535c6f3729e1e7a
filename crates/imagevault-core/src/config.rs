//! Configuration module
//!
//! Construction-time configuration read from the environment. Nothing here
//! is runtime-mutable: the factory derives its bucket URL and access policy
//! once from this struct and never revisits them.

use std::env;

use crate::bucket_url::BucketUrlConfig;
use crate::constants;
use crate::error::{AppError, AppResult};
use crate::models::AccessPolicy;

/// Storage-service credentials, forwarded verbatim to the object-store
/// backend. Treated as opaque read-only secrets; never logged and never
/// embedded in URLs.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Workspace configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub bucket: String,
    /// Empty means the provider's default region.
    pub bucket_region: String,
    pub public_read: bool,
    /// Custom endpoint for S3-compatible providers (MinIO etc.).
    pub endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    // Upload acceptance policy
    pub max_upload_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_type_patterns: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables, honoring a `.env`
    /// file when present.
    ///
    /// Required: `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `S3_BUCKET`.
    /// Missing values fail fast with `AppError::MissingParameter`.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let credentials = Credentials {
            access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
        };
        let bucket = require_env("S3_BUCKET")?;
        let bucket_region = env::var("S3_REGION").unwrap_or_default();
        let public_read = env::var("PUBLIC_READ")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let endpoint = env::var("S3_ENDPOINT").ok();
        let local_storage_path = env::var("LOCAL_STORAGE_PATH").ok();

        let max_upload_size_bytes = match env::var("MAX_UPLOAD_SIZE_BYTES") {
            Ok(v) => v.parse::<u64>().map_err(|_| {
                AppError::config(format!("MAX_UPLOAD_SIZE_BYTES is not a number: {}", v))
            })?,
            Err(_) => constants::MAX_UPLOAD_SIZE_BYTES,
        };

        Ok(Config {
            credentials,
            bucket,
            bucket_region,
            public_read,
            endpoint,
            local_storage_path,
            max_upload_size_bytes,
            allowed_extensions: constants::ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_content_type_patterns: constants::ALLOWED_CONTENT_TYPE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }

    pub fn access_policy(&self) -> AccessPolicy {
        if self.public_read {
            AccessPolicy::PublicRead
        } else {
            AccessPolicy::Private
        }
    }

    pub fn bucket_url(&self) -> BucketUrlConfig {
        BucketUrlConfig::new(
            self.bucket.clone(),
            self.bucket_region.clone(),
            self.access_policy(),
        )
    }
}

fn require_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::missing(name.to_string()))
}
