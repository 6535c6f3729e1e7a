//! Bucket base-URL derivation.

use crate::models::AccessPolicy;
use serde::{Deserialize, Serialize};

/// Immutable bucket addressing configuration, fixed at factory construction.
///
/// The derived base URL uses the legacy virtual-hosted form with the region
/// as a hyphen-prefixed host segment:
/// `https://{bucket}[-{region}].s3.amazonaws.com/`. External code re-derives
/// and parses this string, so the format must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketUrlConfig {
    pub bucket: String,
    /// Empty string means the provider's default region.
    pub region: String,
    pub access_policy: AccessPolicy,
}

impl BucketUrlConfig {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>, access_policy: AccessPolicy) -> Self {
        BucketUrlConfig {
            bucket: bucket.into(),
            region: region.into(),
            access_policy,
        }
    }

    /// Base URL for direct bucket access, with trailing slash.
    pub fn base_url(&self) -> String {
        if self.region.is_empty() {
            format!("https://{}.s3.amazonaws.com/", self.bucket)
        } else {
            format!("https://{}-{}.s3.amazonaws.com/", self.bucket, self.region)
        }
    }

    pub fn is_public_read(&self) -> bool {
        self.access_policy == AccessPolicy::PublicRead
    }
}
