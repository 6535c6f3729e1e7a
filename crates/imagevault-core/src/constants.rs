//! Shared constants for the upload acceptance policy and serving layer.

/// Maximum accepted upload size: 10 MiB.
///
/// Bounds the worst-case storage and transform cost per upload; part of the
/// public acceptance contract.
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Content-type patterns admitted by the upload filter.
/// A trailing `/*` matches any subtype.
pub const ALLOWED_CONTENT_TYPE_PATTERNS: &[&str] = &["image/*"];

/// File extensions admitted by the upload filter (compared lowercased).
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Cache-Control value applied by the external serving layer to GET
/// responses for stored files. One year; fixed, not configurable.
pub const CACHE_CONTROL_ONE_YEAR: &str = "public, max-age=31536000";
