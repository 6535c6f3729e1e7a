//! Upload filter: the single admission gate for incoming files.
//!
//! A file is accepted iff its size is within the ceiling (inclusive), its
//! content type matches one of the allowed patterns, and its extension is in
//! the allow-list. Checks run in that order; the first failure fires the
//! configured `on_invalid` hook exactly once with a reason naming the
//! violated rule, and the file is admitted to no store.

use std::path::Path;
use std::sync::Arc;

/// Rejection reasons. The rendered message is what reaches `on_invalid`.
#[derive(Debug, thiserror::Error)]
pub enum FilterRejection {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

/// Metadata the filter inspects. The byte stream itself is not read.
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Rejection notification hook, supplied by the host environment at
/// configuration time (interactive alert, log sink, metrics counter, ...).
pub type OnInvalid = Arc<dyn Fn(&str) + Send + Sync>;

/// Acceptance policy for one collection factory.
#[derive(Debug, Clone)]
pub struct UploadFilterPolicy {
    pub max_size_bytes: u64,
    /// Glob-like patterns; a trailing `/*` matches any subtype.
    pub allowed_content_type_patterns: Vec<String>,
    /// Lowercase extensions.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadFilterPolicy {
    fn default() -> Self {
        UploadFilterPolicy {
            max_size_bytes: imagevault_core::constants::MAX_UPLOAD_SIZE_BYTES,
            allowed_content_type_patterns: imagevault_core::constants::ALLOWED_CONTENT_TYPE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_extensions: imagevault_core::constants::ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// The admission gate. Cloneable; evaluated once per incoming file.
#[derive(Clone)]
pub struct UploadFilter {
    policy: UploadFilterPolicy,
    on_invalid: OnInvalid,
}

impl UploadFilter {
    pub fn new(policy: UploadFilterPolicy, on_invalid: OnInvalid) -> Self {
        UploadFilter { policy, on_invalid }
    }

    /// Default policy with rejections routed to a `tracing::warn!` sink.
    pub fn with_log_sink(policy: UploadFilterPolicy) -> Self {
        Self::new(
            policy,
            Arc::new(|reason: &str| {
                tracing::warn!(reason = %reason, "Upload rejected");
            }),
        )
    }

    /// Evaluate the gate. `true` admits the file to every store of its
    /// collection; `false` means `on_invalid` has fired and nothing will be
    /// stored.
    pub fn accept(&self, meta: &FileMetadata) -> bool {
        match self.check(meta) {
            Ok(()) => true,
            Err(rejection) => {
                (self.on_invalid)(&rejection.to_string());
                false
            }
        }
    }

    fn check(&self, meta: &FileMetadata) -> Result<(), FilterRejection> {
        self.check_size(meta.size_bytes)?;
        self.check_content_type(&meta.content_type)?;
        self.check_extension(&meta.name)?;
        Ok(())
    }

    fn check_size(&self, size: u64) -> Result<(), FilterRejection> {
        // Ceiling is inclusive.
        if size > self.policy.max_size_bytes {
            return Err(FilterRejection::FileTooLarge {
                size,
                max: self.policy.max_size_bytes,
            });
        }
        Ok(())
    }

    fn check_content_type(&self, content_type: &str) -> Result<(), FilterRejection> {
        let normalized = content_type.to_lowercase();
        let matched = self
            .policy
            .allowed_content_type_patterns
            .iter()
            .any(|pattern| content_type_matches(pattern, &normalized));
        if !matched {
            return Err(FilterRejection::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.policy.allowed_content_type_patterns.clone(),
            });
        }
        Ok(())
    }

    fn check_extension(&self, filename: &str) -> Result<(), FilterRejection> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| FilterRejection::InvalidFilename(filename.to_string()))?;

        if !self.policy.allowed_extensions.contains(&extension) {
            return Err(FilterRejection::InvalidExtension {
                extension,
                allowed: self.policy.allowed_extensions.clone(),
            });
        }
        Ok(())
    }
}

/// Match a content type against an allow-list pattern. A pattern ending in
/// `/*` matches any subtype of its type; anything else is an exact match.
fn content_type_matches(pattern: &str, content_type: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix("/*") {
        content_type
            .split('/')
            .next()
            .is_some_and(|main| main == prefix)
    } else {
        pattern == content_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn capture_filter(policy: UploadFilterPolicy) -> (UploadFilter, Arc<Mutex<Vec<String>>>) {
        let reasons = Arc::new(Mutex::new(Vec::new()));
        let sink = reasons.clone();
        let filter = UploadFilter::new(
            policy,
            Arc::new(move |reason: &str| {
                sink.lock().unwrap().push(reason.to_string());
            }),
        );
        (filter, reasons)
    }

    fn meta(name: &str, content_type: &str, size: u64) -> FileMetadata {
        FileMetadata {
            name: name.to_string(),
            content_type: content_type.to_string(),
            size_bytes: size,
        }
    }

    #[test]
    fn test_accepts_valid_image() {
        let (filter, reasons) = capture_filter(UploadFilterPolicy::default());
        assert!(filter.accept(&meta("photo.jpg", "image/jpeg", 500 * 1024)));
        assert!(reasons.lock().unwrap().is_empty());
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        let max = imagevault_core::constants::MAX_UPLOAD_SIZE_BYTES;
        let (filter, _) = capture_filter(UploadFilterPolicy::default());
        assert!(filter.accept(&meta("photo.png", "image/png", max)));
    }

    #[test]
    fn test_rejects_oversize_with_reason() {
        let max = imagevault_core::constants::MAX_UPLOAD_SIZE_BYTES;
        let (filter, reasons) = capture_filter(UploadFilterPolicy::default());
        assert!(!filter.accept(&meta("photo.png", "image/png", max + 1)));

        let reasons = reasons.lock().unwrap();
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("too large"));
    }

    #[test]
    fn test_content_type_checked_independently_of_extension() {
        // Valid extension, bad content type
        let (filter, reasons) = capture_filter(UploadFilterPolicy::default());
        assert!(!filter.accept(&meta("notes.png", "text/plain", 1024)));
        assert!(reasons.lock().unwrap()[0].contains("content type"));
    }

    #[test]
    fn test_extension_checked_independently_of_content_type() {
        // Valid content type, bad extension
        let (filter, reasons) = capture_filter(UploadFilterPolicy::default());
        assert!(!filter.accept(&meta("photo.bmp", "image/png", 1024)));
        assert!(reasons.lock().unwrap()[0].contains("extension"));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let (filter, _) = capture_filter(UploadFilterPolicy::default());
        assert!(filter.accept(&meta("photo.JPG", "image/jpeg", 1024)));
    }

    #[test]
    fn test_missing_extension_rejected() {
        let (filter, reasons) = capture_filter(UploadFilterPolicy::default());
        assert!(!filter.accept(&meta("photo", "image/jpeg", 1024)));
        assert_eq!(reasons.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_on_invalid_fires_exactly_once_per_rejection() {
        let max = imagevault_core::constants::MAX_UPLOAD_SIZE_BYTES;
        let (filter, reasons) = capture_filter(UploadFilterPolicy::default());
        // Oversize AND wrong type AND wrong extension: one call, naming the
        // first failing rule (size).
        assert!(!filter.accept(&meta("archive.zip", "application/zip", max * 2)));
        let reasons = reasons.lock().unwrap();
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("too large"));
    }

    #[test]
    fn test_content_type_pattern_glob() {
        assert!(content_type_matches("image/*", "image/png"));
        assert!(content_type_matches("image/*", "image/svg+xml"));
        assert!(!content_type_matches("image/*", "video/mp4"));
        assert!(content_type_matches("image/png", "image/png"));
        assert!(!content_type_matches("image/png", "image/jpeg"));
    }
}
