//! Image transformer capability.
//!
//! The upload orchestration consumes the transformer through this trait so
//! the image backend stays swappable (and optional: a pipeline built with
//! no transformer skips variant writes entirely, in degraded mode).

use crate::image::cover::render_variant;
use crate::image::TransformError;
use bytes::Bytes;
use imagevault_core::Dimensions;

/// Write-time transform applied to each non-original store.
pub trait ImageTransformer: Send + Sync {
    /// Produce the variant bytes for one target. Failures abort persistence
    /// of that one variant only.
    fn render(&self, data: &[u8], dims: Dimensions) -> Result<Bytes, TransformError>;
}

/// Default transformer: cover-resize, center-crop, EXIF orientation,
/// maximum-quality encode.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverCropTransformer;

impl ImageTransformer for CoverCropTransformer {
    fn render(&self, data: &[u8], dims: Dimensions) -> Result<Bytes, TransformError> {
        render_variant(data, dims)
    }
}
