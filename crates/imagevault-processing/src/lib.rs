//! Imagevault Processing Library
//!
//! Per-file validation (the upload filter) and the write-time image
//! transform applied to non-original stores. The transform is a pure
//! function of (source bytes, target dimensions); the filter is the single
//! synchronous admission gate applied before any store receives bytes.

pub mod filter;
pub mod image;
pub mod transformer;

pub use filter::{FileMetadata, FilterRejection, OnInvalid, UploadFilter, UploadFilterPolicy};
pub use image::cover::render_variant;
pub use image::TransformError;
pub use transformer::{CoverCropTransformer, ImageTransformer};
