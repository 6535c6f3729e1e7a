//! Write-time image transformation.

pub mod cover;
pub mod orientation;

/// Transform failures. Isolated to the one variant being produced; the
/// original and sibling variants are independent write paths and are never
/// affected by a failure here.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}
