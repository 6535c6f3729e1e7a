//! Cover+crop variant rendering.
//!
//! The fixed write-time policy for every non-original store: scale the
//! source preserving aspect ratio until it covers the target box, center-
//! crop to the exact target dimensions, bake in EXIF orientation, and
//! encode at maximum quality in the source format. Pure function of
//! (source bytes, target dimensions).

use super::orientation::ImageOrientation;
use super::TransformError;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat};
use imagevault_core::Dimensions;
use std::io::Cursor;

/// Render one variant. Output always has exactly `dims.width x dims.height`
/// pixels regardless of the source aspect ratio.
pub fn render_variant(data: &[u8], dims: Dimensions) -> Result<Bytes, TransformError> {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| TransformError::Decode(e.to_string()))?;
    let format = reader.format().unwrap_or(ImageFormat::Jpeg);
    let img = reader
        .decode()
        .map_err(|e| TransformError::Decode(e.to_string()))?;

    let img = ImageOrientation::apply_exif_orientation(img, data);

    let (orig_width, orig_height) = img.dimensions();
    let filter = select_filter(orig_width, orig_height, dims.width, dims.height);
    let img = img.resize_to_fill(dims.width, dims.height, filter);

    encode(img, format)
}

/// Select a resampling filter based on how aggressive the downscale is.
fn select_filter(
    orig_width: u32,
    orig_height: u32,
    new_width: u32,
    new_height: u32,
) -> image::imageops::FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        image::imageops::FilterType::Triangle
    } else if max_ratio > 1.5 {
        image::imageops::FilterType::CatmullRom
    } else {
        image::imageops::FilterType::Lanczos3
    }
}

/// Encode at maximum quality in the source format. PNG and GIF are handled
/// by their format baselines; JPEG gets an explicit quality of 100.
fn encode(img: DynamicImage, format: ImageFormat) -> Result<Bytes, TransformError> {
    let (width, height) = img.dimensions();
    let mut buffer = Vec::with_capacity((width * height * 3) as usize);
    let mut cursor = Cursor::new(&mut buffer);

    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut cursor, 100);
            rgb.write_with_encoder(encoder)
                .map_err(|e| TransformError::Encode(e.to_string()))?;
        }
        other => {
            img.write_to(&mut cursor, other)
                .map_err(|e| TransformError::Encode(e.to_string()))?;
        }
    }

    Ok(Bytes::from(buffer))
}
