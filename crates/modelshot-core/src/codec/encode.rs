//! Encoding exported rasters.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::CodecError;
use crate::raster::{buffer_len, RasterImage, CHANNELS};

/// JPEG quality used when the caller has no preference.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

fn validate(image: &RasterImage) -> Result<(), CodecError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(CodecError::InvalidDimensions { width, height });
    }
    let expected = buffer_len(width, height);
    if image.pixels.len() != expected {
        return Err(CodecError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

/// Encode a raster as PNG, keeping the alpha channel.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, CodecError> {
    validate(image)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a raster as JPEG.
///
/// JPEG has no alpha, so the alpha channel is dropped. `quality` is clamped
/// to 1-100.
///
/// # Example
///
/// ```
/// use modelshot_core::codec::encode_jpeg;
/// use modelshot_core::RasterImage;
///
/// let image = RasterImage::filled(16, 16, [128, 128, 128, 255]);
/// let jpeg = encode_jpeg(&image, 90).unwrap();
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, CodecError> {
    validate(image)?;

    let rgb: Vec<u8> = image
        .pixels
        .chunks_exact(CHANNELS)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
