//! Codec boundary between encoded files and [`RasterImage`] buffers.
//!
//! Uploads are decoded from PNG or JPEG with EXIF orientation applied, so the
//! editor always starts from an upright RGBA buffer. Exports are encoded as PNG
//! (lossless) or JPEG (alpha dropped).
//!
//! [`RasterImage`]: crate::RasterImage

mod decode;
mod encode;

use thiserror::Error;

pub use decode::{decode_image, exif_orientation};
pub use encode::{encode_jpeg, encode_png, DEFAULT_JPEG_QUALITY};

/// Errors from decoding or encoding image files.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a recognized image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The file was recognized but could not be decoded.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The encoder rejected the image.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
