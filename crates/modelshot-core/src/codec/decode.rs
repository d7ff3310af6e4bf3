//! Decoding uploads into RGBA rasters.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::debug;

use super::CodecError;
use crate::raster::RasterImage;

/// Decode a PNG or JPEG file into an upright RGBA raster.
///
/// The EXIF orientation tag, when present, is applied so the result matches
/// what a browser shows for the same file.
///
/// # Errors
///
/// Returns [`CodecError::InvalidFormat`] if the bytes are not PNG or JPEG and
/// [`CodecError::CorruptedFile`] if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::CorruptedFile(e.to_string()))?;

    let format = match reader.format() {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => format,
        _ => return Err(CodecError::InvalidFormat),
    };

    let img = reader
        .decode()
        .map_err(|e| CodecError::CorruptedFile(e.to_string()))?;

    let orientation = exif_orientation(bytes);
    let img = apply_orientation(img, orientation);
    debug!(
        ?format,
        orientation,
        width = img.width(),
        height = img.height(),
        "decoded upload"
    );

    Ok(RasterImage::from_rgba_image(img.into_rgba8()))
}

/// Read the EXIF orientation tag (1-8), defaulting to 1 when absent.
pub fn exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .filter(|value| (1..=8).contains(value))
        .unwrap_or(1)
}

/// Undo the camera orientation recorded in EXIF.
fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_jpeg, encode_png};

    fn two_by_one() -> DynamicImage {
        let pixels = vec![255, 0, 0, 255, 0, 255, 0, 255];
        DynamicImage::ImageRgba8(image::RgbaImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_decode_png() {
        let source = RasterImage::new(2, 2, (0..16).collect()).unwrap();
        let png = encode_png(&source).unwrap();
        assert_eq!(decode_image(&png).unwrap(), source);
    }

    #[test]
    fn test_decode_jpeg_is_rgba() {
        let source = RasterImage::filled(8, 4, [120, 120, 120, 255]);
        let jpeg = encode_jpeg(&source, 90).unwrap();
        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!((decoded.width, decoded.height), (8, 4));
        assert_eq!(decoded.byte_len(), 8 * 4 * 4);
        assert_eq!(decoded.pixel(0, 0).unwrap()[3], 255);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(CodecError::InvalidFormat)));
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(&RasterImage::filled(4, 4, [1, 2, 3, 4])).unwrap();
        let result = decode_image(&png[..24]);
        assert!(matches!(result, Err(CodecError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        let png = encode_png(&RasterImage::filled(1, 1, [0, 0, 0, 255])).unwrap();
        assert_eq!(exif_orientation(&png), 1);
        assert_eq!(exif_orientation(&[0x00, 0x01]), 1);
    }

    #[test]
    fn test_apply_orientation() {
        let normal = apply_orientation(two_by_one(), 1).into_rgba8();
        assert_eq!(normal.get_pixel(0, 0).0, [255, 0, 0, 255]);

        let rotated = apply_orientation(two_by_one(), 6).into_rgba8();
        assert_eq!(rotated.dimensions(), (1, 2));

        let flipped = apply_orientation(two_by_one(), 2).into_rgba8();
        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0, 255]);

        let half = apply_orientation(two_by_one(), 3).into_rgba8();
        assert_eq!(half.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }
}
