//! Export cropping on the working canvas.
//!
//! Regions are integer pixel rectangles. Copies are 1:1 (no resampling), so an
//! exported crop has exactly the region's dimensions.

use serde::{Deserialize, Serialize};

use crate::raster::{buffer_len, RasterImage, CHANNELS};

/// An integer pixel rectangle on the working canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The region covering a whole `width x height` canvas.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Clamp the region into a `width x height` canvas.
    ///
    /// The result is at least 1x1 and never extends past the canvas.
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width.saturating_sub(1));
        let y = self.y.min(height.saturating_sub(1));
        let w = self.width.min(width - x).max(1);
        let h = self.height.min(height - y).max(1);
        Self::new(x, y, w, h)
    }
}

/// Largest region with the given width/height ratio, centered on the canvas.
///
/// # Example
///
/// ```
/// use modelshot_core::transform::centered_region;
///
/// let region = centered_region(200, 100, 1.0);
/// assert_eq!((region.x, region.y, region.width, region.height), (50, 0, 100, 100));
/// ```
pub fn centered_region(width: u32, height: u32, ratio: f64) -> PixelRegion {
    if width == 0 || height == 0 || !ratio.is_finite() || ratio <= 0.0 {
        return PixelRegion::full(width, height);
    }

    let (w, h) = if width as f64 / height as f64 > ratio {
        let w = (height as f64 * ratio).round() as u32;
        (w.clamp(1, width), height)
    } else {
        let h = (width as f64 / ratio).round() as u32;
        (width, h.clamp(1, height))
    };

    PixelRegion::new((width - w) / 2, (height - h) / 2, w, h)
}

/// Copy a region of the image into a new buffer of the region's size.
///
/// The region is clamped to the image first, so the output is always valid
/// and at least 1x1.
pub fn crop_region(image: &RasterImage, region: PixelRegion) -> RasterImage {
    let region = region.clamped_to(image.width, image.height);
    if region == PixelRegion::full(image.width, image.height) {
        return image.clone();
    }

    let mut output = Vec::with_capacity(buffer_len(region.width, region.height));
    let row_bytes = region.width as usize * CHANNELS;

    // Copy pixel data row by row
    for y in region.y..region.y + region.height {
        let start = image.index(region.x, y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    RasterImage {
        width: region.width,
        height: region.height,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel's red channel encodes its position.
    fn test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity(buffer_len(width, height));
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        RasterImage {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = crop_region(&img, PixelRegion::full(100, 100));
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = crop_region(&img, PixelRegion::new(2, 2, 6, 6));

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        // First pixel is (2, 2): 2 * 10 + 2 = 22
        assert_eq!(result.pixels[0], 22);
        // Second row starts at (2, 3): 32
        assert_eq!(result.pixel(0, 1).unwrap()[0], 32);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = crop_region(&img, PixelRegion::new(8, 8, 5, 5));
        assert_eq!((result.width, result.height), (2, 2));
        assert_eq!(result.pixels[0], 88);
    }

    #[test]
    fn test_crop_origin_outside_image() {
        let img = test_image(10, 10);
        let result = crop_region(&img, PixelRegion::new(50, 50, 5, 5));
        assert_eq!((result.width, result.height), (1, 1));
        assert_eq!(result.pixels[0], 99);
    }

    #[test]
    fn test_crop_zero_size_becomes_minimum() {
        let img = test_image(10, 10);
        let result = crop_region(&img, PixelRegion::new(3, 3, 0, 0));
        assert_eq!((result.width, result.height), (1, 1));
    }

    #[test]
    fn test_centered_region_wide_canvas() {
        let region = centered_region(200, 100, 1.0);
        assert_eq!(region, PixelRegion::new(50, 0, 100, 100));
    }

    #[test]
    fn test_centered_region_tall_canvas() {
        let region = centered_region(100, 300, 16.0 / 9.0);
        // 100 / (16/9) = 56.25 -> 56
        assert_eq!(region, PixelRegion::new(0, 122, 100, 56));
    }

    #[test]
    fn test_centered_region_portrait_ratio() {
        let region = centered_region(1000, 1000, 4.0 / 5.0);
        assert_eq!(region, PixelRegion::new(100, 0, 800, 1000));
    }

    #[test]
    fn test_centered_region_invalid_ratio_is_full() {
        assert_eq!(centered_region(40, 30, 0.0), PixelRegion::full(40, 30));
        assert_eq!(centered_region(40, 30, f64::NAN), PixelRegion::full(40, 30));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
