//! Pixel adjustment algorithms
//!
//! Applies the editor's tonal and color adjustments to RGBA pixel data.
//! Channel math runs in the 0-255 scale; alpha is never touched.
//!
//! ## Adjustment Order
//! 1. Contrast
//! 2. Brightness
//! 3. Saturation
//! 4. Temperature
//! 5. Tint
//! 6. Shadows / Highlights
//! 7. Grayscale
//! 8. Clamp to 0-255
//!
//! Vignette is a separate full-image pass ([`apply_vignette`]) because it
//! depends on pixel position.

use crate::luminance::{luma_601, luminance_709};
use crate::raster::{RasterImage, CHANNELS};
use crate::{EditParams, Level, Strength};

/// Maximum channel shift applied by temperature and tint at full strength.
const COLOR_SHIFT: f32 = 30.0;

/// Maximum channel lift applied by shadows and highlights at full strength.
const TONE_SHIFT: f32 = 40.0;

/// Apply all per-pixel adjustments to RGBA pixel data in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `params` - The editor parameters to apply
pub fn apply_pixel_adjustments(pixels: &mut [u8], params: &EditParams) {
    if !params.has_pixel_adjustments() {
        return;
    }

    let contrast = contrast_factor(params.contrast);
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let mut r = chunk[0] as f32;
        let mut g = chunk[1] as f32;
        let mut b = chunk[2] as f32;

        (r, g, b) = apply_contrast(r, g, b, contrast);
        (r, g, b) = apply_brightness(r, g, b, params.brightness);
        (r, g, b) = apply_saturation(r, g, b, params.saturation);
        (r, g, b) = apply_temperature(r, g, b, params.temperature);
        (r, g, b) = apply_tint(r, g, b, params.tint);
        (r, g, b) = apply_tone(r, g, b, params.shadows, params.highlights);
        if params.grayscale {
            (r, g, b) = apply_grayscale(r, g, b);
        }

        chunk[0] = to_channel(r);
        chunk[1] = to_channel(g);
        chunk[2] = to_channel(b);
    }
}

/// Darken the image toward its corners.
///
/// For each pixel at distance `d` from the center, with `max_dist` the
/// center-to-corner distance: `factor = 1 - strength * (d / max_dist)^2`.
pub fn apply_vignette(image: &mut RasterImage, strength: Strength) {
    if strength.is_zero() || image.width == 0 || image.height == 0 {
        return;
    }

    let amount = strength.as_fraction();
    let width = image.width as usize;
    let cx = image.width as f32 / 2.0;
    let cy = image.height as f32 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt();

    for (i, chunk) in image.pixels.chunks_exact_mut(CHANNELS).enumerate() {
        let dx = (i % width) as f32 + 0.5 - cx;
        let dy = (i / width) as f32 + 0.5 - cy;
        let t = (dx * dx + dy * dy).sqrt() / max_dist;
        let factor = 1.0 - amount * t * t;

        chunk[0] = to_channel(chunk[0] as f32 * factor);
        chunk[1] = to_channel(chunk[1] as f32 * factor);
        chunk[2] = to_channel(chunk[2] as f32 * factor);
    }
}

/// Classic contrast curve factor.
///
/// Formula: `259 * (c + 255) / (255 * (259 - c))`, exactly 1.0 at `c = 0`.
#[inline]
fn contrast_factor(contrast: Level) -> f32 {
    let c = contrast.as_f32();
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Stretch channels around mid-gray.
///
/// Formula: `output = factor * (input - 128) + 128`
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    if factor == 1.0 {
        return (r, g, b);
    }
    (
        factor * (r - 128.0) + 128.0,
        factor * (g - 128.0) + 128.0,
        factor * (b - 128.0) + 128.0,
    )
}

/// Add a uniform offset of `brightness / 100 * 255`.
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, brightness: Level) -> (f32, f32, f32) {
    if brightness.is_zero() {
        return (r, g, b);
    }
    let add = brightness.as_f32() / 100.0 * 255.0;
    (r + add, g + add, b + add)
}

/// Blend channels toward (negative) or away from (positive) BT.601 luma.
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, saturation: Level) -> (f32, f32, f32) {
    if saturation.is_zero() {
        return (r, g, b);
    }
    let lum = luma_601(r, g, b);
    let factor = (saturation.as_f32() + 100.0) / 100.0;
    (
        lum + (r - lum) * factor,
        lum + (g - lum) * factor,
        lum + (b - lum) * factor,
    )
}

/// Shift red against blue. Positive values warm the image.
#[inline]
fn apply_temperature(r: f32, g: f32, b: f32, temperature: Level) -> (f32, f32, f32) {
    if temperature.is_zero() {
        return (r, g, b);
    }
    let shift = temperature.as_f32() / 100.0 * COLOR_SHIFT;
    (r + shift, g, b - shift)
}

/// Shift the green channel.
#[inline]
fn apply_tint(r: f32, g: f32, b: f32, tint: Level) -> (f32, f32, f32) {
    if tint.is_zero() {
        return (r, g, b);
    }
    (r, g + tint.as_f32() / 100.0 * COLOR_SHIFT, b)
}

/// Lift or lower shadows and highlights, weighted by luma.
///
/// Shadows are weighted by `1 - l`, highlights by `l`, where `l` is the
/// BT.601 luma normalized and clamped to 0.0-1.0.
#[inline]
fn apply_tone(r: f32, g: f32, b: f32, shadows: Level, highlights: Level) -> (f32, f32, f32) {
    if shadows.is_zero() && highlights.is_zero() {
        return (r, g, b);
    }
    let l01 = (luma_601(r, g, b) / 255.0).clamp(0.0, 1.0);
    let add = shadows.as_f32() / 100.0 * TONE_SHIFT * (1.0 - l01)
        + highlights.as_f32() / 100.0 * TONE_SHIFT * l01;
    (r + add, g + add, b + add)
}

/// Replace all channels with BT.709 luminance.
#[inline]
fn apply_grayscale(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let gray = luminance_709(r, g, b);
    (gray, gray, gray)
}

#[inline]
fn to_channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}
