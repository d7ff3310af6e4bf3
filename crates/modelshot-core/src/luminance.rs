//! Luminance weightings used by the pixel pipeline.
//!
//! Two weightings are in play: BT.601 drives saturation and the
//! shadows/highlights mask, BT.709 produces grayscale output. Both operate on
//! channel values in the 0-255 scale.

/// ITU-R BT.601 coefficient for the red channel.
pub const BT601_R: f32 = 0.299;
/// ITU-R BT.601 coefficient for the green channel.
pub const BT601_G: f32 = 0.587;
/// ITU-R BT.601 coefficient for the blue channel.
pub const BT601_B: f32 = 0.114;

/// ITU-R BT.709 coefficient for the red channel.
pub const BT709_R: f32 = 0.2126;
/// ITU-R BT.709 coefficient for the green channel.
pub const BT709_G: f32 = 0.7152;
/// ITU-R BT.709 coefficient for the blue channel.
pub const BT709_B: f32 = 0.0722;

/// BT.601 luma of an RGB triple.
#[inline]
pub fn luma_601(r: f32, g: f32, b: f32) -> f32 {
    BT601_R * r + BT601_G * g + BT601_B * b
}

/// BT.709 luminance of an RGB triple.
#[inline]
pub fn luminance_709(r: f32, g: f32, b: f32) -> f32 {
    BT709_R * r + BT709_G * g + BT709_B * b
}
