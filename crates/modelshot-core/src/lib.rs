//! Modelshot Core - image editing and combo sampling library
//!
//! This crate provides the core functionality behind Modelshot's product photo
//! workflow: the non-destructive raster editor (pixel adjustments, quarter-turn
//! transforms, crop overlay, undo/redo history) and the seeded combinatorial
//! sampler used to plan batch preview generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod adjustments;
pub mod batch;
pub mod catalog;
pub mod codec;
pub mod credits;
pub mod editor;
pub mod history;
pub mod luminance;
pub mod overlay;
pub mod prompt;
pub mod raster;
pub mod sampler;
pub mod transform;

pub use batch::{plan_batch, BatchOptions, BatchPlan, GenerationRequest};
pub use codec::{decode_image, encode_jpeg, encode_png, CodecError};
pub use credits::{ConsumeOutcome, CreditCache, CreditPack, CreditStore, MemoryStore};
pub use editor::{EditorConfig, ImageEditor};
pub use history::History;
pub use overlay::{CropHandle, CropOverlay, CropRect, DragTarget};
pub use raster::{ImageError, RasterImage};
pub use sampler::{
    sample_combos, Combo, Dimension, DimensionSets, SamplerConfig, SamplingMode, SeededRng,
};
pub use transform::{centered_region, crop_region, orient, PixelRegion};

/// Error returned when parsing a named option fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The aspect ratio label is not one of the supported presets.
    #[error("Unknown aspect ratio: {0}")]
    UnknownAspectRatio(String),

    /// The dimension name is not one of the sampling dimensions.
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),
}

/// A signed slider value clamped to -100..=100, where 0 is the identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Level(i32);

impl Level {
    /// Minimum slider value.
    pub const MIN: i32 = -100;
    /// Maximum slider value.
    pub const MAX: i32 = 100;
    /// The identity value.
    pub const ZERO: Level = Level(0);

    /// Create a level, clamping the value into range.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Raw slider value.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Whether this level leaves pixels unchanged.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Slider value as a float for pixel math.
    #[inline]
    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// An unsigned effect strength clamped to 0..=100, where 0 disables the effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Strength(i32);

impl Strength {
    /// Maximum strength.
    pub const MAX: i32 = 100;
    /// No effect.
    pub const NONE: Strength = Strength(0);

    /// Create a strength, clamping the value into range.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(0, Self::MAX))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Strength as a fraction in 0.0..=1.0.
    #[inline]
    pub fn as_fraction(self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl From<i32> for Strength {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<Strength> for i32 {
    fn from(strength: Strength) -> Self {
        strength.0
    }
}

/// Clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum QuarterTurn {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl QuarterTurn {
    /// Normalize any angle in degrees to the nearest quarter turn.
    ///
    /// Negative angles wrap, so -90 becomes 270.
    pub fn from_degrees(degrees: i32) -> Self {
        let normalized = degrees.rem_euclid(360);
        match ((normalized + 45) / 90) % 4 {
            0 => QuarterTurn::None,
            1 => QuarterTurn::Cw90,
            2 => QuarterTurn::Cw180,
            _ => QuarterTurn::Cw270,
        }
    }

    /// Rotation angle in degrees (0, 90, 180 or 270).
    pub fn degrees(self) -> i32 {
        match self {
            QuarterTurn::None => 0,
            QuarterTurn::Cw90 => 90,
            QuarterTurn::Cw180 => 180,
            QuarterTurn::Cw270 => 270,
        }
    }

    /// The next quarter turn clockwise, wrapping 270 back to 0.
    pub fn clockwise(self) -> Self {
        Self::from_degrees(self.degrees() + 90)
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, QuarterTurn::Cw90 | QuarterTurn::Cw270)
    }
}

impl From<i32> for QuarterTurn {
    fn from(degrees: i32) -> Self {
        Self::from_degrees(degrees)
    }
}

impl From<QuarterTurn> for i32 {
    fn from(turn: QuarterTurn) -> Self {
        turn.degrees()
    }
}

/// Output aspect ratio presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Keep the canvas proportions.
    #[default]
    #[serde(rename = "original")]
    Original,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Portrait4x5,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "16:9")]
    Wide16x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Original,
        AspectRatio::Square,
        AspectRatio::Portrait4x5,
        AspectRatio::Portrait3x4,
        AspectRatio::Wide16x9,
    ];

    /// Width divided by height, or `None` for [`AspectRatio::Original`].
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectRatio::Original => None,
            AspectRatio::Square => Some(1.0),
            AspectRatio::Portrait4x5 => Some(4.0 / 5.0),
            AspectRatio::Portrait3x4 => Some(3.0 / 4.0),
            AspectRatio::Wide16x9 => Some(16.0 / 9.0),
        }
    }

    /// Label used by the UI and in serialized parameters.
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Original => "original",
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait4x5 => "4:5",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Wide16x9 => "16:9",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AspectRatio {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::UnknownAspectRatio(s.to_string()))
    }
}

/// Editor parameters, one independent value per axis.
///
/// Numeric fields use [`Level`] and [`Strength`], so every stored value is
/// already clamped to its declared range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditParams {
    pub brightness: Level,
    pub contrast: Level,
    pub saturation: Level,
    pub grayscale: bool,
    pub rotate: QuarterTurn,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// Warms (positive) or cools (negative) by shifting red against blue.
    pub temperature: Level,
    /// Shifts the green channel.
    pub tint: Level,
    pub highlights: Level,
    pub shadows: Level,
    /// Edge darkening strength.
    pub vignette: Strength,
    pub aspect_ratio: AspectRatio,
}

impl EditParams {
    /// Create parameters with every axis at its identity value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the parameters leave the image untouched.
    ///
    /// The aspect ratio only affects export framing and is ignored here.
    pub fn is_identity(&self) -> bool {
        !self.has_pixel_adjustments()
            && self.vignette.is_zero()
            && self.rotate == QuarterTurn::None
            && !self.flip_horizontal
            && !self.flip_vertical
    }

    /// Check if the per-pixel pipeline has any work to do.
    pub fn has_pixel_adjustments(&self) -> bool {
        !(self.brightness.is_zero()
            && self.contrast.is_zero()
            && self.saturation.is_zero()
            && self.temperature.is_zero()
            && self.tint.is_zero()
            && self.highlights.is_zero()
            && self.shadows.is_zero()
            && !self.grayscale)
    }

    pub fn set_brightness(&mut self, value: i32) {
        self.brightness = Level::new(value);
    }

    pub fn set_contrast(&mut self, value: i32) {
        self.contrast = Level::new(value);
    }

    pub fn set_saturation(&mut self, value: i32) {
        self.saturation = Level::new(value);
    }

    pub fn set_temperature(&mut self, value: i32) {
        self.temperature = Level::new(value);
    }

    pub fn set_tint(&mut self, value: i32) {
        self.tint = Level::new(value);
    }

    pub fn set_highlights(&mut self, value: i32) {
        self.highlights = Level::new(value);
    }

    pub fn set_shadows(&mut self, value: i32) {
        self.shadows = Level::new(value);
    }

    pub fn set_vignette(&mut self, value: i32) {
        self.vignette = Strength::new(value);
    }

    /// Set rotation from degrees, snapping to the nearest quarter turn.
    pub fn set_rotate_degrees(&mut self, degrees: i32) {
        self.rotate = QuarterTurn::from_degrees(degrees);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_params_default_is_identity() {
        let params = EditParams::new();
        assert!(params.is_identity());
        assert!(!params.has_pixel_adjustments());
    }

    #[test]
    fn test_edit_params_not_identity() {
        let mut params = EditParams::new();
        params.set_brightness(10);
        assert!(!params.is_identity());

        let mut params = EditParams::new();
        params.flip_vertical = true;
        assert!(!params.is_identity());
        assert!(!params.has_pixel_adjustments());
    }

    #[test]
    fn test_aspect_ratio_ignored_by_identity() {
        let mut params = EditParams::new();
        params.aspect_ratio = AspectRatio::Square;
        assert!(params.is_identity());
    }

    #[test]
    fn test_level_clamps() {
        assert_eq!(Level::new(500), Level::new(100));
        assert_eq!(Level::new(-500).value(), -100);
        assert_eq!(Level::new(42).value(), 42);
    }

    #[test]
    fn test_strength_clamps() {
        assert_eq!(Strength::new(-10), Strength::NONE);
        assert_eq!(Strength::new(250).value(), 100);
    }

    #[test]
    fn test_setters_clamp() {
        let mut params = EditParams::new();
        params.set_brightness(500);
        params.set_vignette(-10);
        assert_eq!(params.brightness.value(), 100);
        assert_eq!(params.vignette.value(), 0);
    }

    #[test]
    fn test_quarter_turn_from_degrees() {
        assert_eq!(QuarterTurn::from_degrees(0), QuarterTurn::None);
        assert_eq!(QuarterTurn::from_degrees(90), QuarterTurn::Cw90);
        assert_eq!(QuarterTurn::from_degrees(450), QuarterTurn::Cw90);
        assert_eq!(QuarterTurn::from_degrees(-90), QuarterTurn::Cw270);
        assert_eq!(QuarterTurn::from_degrees(100), QuarterTurn::Cw90);
        assert_eq!(QuarterTurn::from_degrees(359), QuarterTurn::None);
    }

    #[test]
    fn test_quarter_turn_clockwise_wraps() {
        let mut turn = QuarterTurn::None;
        for expected in [90, 180, 270, 0] {
            turn = turn.clockwise();
            assert_eq!(turn.degrees(), expected);
        }
    }

    #[test]
    fn test_aspect_ratio_parse() {
        assert_eq!("4:5".parse::<AspectRatio>(), Ok(AspectRatio::Portrait4x5));
        assert_eq!("Original".parse::<AspectRatio>(), Ok(AspectRatio::Original));
        assert!(matches!(
            "2:1".parse::<AspectRatio>(),
            Err(ParseError::UnknownAspectRatio(_))
        ));
    }

    #[test]
    fn test_params_deserialize_clamps() {
        let json = r#"{"brightness": 500, "vignette": -10, "rotate": -90, "aspectRatio": "16:9"}"#;
        let params: EditParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.brightness.value(), 100);
        assert_eq!(params.vignette.value(), 0);
        assert_eq!(params.rotate, QuarterTurn::Cw270);
        assert_eq!(params.aspect_ratio, AspectRatio::Wide16x9);
        assert!(params.contrast.is_zero());
    }

    #[test]
    fn test_params_serialize_camel_case() {
        let mut params = EditParams::new();
        params.flip_horizontal = true;
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["flipHorizontal"], true);
        assert_eq!(value["aspectRatio"], "original");
        assert_eq!(value["rotate"], 0);
    }
}
