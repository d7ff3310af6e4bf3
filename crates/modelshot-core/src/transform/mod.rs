//! Geometric operations on the working canvas: orientation and cropping.
//!
//! # Transform Order
//!
//! Every render starts again from the decoded source:
//! 1. Orientation (flips, then clockwise quarter turn) builds the working canvas
//! 2. Pixel adjustments and vignette run on the working canvas
//! 3. Export crops the working canvas (crop overlay or aspect-ratio framing)
//!
//! # Coordinate System
//!
//! - Rotation is clockwise in quarter turns
//! - Crop regions are integer pixel rectangles on the working canvas
//! - Origin is top-left corner

mod crop;
mod orient;

pub use crop::{centered_region, crop_region, PixelRegion};
pub use orient::{orient, oriented_dimensions};
