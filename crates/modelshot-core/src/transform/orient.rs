//! Quarter-turn rotation and mirroring.
//!
//! Equivalent to drawing the source onto a canvas that has been translated to
//! its center, rotated clockwise, then scaled by -1 on the flipped axes: the
//! flips act in source space and the rotation is applied afterwards. Every
//! source pixel lands on exactly one canvas pixel, so no resampling happens.
//!
//! For a `w x h` source pixel `(x, y)` (after flipping):
//! ```text
//!  90°: (h - 1 - y, x)
//! 180°: (w - 1 - x, h - 1 - y)
//! 270°: (y, w - 1 - x)
//! ```

use crate::raster::{buffer_len, RasterImage, CHANNELS};
use crate::QuarterTurn;

/// Canvas dimensions after applying `turn` to a `width x height` image.
pub fn oriented_dimensions(width: u32, height: u32, turn: QuarterTurn) -> (u32, u32) {
    if turn.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Build the working canvas for a rotation and flip combination.
///
/// Always allocates a new image; the source is left untouched.
pub fn orient(
    image: &RasterImage,
    turn: QuarterTurn,
    flip_horizontal: bool,
    flip_vertical: bool,
) -> RasterImage {
    if turn == QuarterTurn::None && !flip_horizontal && !flip_vertical {
        return image.clone();
    }

    let (w, h) = (image.width, image.height);
    let (out_w, out_h) = oriented_dimensions(w, h, turn);
    let mut output = vec![0u8; buffer_len(out_w, out_h)];

    for y in 0..h {
        let fy = if flip_vertical { h - 1 - y } else { y };
        for x in 0..w {
            let fx = if flip_horizontal { w - 1 - x } else { x };
            let (dx, dy) = match turn {
                QuarterTurn::None => (fx, fy),
                QuarterTurn::Cw90 => (h - 1 - fy, fx),
                QuarterTurn::Cw180 => (w - 1 - fx, h - 1 - fy),
                QuarterTurn::Cw270 => (fy, w - 1 - fx),
            };

            let src = image.index(x, y);
            let dst = (dy as usize * out_w as usize + dx as usize) * CHANNELS;
            output[dst..dst + CHANNELS].copy_from_slice(&image.pixels[src..src + CHANNELS]);
        }
    }

    RasterImage {
        width: out_w,
        height: out_h,
        pixels: output,
    }
}
