//! Interactive crop overlay.
//!
//! The overlay is UI state on top of the working canvas: a rectangle with four
//! corner handles and a draggable body. Nothing is cropped until export, where
//! [`CropOverlay::region`] selects the pixels to keep.
//!
//! Every drag leaves the rectangle inside the canvas and at least
//! `min_size x min_size` (capped to the canvas when the canvas is smaller).
//! With a locked aspect ratio, resizing derives the height from the width. A
//! ratio that cannot fit the canvas at the minimum size is not enforced, and
//! the overlay behaves as unlocked until the canvas grows.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::transform::PixelRegion;

/// Slack for floating point comparisons on pixel coordinates.
const EPSILON: f64 = 1e-6;

/// Crop rectangle in working-canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Position of a corner handle.
    pub fn corner(&self, handle: CropHandle) -> (f64, f64) {
        let x = if handle.is_left() { self.x } else { self.right() };
        let y = if handle.is_top() { self.y } else { self.bottom() };
        (x, y)
    }

    pub fn contains(&self, (px, py): (f64, f64)) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// One of the four corner handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CropHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CropHandle {
    pub const ALL: [CropHandle; 4] = [
        CropHandle::TopLeft,
        CropHandle::TopRight,
        CropHandle::BottomLeft,
        CropHandle::BottomRight,
    ];

    /// The diagonally opposite handle, which stays fixed during a resize.
    pub fn opposite(self) -> Self {
        match self {
            CropHandle::TopLeft => CropHandle::BottomRight,
            CropHandle::TopRight => CropHandle::BottomLeft,
            CropHandle::BottomLeft => CropHandle::TopRight,
            CropHandle::BottomRight => CropHandle::TopLeft,
        }
    }

    pub fn is_left(self) -> bool {
        matches!(self, CropHandle::TopLeft | CropHandle::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, CropHandle::TopLeft | CropHandle::TopRight)
    }
}

/// What a pointer drag manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragTarget {
    /// Resize from a corner, keeping the opposite corner fixed.
    Handle(CropHandle),
    /// Move the whole rectangle.
    Body,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    target: DragTarget,
    start_pointer: (f64, f64),
    start_rect: CropRect,
}

/// Crop selection state for one working canvas.
#[derive(Debug, Clone)]
pub struct CropOverlay {
    canvas_width: f64,
    canvas_height: f64,
    min_size: f64,
    ratio: Option<f64>,
    handle_radius: f64,
    rect: CropRect,
    drag: Option<DragState>,
}

impl CropOverlay {
    /// Default hit radius around a corner handle, in canvas pixels.
    pub const DEFAULT_HANDLE_RADIUS: f64 = 12.0;

    /// Create an overlay covering the largest rectangle allowed by `ratio`.
    ///
    /// Without a ratio the overlay starts at the full canvas.
    pub fn new(canvas_width: u32, canvas_height: u32, min_size: u32, ratio: Option<f64>) -> Self {
        let mut overlay = Self {
            canvas_width: canvas_width as f64,
            canvas_height: canvas_height as f64,
            min_size: min_size as f64,
            ratio: ratio.filter(|r| r.is_finite() && *r > 0.0),
            handle_radius: Self::DEFAULT_HANDLE_RADIUS,
            rect: CropRect::new(0.0, 0.0, canvas_width as f64, canvas_height as f64),
            drag: None,
        };
        overlay.rect = overlay.initial_rect();
        overlay
    }

    /// Set the hit radius used by [`CropOverlay::hit_test`].
    pub fn with_handle_radius(mut self, radius: f64) -> Self {
        self.handle_radius = radius.max(0.0);
        self
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    /// Locked width/height ratio, if any.
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width as u32, self.canvas_height as u32)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Smallest allowed width, capped to the canvas.
    pub fn min_width(&self) -> f64 {
        self.min_size.min(self.canvas_width)
    }

    /// Smallest allowed height, capped to the canvas.
    pub fn min_height(&self) -> f64 {
        self.min_size.min(self.canvas_height)
    }

    /// Lock to a new ratio (or unlock with `None`).
    ///
    /// Locking re-fits the rectangle to the largest centered one of that
    /// ratio; unlocking keeps the current rectangle.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) {
        self.ratio = ratio.filter(|r| r.is_finite() && *r > 0.0);
        self.drag = None;
        if self.ratio.is_some() {
            self.rect = self.initial_rect();
        }
    }

    /// Reset the overlay for a new canvas size (rotation swaps dimensions).
    pub fn resize_canvas(&mut self, canvas_width: u32, canvas_height: u32) {
        self.canvas_width = canvas_width as f64;
        self.canvas_height = canvas_height as f64;
        self.drag = None;
        self.rect = self.initial_rect();
    }

    /// Replace the rectangle, clamping it to the canvas, minimum size and ratio.
    pub fn set_rect(&mut self, rect: CropRect) {
        let (width, height) = match self.locked_ratio() {
            Some(ratio) => {
                match self.fit_locked(rect.width, self.canvas_width, self.canvas_height, ratio) {
                    Some(size) => size,
                    None => {
                        self.rect = self.initial_rect();
                        return;
                    }
                }
            }
            None => (
                clamp_span(rect.width, self.min_width(), self.canvas_width),
                clamp_span(rect.height, self.min_height(), self.canvas_height),
            ),
        };
        self.rect = CropRect::new(
            clamp_span(rect.x, 0.0, self.canvas_width - width),
            clamp_span(rect.y, 0.0, self.canvas_height - height),
            width,
            height,
        );
    }

    /// Find what a pointer at `point` would grab.
    ///
    /// Corner handles win over the body so small rectangles stay resizable.
    pub fn hit_test(&self, point: (f64, f64)) -> Option<DragTarget> {
        let radius_sq = self.handle_radius * self.handle_radius;
        CropHandle::ALL
            .into_iter()
            .find(|&handle| {
                let (cx, cy) = self.rect.corner(handle);
                let (dx, dy) = (point.0 - cx, point.1 - cy);
                dx * dx + dy * dy <= radius_sq
            })
            .map(DragTarget::Handle)
            .or_else(|| self.rect.contains(point).then_some(DragTarget::Body))
    }

    /// Start dragging `target` from the pointer position `point`.
    pub fn begin_drag(&mut self, target: DragTarget, point: (f64, f64)) {
        self.drag = Some(DragState {
            target,
            start_pointer: point,
            start_rect: self.rect,
        });
    }

    /// Continue the active drag with the pointer at `point`.
    ///
    /// Returns true if the rectangle changed. A resize that cannot satisfy the
    /// locked ratio within the canvas leaves the rectangle as it was.
    pub fn drag_to(&mut self, point: (f64, f64)) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };

        let next = match drag.target {
            DragTarget::Body => Some(self.translated(drag, point)),
            DragTarget::Handle(handle) => self.resized(drag, handle, point),
        };

        match next {
            Some(rect) if rect != self.rect => {
                trace!(x = rect.x, y = rect.y, w = rect.width, h = rect.height, "crop drag");
                self.rect = rect;
                true
            }
            _ => false,
        }
    }

    /// Finish the active drag.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Integer pixel region for export.
    pub fn region(&self) -> PixelRegion {
        let (width, height) = self.canvas_size();
        PixelRegion::new(
            self.rect.x.round() as u32,
            self.rect.y.round() as u32,
            self.rect.width.round() as u32,
            self.rect.height.round() as u32,
        )
        .clamped_to(width, height)
    }

    fn translated(&self, drag: DragState, (px, py): (f64, f64)) -> CropRect {
        let start = drag.start_rect;
        let dx = px - drag.start_pointer.0;
        let dy = py - drag.start_pointer.1;
        CropRect::new(
            clamp_span(start.x + dx, 0.0, self.canvas_width - start.width),
            clamp_span(start.y + dy, 0.0, self.canvas_height - start.height),
            start.width,
            start.height,
        )
    }

    fn resized(
        &self,
        drag: DragState,
        handle: CropHandle,
        (px, py): (f64, f64),
    ) -> Option<CropRect> {
        let (ax, ay) = drag.start_rect.corner(handle.opposite());
        let grows_right = !handle.is_left();
        let grows_down = !handle.is_top();

        let raw_width = if grows_right { px - ax } else { ax - px };
        let raw_height = if grows_down { py - ay } else { ay - py };
        let max_width = if grows_right { self.canvas_width - ax } else { ax };
        let max_height = if grows_down { self.canvas_height - ay } else { ay };

        let (width, height) = match self.locked_ratio() {
            Some(ratio) => self.fit_locked(raw_width, max_width, max_height, ratio)?,
            None => (
                clamp_span(raw_width, self.min_width(), max_width),
                clamp_span(raw_height, self.min_height(), max_height),
            ),
        };

        let x = if grows_right { ax } else { ax - width };
        let y = if grows_down { ay } else { ay - height };
        Some(CropRect::new(x.max(0.0), y.max(0.0), width, height))
    }

    /// The ratio to enforce, if the canvas can hold it at the minimum size.
    fn locked_ratio(&self) -> Option<f64> {
        self.ratio.filter(|&ratio| {
            self.fit_locked(0.0, self.canvas_width, self.canvas_height, ratio).is_some()
        })
    }

    /// Width and height for a locked ratio, or `None` if no size fits.
    fn fit_locked(
        &self,
        desired_width: f64,
        max_width: f64,
        max_height: f64,
        ratio: f64,
    ) -> Option<(f64, f64)> {
        let lower = self.min_width().max(self.min_height() * ratio);
        let upper = max_width.min(max_height * ratio);
        if lower > upper + EPSILON {
            return None;
        }
        let width = desired_width.max(lower).min(upper);
        Some((width, width / ratio))
    }

    fn initial_rect(&self) -> CropRect {
        let (cw, ch) = (self.canvas_width, self.canvas_height);
        let (width, height) = match self.locked_ratio() {
            Some(ratio) if cw / ch > ratio => (ch * ratio, ch),
            Some(ratio) => (cw, cw / ratio),
            None => (cw, ch),
        };
        CropRect::new((cw - width) / 2.0, (ch - height) / 2.0, width, height)
    }
}

/// Clamp into `[min, max]` without panicking when the range is inverted.
#[inline]
fn clamp_span(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect(rect: CropRect, x: f64, y: f64, w: f64, h: f64) {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(
            close(rect.x, x) && close(rect.y, y) && close(rect.width, w) && close(rect.height, h),
            "expected ({x}, {y}, {w}, {h}), got {rect:?}"
        );
    }

    #[test]
    fn test_unlocked_starts_full_canvas() {
        let overlay = CropOverlay::new(200, 100, 20, None);
        assert_rect(overlay.rect(), 0.0, 0.0, 200.0, 100.0);
    }

    #[test]
    fn test_locked_starts_centered() {
        let overlay = CropOverlay::new(200, 100, 20, Some(1.0));
        assert_rect(overlay.rect(), 50.0, 0.0, 100.0, 100.0);
    }

    #[test]
    fn test_hit_test() {
        let overlay = CropOverlay::new(200, 100, 20, None);
        assert_eq!(
            overlay.hit_test((3.0, 4.0)),
            Some(DragTarget::Handle(CropHandle::TopLeft))
        );
        assert_eq!(
            overlay.hit_test((195.0, 98.0)),
            Some(DragTarget::Handle(CropHandle::BottomRight))
        );
        assert_eq!(overlay.hit_test((100.0, 50.0)), Some(DragTarget::Body));
        assert_eq!(overlay.hit_test((250.0, 50.0)), None);
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut overlay = CropOverlay::new(100, 100, 20, None);
        assert!(!overlay.drag_to((10.0, 10.0)));
    }

    #[test]
    fn test_corner_resize_keeps_opposite_corner() {
        let mut overlay = CropOverlay::new(100, 100, 20, None);
        overlay.begin_drag(DragTarget::Handle(CropHandle::TopLeft), (0.0, 0.0));
        assert!(overlay.drag_to((30.0, 40.0)));
        assert_rect(overlay.rect(), 30.0, 40.0, 70.0, 60.0);
        overlay.end_drag();
        assert!(!overlay.is_dragging());
    }

    #[test]
    fn test_resize_clamped_to_canvas() {
        let mut overlay = CropOverlay::new(100, 100, 20, None);
        overlay.set_rect(CropRect::new(10.0, 10.0, 50.0, 50.0));
        overlay.begin_drag(DragTarget::Handle(CropHandle::BottomRight), (60.0, 60.0));
        overlay.drag_to((500.0, 500.0));
        assert_rect(overlay.rect(), 10.0, 10.0, 90.0, 90.0);
    }

    #[test]
    fn test_resize_clamped_to_minimum() {
        let mut overlay = CropOverlay::new(100, 100, 20, None);
        overlay.begin_drag(DragTarget::Handle(CropHandle::TopLeft), (0.0, 0.0));
        // Past the fixed bottom-right corner
        overlay.drag_to((150.0, 150.0));
        assert_rect(overlay.rect(), 80.0, 80.0, 20.0, 20.0);
    }

    #[test]
    fn test_locked_resize_derives_height() {
        let mut overlay = CropOverlay::new(400, 400, 20, Some(4.0 / 5.0));
        let start = overlay.rect();
        assert_rect(start, 40.0, 0.0, 320.0, 400.0);

        overlay.begin_drag(DragTarget::Handle(CropHandle::BottomRight), (360.0, 400.0));
        overlay.drag_to((200.0, 390.0));
        let rect = overlay.rect();
        assert_rect(rect, 40.0, 0.0, 160.0, 200.0);
        assert!((rect.width / rect.height - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_locked_resize_limited_by_height() {
        let mut overlay = CropOverlay::new(400, 200, 20, Some(1.0));
        overlay.set_rect(CropRect::new(0.0, 0.0, 100.0, 100.0));
        overlay.begin_drag(DragTarget::Handle(CropHandle::BottomRight), (100.0, 100.0));
        overlay.drag_to((390.0, 120.0));
        // Width wants 390 but height caps at 200
        assert_rect(overlay.rect(), 0.0, 0.0, 200.0, 200.0);
    }

    #[test]
    fn test_unfittable_ratio_is_not_enforced() {
        // 16:9 needs a width of at least 35.6 for a 20px height, wider than the canvas.
        let mut overlay = CropOverlay::new(30, 30, 20, Some(16.0 / 9.0));
        assert_eq!(overlay.ratio(), Some(16.0 / 9.0));
        assert_rect(overlay.rect(), 0.0, 0.0, 30.0, 30.0);

        overlay.begin_drag(DragTarget::Handle(CropHandle::BottomRight), (30.0, 30.0));
        assert!(overlay.drag_to((10.0, 25.0)));
        assert_rect(overlay.rect(), 0.0, 0.0, 20.0, 25.0);
        overlay.end_drag();

        // The lock applies again once the canvas can hold it
        overlay.resize_canvas(160, 90);
        assert_rect(overlay.rect(), 0.0, 0.0, 160.0, 90.0);
        overlay.set_aspect_ratio(Some(1.0));
        assert_rect(overlay.rect(), 35.0, 0.0, 90.0, 90.0);
    }

    #[test]
    fn test_small_canvas_keeps_minimum_at_start() {
        let overlay = CropOverlay::new(30, 30, 20, Some(16.0 / 9.0));
        let rect = overlay.rect();
        assert!(rect.width >= overlay.min_width() && rect.height >= overlay.min_height());
    }

    #[test]
    fn test_body_drag_translates_and_clamps() {
        let mut overlay = CropOverlay::new(100, 100, 20, None);
        overlay.set_rect(CropRect::new(10.0, 10.0, 40.0, 30.0));
        overlay.begin_drag(DragTarget::Body, (20.0, 20.0));
        overlay.drag_to((35.0, 25.0));
        assert_rect(overlay.rect(), 25.0, 15.0, 40.0, 30.0);

        overlay.drag_to((-500.0, 500.0));
        assert_rect(overlay.rect(), 0.0, 70.0, 40.0, 30.0);
    }

    #[test]
    fn test_set_rect_clamps() {
        let mut overlay = CropOverlay::new(100, 80, 20, None);
        overlay.set_rect(CropRect::new(-10.0, 70.0, 5.0, 500.0));
        assert_rect(overlay.rect(), 0.0, 0.0, 20.0, 80.0);
    }

    #[test]
    fn test_set_aspect_ratio_refits() {
        let mut overlay = CropOverlay::new(160, 90, 20, None);
        overlay.set_aspect_ratio(Some(1.0));
        assert_rect(overlay.rect(), 35.0, 0.0, 90.0, 90.0);

        overlay.set_aspect_ratio(None);
        assert_rect(overlay.rect(), 35.0, 0.0, 90.0, 90.0);
    }

    #[test]
    fn test_resize_canvas_resets() {
        let mut overlay = CropOverlay::new(200, 100, 20, None);
        overlay.set_rect(CropRect::new(10.0, 10.0, 30.0, 30.0));
        overlay.resize_canvas(100, 200);
        assert_rect(overlay.rect(), 0.0, 0.0, 100.0, 200.0);
    }

    #[test]
    fn test_small_canvas_caps_minimum() {
        let mut overlay = CropOverlay::new(10, 50, 20, None);
        overlay.begin_drag(DragTarget::Handle(CropHandle::BottomRight), (10.0, 50.0));
        overlay.drag_to((0.0, 0.0));
        assert_rect(overlay.rect(), 0.0, 0.0, 10.0, 20.0);
    }

    #[test]
    fn test_region_rounds() {
        let mut overlay = CropOverlay::new(100, 100, 20, None);
        overlay.set_rect(CropRect::new(10.4, 20.6, 30.5, 40.2));
        assert_eq!(overlay.region(), PixelRegion::new(10, 21, 31, 40));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
