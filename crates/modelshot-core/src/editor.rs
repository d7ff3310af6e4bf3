//! Editing session over one decoded source image.
//!
//! The session is non-destructive: the source is never modified, and every
//! render recomputes the output from the source and the current
//! [`EditParams`]. Parameter changes are recorded in a [`History`] so they can
//! be undone and redone.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adjustments::{apply_pixel_adjustments, apply_vignette};
use crate::history::{History, DEFAULT_DEBOUNCE_MS};
use crate::overlay::CropOverlay;
use crate::raster::RasterImage;
use crate::transform::{centered_region, crop_region, orient, oriented_dimensions, PixelRegion};
use crate::{AspectRatio, EditParams};

/// Tunables for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Minimum gap between debounced history entries.
    pub history_debounce_ms: u64,
    /// Smallest crop width and height, in canvas pixels.
    pub min_crop_size: u32,
    /// Hit radius around crop corner handles, in canvas pixels.
    pub handle_radius: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_crop_size: 20,
            handle_radius: CropOverlay::DEFAULT_HANDLE_RADIUS,
        }
    }
}

/// A single editing session.
#[derive(Debug, Clone)]
pub struct ImageEditor {
    config: EditorConfig,
    source: Option<RasterImage>,
    params: EditParams,
    history: History<EditParams>,
    crop: Option<CropOverlay>,
}

impl Default for ImageEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl ImageEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            source: None,
            params: EditParams::default(),
            history: History::new(config.history_debounce_ms),
            crop: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the source image and start a fresh session.
    ///
    /// Parameters reset to identity, the crop overlay is dropped and the
    /// history restarts with the identity snapshot as its baseline.
    pub fn load_source(&mut self, image: RasterImage, now_ms: u64) {
        debug!(width = image.width, height = image.height, "editor source loaded");
        self.source = Some(image);
        self.params = EditParams::default();
        self.crop = None;
        self.history.clear();
        self.history.commit(self.params.clone(), now_ms);
    }

    /// Whether a source image has been loaded.
    pub fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&RasterImage> {
        self.source.as_ref()
    }

    pub fn params(&self) -> &EditParams {
        &self.params
    }

    pub fn history(&self) -> &History<EditParams> {
        &self.history
    }

    /// Dimensions of the working canvas (the source after rotation).
    pub fn canvas_size(&self) -> Option<(u32, u32)> {
        let source = self.source.as_ref()?;
        Some(oriented_dimensions(source.width, source.height, self.params.rotate))
    }

    /// Change parameters and record a debounced history entry.
    ///
    /// Returns true if a history entry was appended.
    pub fn update<F>(&mut self, now_ms: u64, edit: F) -> bool
    where
        F: FnOnce(&mut EditParams),
    {
        edit(&mut self.params);
        self.sync_crop();
        self.history.record(self.params.clone(), now_ms)
    }

    /// Record the current parameters, ignoring the debounce window.
    ///
    /// Call at the end of an interaction such as a slider release so the final
    /// value is never lost to debouncing.
    pub fn commit(&mut self, now_ms: u64) -> bool {
        self.history.commit(self.params.clone(), now_ms)
    }

    /// Rotate a further 90° clockwise.
    pub fn rotate_clockwise(&mut self, now_ms: u64) -> bool {
        self.apply_discrete(now_ms, |p| p.rotate = p.rotate.clockwise())
    }

    pub fn toggle_flip_horizontal(&mut self, now_ms: u64) -> bool {
        self.apply_discrete(now_ms, |p| p.flip_horizontal = !p.flip_horizontal)
    }

    pub fn toggle_flip_vertical(&mut self, now_ms: u64) -> bool {
        self.apply_discrete(now_ms, |p| p.flip_vertical = !p.flip_vertical)
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio, now_ms: u64) -> bool {
        self.apply_discrete(now_ms, |p| p.aspect_ratio = aspect_ratio)
    }

    /// Return every parameter to identity.
    pub fn reset(&mut self, now_ms: u64) -> bool {
        self.apply_discrete(now_ms, |p| *p = EditParams::default())
    }

    // Clicks are discrete actions, so they skip the debounce.
    fn apply_discrete<F>(&mut self, now_ms: u64, edit: F) -> bool
    where
        F: FnOnce(&mut EditParams),
    {
        edit(&mut self.params);
        self.sync_crop();
        self.history.commit(self.params.clone(), now_ms)
    }

    /// Step back in history and re-apply that snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        debug!(cursor = ?self.history.cursor(), "editor undo");
        self.params = snapshot;
        self.sync_crop();
        true
    }

    /// Step forward in history and re-apply that snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        debug!(cursor = ?self.history.cursor(), "editor redo");
        self.params = snapshot;
        self.sync_crop();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Show the crop overlay on the working canvas.
    ///
    /// The overlay starts at the largest rectangle matching the current
    /// aspect ratio. Returns false until a source is loaded.
    pub fn enable_crop(&mut self) -> bool {
        let Some((width, height)) = self.canvas_size() else {
            return false;
        };
        let overlay = CropOverlay::new(
            width,
            height,
            self.config.min_crop_size,
            self.params.aspect_ratio.ratio(),
        )
        .with_handle_radius(self.config.handle_radius);
        self.crop = Some(overlay);
        true
    }

    pub fn disable_crop(&mut self) {
        self.crop = None;
    }

    pub fn crop_overlay(&self) -> Option<&CropOverlay> {
        self.crop.as_ref()
    }

    pub fn crop_overlay_mut(&mut self) -> Option<&mut CropOverlay> {
        self.crop.as_mut()
    }

    /// Keep the overlay on the current canvas and ratio after a parameter change.
    fn sync_crop(&mut self) {
        let Some((width, height)) = self.canvas_size() else {
            return;
        };
        let ratio = self.params.aspect_ratio.ratio();
        if let Some(overlay) = self.crop.as_mut() {
            if overlay.ratio() != ratio {
                overlay.set_aspect_ratio(ratio);
            }
            if overlay.canvas_size() != (width, height) {
                overlay.resize_canvas(width, height);
            }
        }
    }

    /// Render the full working canvas with the current parameters.
    ///
    /// Returns `None` until a source is loaded.
    pub fn render(&self) -> Option<RasterImage> {
        let source = self.source.as_ref()?;
        let params = &self.params;

        let mut output = orient(
            source,
            params.rotate,
            params.flip_horizontal,
            params.flip_vertical,
        );
        apply_pixel_adjustments(&mut output.pixels, params);
        apply_vignette(&mut output, params.vignette);

        debug!(
            width = output.width,
            height = output.height,
            rotate = params.rotate.degrees(),
            "editor render"
        );
        Some(output)
    }

    /// Region of the working canvas that export keeps.
    ///
    /// The crop overlay wins when shown, then a non-original aspect ratio
    /// (largest centered region), then the full canvas.
    pub fn export_region(&self) -> Option<PixelRegion> {
        let (width, height) = self.canvas_size()?;
        let region = match (&self.crop, self.params.aspect_ratio.ratio()) {
            (Some(overlay), _) => overlay.region(),
            (None, Some(ratio)) => centered_region(width, height, ratio),
            (None, None) => PixelRegion::full(width, height),
        };
        Some(region)
    }

    /// Produce the final exported image.
    ///
    /// Returns `None` until a source is loaded. The session is left untouched,
    /// so editing can continue after an export.
    pub fn apply(&self) -> Option<RasterImage> {
        let region = self.export_region()?;
        let rendered = self.render()?;
        let output = crop_region(&rendered, region);
        debug!(
            x = region.x,
            y = region.y,
            width = output.width,
            height = output.height,
            "editor export"
        );
        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{CropHandle, DragTarget};
    use crate::QuarterTurn;

    /// Create a test image with a distinct value per pixel.
    fn gradient(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 128, 255]);
            }
        }
        RasterImage::new(width, height, pixels).unwrap()
    }

    fn loaded(width: u32, height: u32) -> ImageEditor {
        let mut editor = ImageEditor::default();
        editor.load_source(gradient(width, height), 0);
        editor
    }

    #[test]
    fn test_not_ready_is_noop() {
        let mut editor = ImageEditor::default();
        assert!(!editor.is_ready());
        assert_eq!(editor.render(), None);
        assert_eq!(editor.apply(), None);
        assert!(!editor.enable_crop());
    }

    #[test]
    fn test_identity_reproduces_source() {
        let editor = loaded(8, 6);
        let output = editor.apply().unwrap();
        assert_eq!(&output, editor.source().unwrap());
    }

    #[test]
    fn test_load_records_baseline() {
        let editor = loaded(4, 4);
        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.history().current(), Some(&EditParams::default()));
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_update_clamps() {
        let mut editor = loaded(4, 4);
        editor.update(1000, |p| {
            p.set_brightness(500);
            p.set_vignette(-10);
        });
        assert_eq!(editor.params().brightness.value(), 100);
        assert_eq!(editor.params().vignette.value(), 0);
    }

    #[test]
    fn test_spaced_updates_undo_redo() {
        let mut editor = loaded(4, 4);
        for i in 1..=3 {
            assert!(editor.update(i * 400, |p| p.set_contrast(i as i32 * 10)));
        }
        assert_eq!(editor.history().len(), 4);

        assert!(editor.undo());
        assert_eq!(editor.params().contrast.value(), 20);
        assert!(editor.undo());
        assert!(editor.undo());
        assert_eq!(editor.params(), &EditParams::default());
        assert!(!editor.undo());

        assert!(editor.redo());
        assert_eq!(editor.params().contrast.value(), 10);
    }

    #[test]
    fn test_slider_drag_then_commit() {
        let mut editor = loaded(4, 4);
        assert!(editor.update(1000, |p| p.set_saturation(10)));
        assert!(!editor.update(1050, |p| p.set_saturation(20)));
        assert!(!editor.update(1100, |p| p.set_saturation(30)));
        assert!(editor.commit(1120));

        assert_eq!(editor.history().len(), 3);
        editor.undo();
        assert_eq!(editor.params().saturation.value(), 10);
    }

    #[test]
    fn test_rotate_swaps_canvas() {
        let mut editor = loaded(6, 4);
        editor.rotate_clockwise(0);
        assert_eq!(editor.params().rotate, QuarterTurn::Cw90);
        assert_eq!(editor.canvas_size(), Some((4, 6)));

        let output = editor.render().unwrap();
        assert_eq!((output.width, output.height), (4, 6));
        // Bottom-left source pixel lands top-left
        assert_eq!(output.pixel(0, 0), editor.source().unwrap().pixel(0, 3));
    }

    #[test]
    fn test_aspect_ratio_export_is_centered() {
        let mut editor = loaded(20, 10);
        editor.set_aspect_ratio(AspectRatio::Square, 0);
        let output = editor.apply().unwrap();
        assert_eq!((output.width, output.height), (10, 10));
        assert_eq!(output.pixel(0, 0), editor.source().unwrap().pixel(5, 0));
    }

    #[test]
    fn test_crop_overlay_export() {
        let mut editor = loaded(100, 100);
        assert!(editor.enable_crop());
        let overlay = editor.crop_overlay_mut().unwrap();
        overlay.begin_drag(DragTarget::Handle(CropHandle::TopLeft), (0.0, 0.0));
        overlay.drag_to((30.0, 40.0));
        overlay.end_drag();

        let output = editor.apply().unwrap();
        assert_eq!((output.width, output.height), (70, 60));
        assert_eq!(output.pixel(0, 0), editor.source().unwrap().pixel(30, 40));
    }

    #[test]
    fn test_crop_follows_rotation_and_ratio() {
        let mut editor = loaded(200, 100);
        editor.enable_crop();
        assert_eq!(editor.crop_overlay().unwrap().canvas_size(), (200, 100));

        editor.rotate_clockwise(0);
        assert_eq!(editor.crop_overlay().unwrap().canvas_size(), (100, 200));

        editor.set_aspect_ratio(AspectRatio::Square, 0);
        let rect = editor.crop_overlay().unwrap().rect();
        assert_eq!((rect.width, rect.height), (100.0, 100.0));

        editor.undo();
        editor.undo();
        assert_eq!(editor.crop_overlay().unwrap().canvas_size(), (200, 100));
    }

    #[test]
    fn test_apply_does_not_mutate_source() {
        let mut editor = loaded(5, 5);
        let before = editor.source().unwrap().clone();
        editor.update(0, |p| {
            p.set_brightness(60);
            p.grayscale = true;
            p.set_vignette(80);
        });
        editor.toggle_flip_horizontal(10);
        let first = editor.apply().unwrap();
        let second = editor.apply().unwrap();
        assert_eq!(editor.source().unwrap(), &before);
        assert_eq!(first, second);
        assert_ne!(first, before);
    }

    #[test]
    fn test_reset_returns_to_identity() {
        let mut editor = loaded(4, 4);
        editor.update(500, |p| p.set_tint(40));
        editor.toggle_flip_vertical(600);
        assert!(editor.reset(700));
        assert!(editor.params().is_identity());
        assert!(editor.can_undo());
    }

    #[test]
    fn test_load_source_clears_session() {
        let mut editor = loaded(4, 4);
        editor.update(500, |p| p.set_shadows(40));
        editor.enable_crop();
        editor.load_source(gradient(3, 3), 1000);
        assert_eq!(editor.params(), &EditParams::default());
        assert!(editor.crop_overlay().is_none());
        assert_eq!(editor.history().len(), 1);
    }
}
