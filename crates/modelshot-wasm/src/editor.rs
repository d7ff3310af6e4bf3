//! Editing session bindings.
//!
//! Timestamps are milliseconds, used only to debounce history entries. They
//! are optional on every call and default to `Date.now()`.

use modelshot_core::codec::{self, DEFAULT_JPEG_QUALITY};
use modelshot_core::{AspectRatio, CropHandle, DragTarget, EditorConfig, ImageEditor};
use wasm_bindgen::prelude::*;

use crate::params::JsEditParams;
use crate::to_js_error;
use crate::types::JsRasterImage;

fn to_ms(now_ms: Option<f64>) -> u64 {
    let now_ms = now_ms.unwrap_or_else(js_sys::Date::now);
    if now_ms.is_finite() {
        now_ms.max(0.0) as u64
    } else {
        0
    }
}

fn target_name(target: DragTarget) -> &'static str {
    match target {
        DragTarget::Body => "body",
        DragTarget::Handle(CropHandle::TopLeft) => "top-left",
        DragTarget::Handle(CropHandle::TopRight) => "top-right",
        DragTarget::Handle(CropHandle::BottomLeft) => "bottom-left",
        DragTarget::Handle(CropHandle::BottomRight) => "bottom-right",
    }
}

/// Image editor session for JavaScript.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsImageEditor {
    inner: ImageEditor,
}

#[wasm_bindgen]
impl JsImageEditor {
    /// Create a session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a config object
    /// (`{ historyDebounceMs, minCropSize, handleRadius }`, all optional).
    pub fn with_config(config: JsValue) -> Result<JsImageEditor, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
        Ok(Self {
            inner: ImageEditor::new(config),
        })
    }

    /// Start a session on an already decoded image.
    pub fn load_image(&mut self, image: &JsRasterImage, now_ms: Option<f64>) {
        self.inner.load_source(image.raster().clone(), to_ms(now_ms));
    }

    /// Decode a PNG or JPEG upload and start a session on it.
    pub fn load_bytes(&mut self, bytes: &[u8], now_ms: Option<f64>) -> Result<(), JsValue> {
        let image = codec::decode_image(bytes).map_err(to_js_error)?;
        self.inner.load_source(image, to_ms(now_ms));
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    /// Copy of the current parameters.
    pub fn params(&self) -> JsEditParams {
        JsEditParams::from_params(self.inner.params().clone())
    }

    /// Replace the parameters (slider change). The history entry is debounced.
    pub fn set_params(&mut self, params: &JsEditParams, now_ms: Option<f64>) -> bool {
        let next = params.params().clone();
        self.inner.update(to_ms(now_ms), |p| *p = next)
    }

    /// Record the current parameters regardless of the debounce window.
    pub fn commit(&mut self, now_ms: Option<f64>) -> bool {
        self.inner.commit(to_ms(now_ms))
    }

    pub fn rotate_clockwise(&mut self, now_ms: Option<f64>) -> bool {
        self.inner.rotate_clockwise(to_ms(now_ms))
    }

    pub fn toggle_flip_horizontal(&mut self, now_ms: Option<f64>) -> bool {
        self.inner.toggle_flip_horizontal(to_ms(now_ms))
    }

    pub fn toggle_flip_vertical(&mut self, now_ms: Option<f64>) -> bool {
        self.inner.toggle_flip_vertical(to_ms(now_ms))
    }

    /// Set the aspect ratio by label ("original", "1:1", "4:5", "3:4", "16:9").
    pub fn set_aspect_ratio(&mut self, label: &str, now_ms: Option<f64>) -> Result<bool, JsValue> {
        let ratio = label.parse::<AspectRatio>().map_err(to_js_error)?;
        Ok(self.inner.set_aspect_ratio(ratio, to_ms(now_ms)))
    }

    pub fn reset(&mut self, now_ms: Option<f64>) -> bool {
        self.inner.reset(to_ms(now_ms))
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    pub fn enable_crop(&mut self) -> bool {
        self.inner.enable_crop()
    }

    pub fn disable_crop(&mut self) {
        self.inner.disable_crop();
    }

    /// Crop rectangle as `[x, y, width, height]` in canvas pixels, if shown.
    pub fn crop_rect(&self) -> Option<Vec<f64>> {
        self.inner.crop_overlay().map(|overlay| {
            let rect = overlay.rect();
            vec![rect.x, rect.y, rect.width, rect.height]
        })
    }

    /// Name of the crop part under the pointer ("top-left", ..., "body").
    pub fn crop_hit_test(&self, x: f64, y: f64) -> Option<String> {
        let target = self.inner.crop_overlay()?.hit_test((x, y))?;
        Some(target_name(target).to_string())
    }

    /// Start dragging whatever is under the pointer. Returns false on a miss.
    pub fn crop_pointer_down(&mut self, x: f64, y: f64) -> bool {
        let Some(overlay) = self.inner.crop_overlay_mut() else {
            return false;
        };
        match overlay.hit_test((x, y)) {
            Some(target) => {
                overlay.begin_drag(target, (x, y));
                true
            }
            None => false,
        }
    }

    /// Continue a drag. Returns true if the rectangle changed.
    pub fn crop_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner
            .crop_overlay_mut()
            .is_some_and(|overlay| overlay.drag_to((x, y)))
    }

    pub fn crop_pointer_up(&mut self) {
        if let Some(overlay) = self.inner.crop_overlay_mut() {
            overlay.end_drag();
        }
    }

    /// Full working canvas with the current parameters, for preview.
    pub fn render(&self) -> Option<JsRasterImage> {
        self.inner.render().map(JsRasterImage::from_raster)
    }

    /// Final cropped output.
    pub fn apply(&self) -> Option<JsRasterImage> {
        self.inner.apply().map(JsRasterImage::from_raster)
    }

    /// Final output encoded as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        let image = self
            .inner
            .apply()
            .ok_or_else(|| JsValue::from_str("No image loaded"))?;
        codec::encode_png(&image).map_err(to_js_error)
    }

    /// Final output encoded as JPEG. `quality` defaults to 90.
    pub fn export_jpeg(&self, quality: Option<u8>) -> Result<Vec<u8>, JsValue> {
        let image = self
            .inner
            .apply()
            .ok_or_else(|| JsValue::from_str("No image loaded"))?;
        codec::encode_jpeg(&image, quality.unwrap_or(DEFAULT_JPEG_QUALITY)).map_err(to_js_error)
    }
}
