//! Edit parameter bindings.
//!
//! Every setter clamps, so JavaScript can pass raw slider values.

use modelshot_core::{AspectRatio, EditParams};
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// Edit parameters wrapper for JavaScript.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsEditParams {
    inner: EditParams,
}

#[wasm_bindgen]
impl JsEditParams {
    /// Create parameters with every axis at identity.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner.brightness.value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: i32) {
        self.inner.set_brightness(value);
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> i32 {
        self.inner.contrast.value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: i32) {
        self.inner.set_contrast(value);
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> i32 {
        self.inner.saturation.value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: i32) {
        self.inner.set_saturation(value);
    }

    #[wasm_bindgen(getter)]
    pub fn temperature(&self) -> i32 {
        self.inner.temperature.value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_temperature(&mut self, value: i32) {
        self.inner.set_temperature(value);
    }

    #[wasm_bindgen(getter)]
    pub fn tint(&self) -> i32 {
        self.inner.tint.value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_tint(&mut self, value: i32) {
        self.inner.set_tint(value);
    }

    #[wasm_bindgen(getter)]
    pub fn highlights(&self) -> i32 {
        self.inner.highlights.value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_highlights(&mut self, value: i32) {
        self.inner.set_highlights(value);
    }

    #[wasm_bindgen(getter)]
    pub fn shadows(&self) -> i32 {
        self.inner.shadows.value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_shadows(&mut self, value: i32) {
        self.inner.set_shadows(value);
    }

    #[wasm_bindgen(getter)]
    pub fn vignette(&self) -> i32 {
        self.inner.vignette.value()
    }

    #[wasm_bindgen(setter)]
    pub fn set_vignette(&mut self, value: i32) {
        self.inner.set_vignette(value);
    }

    #[wasm_bindgen(getter)]
    pub fn grayscale(&self) -> bool {
        self.inner.grayscale
    }

    #[wasm_bindgen(setter)]
    pub fn set_grayscale(&mut self, value: bool) {
        self.inner.grayscale = value;
    }

    /// Clockwise rotation in degrees (0, 90, 180 or 270).
    #[wasm_bindgen(getter)]
    pub fn rotate(&self) -> i32 {
        self.inner.rotate.degrees()
    }

    /// Set rotation, snapping to the nearest quarter turn.
    #[wasm_bindgen(setter)]
    pub fn set_rotate(&mut self, degrees: i32) {
        self.inner.set_rotate_degrees(degrees);
    }

    #[wasm_bindgen(getter)]
    pub fn flip_horizontal(&self) -> bool {
        self.inner.flip_horizontal
    }

    #[wasm_bindgen(setter)]
    pub fn set_flip_horizontal(&mut self, value: bool) {
        self.inner.flip_horizontal = value;
    }

    #[wasm_bindgen(getter)]
    pub fn flip_vertical(&self) -> bool {
        self.inner.flip_vertical
    }

    #[wasm_bindgen(setter)]
    pub fn set_flip_vertical(&mut self, value: bool) {
        self.inner.flip_vertical = value;
    }

    /// Aspect ratio label: "original", "1:1", "4:5", "3:4" or "16:9".
    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> String {
        self.inner.aspect_ratio.label().to_string()
    }

    /// Throws on an unknown label.
    pub fn set_aspect_ratio(&mut self, label: &str) -> Result<(), JsValue> {
        self.inner.aspect_ratio = label.parse::<AspectRatio>().map_err(to_js_error)?;
        Ok(())
    }

    /// Check if the parameters leave the image untouched.
    pub fn is_identity(&self) -> bool {
        self.inner.is_identity()
    }

    /// Serialize to a plain object for storage.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a plain object. Out-of-range values are clamped.
    pub fn from_json(value: JsValue) -> Result<JsEditParams, JsValue> {
        let inner: EditParams = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

impl JsEditParams {
    pub(crate) fn from_params(inner: EditParams) -> Self {
        Self { inner }
    }

    pub(crate) fn params(&self) -> &EditParams {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_clamp() {
        let mut params = JsEditParams::new();
        assert!(params.is_identity());

        params.set_brightness(500);
        assert_eq!(params.brightness(), 100);

        params.set_vignette(-10);
        assert_eq!(params.vignette(), 0);

        params.set_shadows(-250);
        assert_eq!(params.shadows(), -100);
        assert!(!params.is_identity());
    }

    #[test]
    fn test_rotation_snaps() {
        let mut params = JsEditParams::new();
        params.set_rotate(-90);
        assert_eq!(params.rotate(), 270);
        params.set_rotate(100);
        assert_eq!(params.rotate(), 90);
    }

    #[test]
    fn test_aspect_ratio_label() {
        let mut params = JsEditParams::new();
        assert_eq!(params.aspect_ratio(), "original");
        assert!(params.set_aspect_ratio("4:5").is_ok());
        assert_eq!(params.aspect_ratio(), "4:5");
        assert_eq!(params.params().aspect_ratio, AspectRatio::Portrait4x5);
    }

    #[test]
    fn test_flags() {
        let mut params = JsEditParams::from_params(EditParams::default());
        params.set_grayscale(true);
        params.set_flip_horizontal(true);
        params.set_flip_vertical(true);
        assert!(params.grayscale() && params.flip_horizontal() && params.flip_vertical());
    }
}
