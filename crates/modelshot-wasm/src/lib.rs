//! Modelshot WASM - WebAssembly bindings for Modelshot
//!
//! This crate exposes the modelshot-core editor, sampler and credit cache to
//! the browser UI.
//!
//! # Module Structure
//!
//! - `editor` - Editing session: parameters, history, crop overlay, export
//! - `params` - Edit parameter wrapper with clamping setters
//! - `types` - RGBA image wrapper
//! - `sampler` - Combo sampling, batch planning and prompts
//! - `credits` - Cached credit balance in `localStorage`
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageEditor } from '@modelshot/wasm';
//!
//! await init();
//!
//! const editor = new JsImageEditor();
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! editor.rotate_clockwise();
//! const png = editor.export_png();
//! ```

use std::fmt::Display;

use wasm_bindgen::prelude::*;

mod credits;
mod editor;
mod logging;
mod params;
mod sampler;
mod types;

pub use credits::JsCreditCache;
pub use editor::JsImageEditor;
pub use params::JsEditParams;
pub use sampler::{
    build_prompt, catalog, category_has_model, credits_for_images, plan_batch, sample_combos,
};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init_logging();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Decode a PNG or JPEG file into an RGBA image.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    modelshot_core::codec::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Encode an image as PNG.
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    modelshot_core::codec::encode_png(image.raster()).map_err(to_js_error)
}

/// Encode an image as JPEG (alpha dropped, quality clamped to 1-100).
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRasterImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    modelshot_core::codec::encode_jpeg(image.raster(), quality).map_err(to_js_error)
}

pub(crate) fn to_js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
