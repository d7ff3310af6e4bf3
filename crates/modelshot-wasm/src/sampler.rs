//! Combo sampling and batch planning bindings.
//!
//! Inputs and outputs are plain objects converted with `serde-wasm-bindgen`:
//!
//! ```typescript
//! const sets = { categories: ['Standing Pose'], genders: ['Female', 'Male'], ... };
//! const combos = sample_combos(sets, { target: 12, mode: 'balanced', seed: 42 });
//! const plan = plan_batch(combos, sets, { variations: 2, vary: ['pose'] });
//! ```

use modelshot_core::batch::{self, BatchOptions};
use modelshot_core::prompt;
use modelshot_core::sampler::{self, Combo, DimensionSets, SamplerConfig};
use wasm_bindgen::prelude::*;

use crate::to_js_error;

fn parse_sets(sets: JsValue) -> Result<DimensionSets, JsValue> {
    let sets: DimensionSets = serde_wasm_bindgen::from_value(sets).map_err(to_js_error)?;
    Ok(sets.normalized())
}

/// Pick combos from the cross product of the selected values.
#[wasm_bindgen]
pub fn sample_combos(sets: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let sets = parse_sets(sets)?;
    let config: SamplerConfig = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
    let combos = sampler::sample_combos(&sets, &config);
    serde_wasm_bindgen::to_value(&combos).map_err(to_js_error)
}

/// Expand sampled combos into generation requests with prompts.
#[wasm_bindgen]
pub fn plan_batch(combos: JsValue, sets: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let combos: Vec<Combo> = serde_wasm_bindgen::from_value(combos).map_err(to_js_error)?;
    let sets = parse_sets(sets)?;
    let options: BatchOptions = serde_wasm_bindgen::from_value(options).map_err(to_js_error)?;
    let plan = batch::plan_batch(&combos, &sets, &options);
    serde_wasm_bindgen::to_value(&plan).map_err(to_js_error)
}

/// Credits needed for a number of images.
#[wasm_bindgen]
pub fn credits_for_images(images: u32) -> f64 {
    (images as u64 * modelshot_core::credits::CREDITS_PER_IMAGE) as f64
}

/// Every selectable value, shaped like the `sets` argument of `sample_combos`.
#[wasm_bindgen]
pub fn catalog() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&DimensionSets::catalog()).map_err(to_js_error)
}

/// Whether a shot category puts the product on a model.
#[wasm_bindgen]
pub fn category_has_model(category: &str) -> bool {
    modelshot_core::catalog::has_model(category)
}

/// Generation prompt for a single combo.
#[wasm_bindgen]
pub fn build_prompt(combo: JsValue) -> Result<String, JsValue> {
    let combo: Combo = serde_wasm_bindgen::from_value(combo).map_err(to_js_error)?;
    Ok(prompt::build_prompt(&combo))
}
