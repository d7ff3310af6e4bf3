//! Instruction text for the image generation service.
//!
//! Each combo becomes one prompt. Model shots describe the persona and the
//! setting; product-only shots (flat lay, hanger) ignore both.

use crate::sampler::Combo;

/// Appended to every prompt.
const QUALITY_CLAUSE: &str = "Use bright, even, professional lighting that shows the product's \
details. Add no text, logos or watermarks. The result must be ultra-photorealistic and ready for \
a premium online store listing.";

/// Describe a background option as a setting.
pub fn describe_background(background: &str) -> String {
    match background {
        "Studio White" => "a professional studio with a clean, plain white backdrop".to_string(),
        "Studio Gray" => "a professional studio with a plain, neutral gray backdrop".to_string(),
        "Outdoor Urban" => "a city street outdoors, with the background softly blurred".to_string(),
        "Outdoor Nature" => {
            "a natural outdoor location such as a park or forest, lit by daylight".to_string()
        }
        other => other.to_lowercase(),
    }
}

fn persona(combo: &Combo) -> String {
    format!(
        "a {} {} {} model",
        combo.age,
        combo.ethnicity,
        combo.gender.to_lowercase()
    )
}

/// Build the generation prompt for one combo.
pub fn build_prompt(combo: &Combo) -> String {
    let setting = describe_background(&combo.background);
    let model = persona(combo);
    let pose = combo.pose.to_lowercase();

    match combo.category.as_str() {
        "Standing Pose" => format!(
            "Put the product from the supplied image on {model}, shown full length in a \
             confident standing pose ({pose}). Setting: {setting}. {QUALITY_CLAUSE}"
        ),
        "Action Pose" => format!(
            "Put the product from the supplied image on {model} captured mid-movement, \
             walking or turning naturally ({pose}). Setting: {setting}. {QUALITY_CLAUSE}"
        ),
        "Detail Shot" => format!(
            "Make a close-up of the product from the supplied image worn by {model}, \
             framed on the product's texture and features ({pose}). Setting: {setting}. \
             {QUALITY_CLAUSE}"
        ),
        "Aesthetic Shot" => format!(
            "Make a cinematic editorial photograph of {model} wearing the product from the \
             supplied image, in a stylish and engaging pose ({pose}). Setting: {setting}. \
             {QUALITY_CLAUSE}"
        ),
        "Flat Lay" => format!(
            "Make a styled flat lay photograph of the product from the supplied image, laid \
             on a complementary textured surface such as wood, marble or linen with one or two \
             understated props. Soft diffused daylight, gentle shadows, balanced composition. \
             No model. {QUALITY_CLAUSE}"
        ),
        "Hanger Shot" => format!(
            "Make a high-end photograph of the product from the supplied image on a quality \
             wooden or metal hanger, against a textured wall or a minimalist boutique interior. \
             Directional lighting that brings out the shape and fabric. No model. \
             {QUALITY_CLAUSE}"
        ),
        other => format!(
            "Make a {} photograph of {model} wearing the product from the supplied image \
             ({pose}). Setting: {setting}. {QUALITY_CLAUSE}",
            other.to_lowercase()
        ),
    }
}

/// Prompt for an alternate take of an already generated image.
///
/// The service receives the product and the earlier result, and is asked to
/// keep the persona and background while changing pose or camera angle.
pub fn build_variation_prompt(combo: &Combo) -> String {
    format!(
        "Using the product image (first) and the earlier model photo (second) as reference, \
         produce a new take. Keep the same product, the same {} {} {} model and the same \
         {} background. Change the pose, expression or camera angle slightly. {QUALITY_CLAUSE}",
        combo.age,
        combo.ethnicity,
        combo.gender.to_lowercase(),
        combo.background.to_lowercase()
    )
}
