//! Selectable values offered for each sampling dimension.

use crate::sampler::Dimension;

pub const GENDERS: &[&str] = &["Female", "Male"];

pub const AGES: &[&str] = &[
    "Young Adult (18-25)",
    "Adult (25-40)",
    "Teenager (13-17)",
    "Child (3-7)",
];

pub const ETHNICITIES: &[&str] = &[
    "Asian",
    "Black",
    "Caucasian",
    "Hispanic",
    "Indian",
    "Middle Eastern",
];

pub const BACKGROUNDS: &[&str] = &[
    "Studio White",
    "Studio Gray",
    "Outdoor Urban",
    "Outdoor Nature",
];

pub const POSES: &[&str] = &["Standing", "Walking", "Seated", "Half-body", "Close-up"];

/// Shot categories. The last two are product-only shots without a model.
pub const CATEGORIES: &[&str] = &[
    "Standing Pose",
    "Action Pose",
    "Detail Shot",
    "Aesthetic Shot",
    "Flat Lay",
    "Hanger Shot",
];

/// Categories rendered without a model.
pub const PRODUCT_ONLY_CATEGORIES: &[&str] = &["Flat Lay", "Hanger Shot"];

/// Every offered value for `dimension`.
pub fn values(dimension: Dimension) -> &'static [&'static str] {
    match dimension {
        Dimension::Category => CATEGORIES,
        Dimension::Gender => GENDERS,
        Dimension::Age => AGES,
        Dimension::Ethnicity => ETHNICITIES,
        Dimension::Background => BACKGROUNDS,
        Dimension::Pose => POSES,
    }
}

/// Whether `value` is one of the offered values for `dimension`.
pub fn contains(dimension: Dimension, value: &str) -> bool {
    values(dimension).contains(&value)
}

/// Whether a shot category places the product on a model.
pub fn has_model(category: &str) -> bool {
    !PRODUCT_ONLY_CATEGORIES.contains(&category)
}
