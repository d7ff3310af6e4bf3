//! Seeded combinatorial sampling for batch previews.
//!
//! Given a value set per [`Dimension`], the sampler picks a subset of the full
//! cross product. Output depends only on the inputs: the same sets and
//! [`SamplerConfig`] always yield the same sequence.
//!
//! # Example
//!
//! ```
//! use modelshot_core::{sample_combos, Dimension, DimensionSets, SamplerConfig};
//!
//! let sets = DimensionSets::new()
//!     .with(Dimension::Category, ["Standing Pose"])
//!     .with(Dimension::Gender, ["Female", "Male"])
//!     .with(Dimension::Age, ["Adult (25-40)"])
//!     .with(Dimension::Ethnicity, ["Asian", "Black"])
//!     .with(Dimension::Background, ["Studio White"])
//!     .with(Dimension::Pose, ["Standing"]);
//!
//! let config = SamplerConfig { target: 2, seed: 42, ..Default::default() };
//! assert_eq!(sample_combos(&sets, &config).len(), 2);
//! ```

mod combo;
mod rng;
mod select;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use combo::{Combo, Dimension, DimensionSets};
pub use rng::SeededRng;

/// How combos are chosen once the cross product exceeds the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SamplingMode {
    /// Minimize repeated use of any single value.
    #[default]
    Balanced,
    /// Uniform sample of a seeded shuffle.
    Random,
}

/// Sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SamplerConfig {
    /// Number of combos wanted.
    pub target: usize,
    pub mode: SamplingMode,
    /// Include every selected value at least once when the target allows.
    pub ensure_coverage: bool,
    pub seed: i64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            target: 1,
            mode: SamplingMode::Balanced,
            ensure_coverage: true,
            seed: 1,
        }
    }
}

/// Pick up to `config.target` combos from the cross product of `sets`.
///
/// Returns an empty list when any dimension is empty or the target is zero,
/// and the full cross product in enumeration order when it already fits
/// within the target.
pub fn sample_combos(sets: &DimensionSets, config: &SamplerConfig) -> Vec<Combo> {
    let mut all = sets.cross_product();
    if all.is_empty() || config.target == 0 {
        return Vec::new();
    }
    if all.len() <= config.target {
        debug!(total = all.len(), target = config.target, "sampling skipped");
        return all;
    }

    let grid = select::Grid::new(sets);
    let mut rng = SeededRng::new(config.seed);
    let mut picked = match config.mode {
        SamplingMode::Random => {
            select::random(&grid, config.target, config.ensure_coverage, &mut rng)
        }
        SamplingMode::Balanced => {
            select::balanced(&grid, config.target, config.ensure_coverage, &mut rng)
        }
    };
    picked.truncate(config.target);

    debug!(
        total = all.len(),
        target = config.target,
        mode = ?config.mode,
        coverage = config.ensure_coverage,
        seed = config.seed,
        "sampled combos"
    );

    let mut slots: Vec<Option<Combo>> = all.drain(..).map(Some).collect();
    picked
        .into_iter()
        .filter_map(|p| slots.get_mut(p).and_then(Option::take))
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
