//! Expanding sampled combos into generation requests.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credits::CREDITS_PER_IMAGE;
use crate::prompt::{build_prompt, build_variation_prompt};
use crate::sampler::{Combo, Dimension, DimensionSets, SeededRng};

/// How each sampled combo is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchOptions {
    /// Requests per combo. Zero is treated as one.
    pub variations: usize,
    /// Dimensions re-drawn for every variation after the first.
    pub vary: Vec<Dimension>,
    /// Re-draw every persona dimension from the full catalog.
    pub surprise_me: bool,
    pub seed: i64,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            variations: 1,
            vary: Vec::new(),
            surprise_me: false,
            seed: 1,
        }
    }
}

/// One image to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub combo: Combo,
    /// 0 for the sampled combo itself, then 1, 2, ...
    pub variation: usize,
    pub prompt: String,
}

/// Ordered generation requests for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPlan {
    pub requests: Vec<GenerationRequest>,
}

impl BatchPlan {
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Credits needed to generate every request.
    pub fn credits_required(&self) -> u64 {
        self.requests.len() as u64 * CREDITS_PER_IMAGE
    }
}

/// Expand `combos` into `options.variations` requests each.
///
/// Variation 0 keeps the sampled combo. Later variations re-draw each
/// dimension in `options.vary` from `sets`, or every persona dimension from
/// the catalog when `surprise_me` is set. A variation that ends up identical to
/// its source combo is asked for as an alternate take.
pub fn plan_batch(combos: &[Combo], sets: &DimensionSets, options: &BatchOptions) -> BatchPlan {
    let catalog;
    let (pool, vary): (&DimensionSets, &[Dimension]) = if options.surprise_me {
        catalog = DimensionSets::catalog();
        (&catalog, &Dimension::PERSONA)
    } else {
        (sets, &options.vary)
    };

    let variations = options.variations.max(1);
    let mut rng = SeededRng::new(options.seed);
    let mut requests = Vec::with_capacity(combos.len() * variations);

    for combo in combos {
        requests.push(GenerationRequest {
            combo: combo.clone(),
            variation: 0,
            prompt: build_prompt(combo),
        });

        for variation in 1..variations {
            let mut varied = combo.clone();
            for &dimension in vary {
                if let Some(value) = pool.get(dimension).choose(&mut rng) {
                    varied.set(dimension, value.as_str());
                }
            }
            let prompt = if &varied == combo {
                build_variation_prompt(&varied)
            } else {
                build_prompt(&varied)
            };
            requests.push(GenerationRequest {
                combo: varied,
                variation,
                prompt,
            });
        }
    }

    debug!(
        combos = combos.len(),
        variations,
        requests = requests.len(),
        surprise_me = options.surprise_me,
        "planned batch"
    );
    BatchPlan { requests }
}
