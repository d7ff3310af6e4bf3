//! Selection strategies over the cross product.
//!
//! Combos are handled by position in the cross product. Each position is
//! decoded into one value index per dimension, so usage counting and coverage
//! never compare strings.

use super::combo::{Dimension, DimensionSets};
use super::rng::SeededRng;

const DIMENSIONS: usize = Dimension::ALL.len();

/// Weight of the random perturbation added to balanced scores.
const TIE_BREAK: f64 = 0.5;

/// Per-dimension value indices of one combo.
type Coords = [usize; DIMENSIONS];

/// Value indices of every cross product position.
pub(super) struct Grid {
    sizes: Coords,
    coords: Vec<Coords>,
}

impl Grid {
    pub(super) fn new(sets: &DimensionSets) -> Self {
        let mut sizes = [0; DIMENSIONS];
        for (size, dimension) in sizes.iter_mut().zip(Dimension::ALL) {
            *size = sets.get(dimension).len();
        }

        let total: usize = sizes.iter().product();
        let coords = (0..total)
            .map(|mut position| {
                // Pose varies fastest, so peel dimensions from the back
                let mut c = [0; DIMENSIONS];
                for d in (0..DIMENSIONS).rev() {
                    c[d] = position % sizes[d];
                    position /= sizes[d];
                }
                c
            })
            .collect();

        Self { sizes, coords }
    }

    pub(super) fn len(&self) -> usize {
        self.coords.len()
    }

    /// Positions covering `(dimension, value)` in the order given.
    fn containing<'a>(
        &'a self,
        order: &'a [usize],
        used: &'a [bool],
        dimension: usize,
        value: usize,
    ) -> impl Iterator<Item = usize> + 'a {
        order
            .iter()
            .copied()
            .filter(move |&p| !used[p] && self.coords[p][dimension] == value)
    }
}

/// Tracks which values have appeared and how often.
struct Usage {
    counts: Vec<Vec<usize>>,
}

impl Usage {
    fn new(grid: &Grid) -> Self {
        Self {
            counts: grid.sizes.iter().map(|&n| vec![0; n]).collect(),
        }
    }

    fn record(&mut self, coords: &Coords) {
        for (d, &v) in coords.iter().enumerate() {
            self.counts[d][v] += 1;
        }
    }

    fn is_covered(&self, dimension: usize, value: usize) -> bool {
        self.counts[dimension][value] > 0
    }

    fn uncovered_in(&self, coords: &Coords) -> usize {
        coords
            .iter()
            .enumerate()
            .filter(|&(d, &v)| !self.is_covered(d, v))
            .count()
    }

    fn score(&self, coords: &Coords) -> usize {
        coords
            .iter()
            .enumerate()
            .map(|(d, &v)| self.counts[d][v])
            .sum()
    }
}

/// Fisher-Yates shuffle driven by the seeded generator.
pub(super) fn shuffle<T>(items: &mut [T], rng: &mut SeededRng) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// Uniform sample: shuffle, optionally seed with one combo per uncovered
/// value, then fill from the shuffled order.
pub(super) fn random(
    grid: &Grid,
    target: usize,
    coverage: bool,
    rng: &mut SeededRng,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..grid.len()).collect();
    shuffle(&mut order, rng);

    let mut used = vec![false; grid.len()];
    let mut usage = Usage::new(grid);
    let mut picked = Vec::with_capacity(target);

    if coverage {
        'cover: for d in 0..DIMENSIONS {
            for v in 0..grid.sizes[d] {
                if picked.len() >= target {
                    break 'cover;
                }
                if usage.is_covered(d, v) {
                    continue;
                }
                let first = grid.containing(&order, &used, d, v).next();
                if let Some(p) = first {
                    used[p] = true;
                    usage.record(&grid.coords[p]);
                    picked.push(p);
                }
            }
        }
    }

    for &p in &order {
        if picked.len() >= target {
            break;
        }
        if !used[p] {
            used[p] = true;
            picked.push(p);
        }
    }

    picked
}

/// Balanced sample: repeatedly take the unused combo whose values have been
/// used least, with a seeded perturbation to break ties.
///
/// The coverage pass picks at random among the combos that add the most
/// missing values, so a small target still spreads across every dimension.
pub(super) fn balanced(
    grid: &Grid,
    target: usize,
    coverage: bool,
    rng: &mut SeededRng,
) -> Vec<usize> {
    let natural: Vec<usize> = (0..grid.len()).collect();
    let mut used = vec![false; grid.len()];
    let mut usage = Usage::new(grid);
    let mut picked = Vec::with_capacity(target);

    if coverage {
        'cover: for d in 0..DIMENSIONS {
            for v in 0..grid.sizes[d] {
                if picked.len() >= target {
                    break 'cover;
                }
                if usage.is_covered(d, v) {
                    continue;
                }
                // Prefer candidates that cover the most values still missing
                let gain = |p: usize| usage.uncovered_in(&grid.coords[p]);
                let best_gain = grid.containing(&natural, &used, d, v).map(gain).max();
                let Some(best_gain) = best_gain else {
                    continue;
                };
                let candidates: Vec<usize> = grid
                    .containing(&natural, &used, d, v)
                    .filter(|&p| gain(p) == best_gain)
                    .collect();
                let p = candidates[rng.index(candidates.len())];
                used[p] = true;
                usage.record(&grid.coords[p]);
                picked.push(p);
            }
        }
    }

    while picked.len() < target {
        let mut best: Option<(usize, f64)> = None;
        for p in (0..grid.len()).filter(|&p| !used[p]) {
            let score = usage.score(&grid.coords[p]) as f64 + TIE_BREAK * rng.next_f64();
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((p, score));
            }
        }
        let Some((p, _)) = best else {
            break;
        };
        used[p] = true;
        usage.record(&grid.coords[p]);
        picked.push(p);
    }

    picked
}
