//! Observation heuristics: which cell to collapse and to what
//!
//! The cell is the undecided one with the lowest entropy. Ties are broken
//! uniformly at random by default; a first-in-row-major-order variant is
//! available for callers that want a fixed scan order, at the cost of a
//! bias towards the top-left of the grid.

use crate::algorithm::wave::Wave;
use crate::io::configuration::ENTROPY_TIE_TOLERANCE;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// How to choose among cells sharing the minimum entropy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Uniformly at random among all tied cells
    #[default]
    Random,
    /// The first tied cell in row-major order
    FirstInOrder,
}

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generic weighted random selection
    ///
    /// Returns index into weights array using cumulative distribution
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        // Rounding can leave a sliver past the last bucket
        weights
            .iter()
            .rposition(|&weight| weight > 0.0)
            .unwrap_or(0)
    }

    /// Uniform index in `0..len`; zero for an empty range
    pub fn uniform_index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.rng.random_range(0..len)
        }
    }
}

/// Undecided cell with the lowest entropy
///
/// Returns `None` when every cell is collapsed or contradicted.
pub fn select_min_entropy_cell(
    wave: &Wave,
    selector: &mut RandomSelector,
    tie_break: TieBreak,
) -> Option<[usize; 2]> {
    let mut minimum = f64::INFINITY;
    let mut tied: Vec<[usize; 2]> = Vec::new();

    for (position, cell) in wave.cells() {
        if cell.remaining() <= 1 {
            continue;
        }
        let entropy = cell.entropy();
        if entropy < minimum - ENTROPY_TIE_TOLERANCE {
            minimum = entropy;
            tied.clear();
            tied.push(position);
        } else if entropy <= minimum + ENTROPY_TIE_TOLERANCE {
            tied.push(position);
        }
    }

    match tie_break {
        TieBreak::FirstInOrder => tied.first().copied(),
        TieBreak::Random => tied.get(selector.uniform_index(tied.len())).copied(),
    }
}

/// Draw one possible pattern at `position` with probability proportional to weight
pub fn choose_pattern(
    wave: &Wave,
    weights: &[f64],
    position: [usize; 2],
    selector: &mut RandomSelector,
) -> Option<usize> {
    let candidates = wave.possible(position)?.to_vec();
    let candidate_weights: Vec<f64> = candidates
        .iter()
        .map(|&pattern| weights.get(pattern).copied().unwrap_or(0.0))
        .collect();
    let chosen = selector.weighted_choice(&candidate_weights);
    candidates.get(chosen).copied()
}
