//! Superposition state of the output grid
//!
//! Every cell keeps the set of patterns it may still take together with the
//! weight sums needed to recompute its entropy in constant time. Cells that
//! lose a pattern are queued once until the propagator drains them.

use crate::algorithm::bitset::PatternBitset;
use crate::analysis::catalogue::PatternCatalogue;
use crate::math::entropy::shannon_entropy;
use crate::spatial::grid::GridDimensions;
use ndarray::Array2;
use std::collections::VecDeque;

/// Possibility set of one output position
#[derive(Clone, Debug)]
pub struct Cell {
    possible: PatternBitset,
    remaining: usize,
    weight_sum: f64,
    log_weight_sum: f64,
    queued: bool,
}

impl Cell {
    fn unrestricted(pattern_count: usize, weight_sum: f64, log_weight_sum: f64) -> Self {
        Self {
            possible: PatternBitset::all(pattern_count),
            remaining: pattern_count,
            weight_sum,
            log_weight_sum,
            queued: false,
        }
    }

    /// Patterns still possible here
    pub const fn possible(&self) -> &PatternBitset {
        &self.possible
    }

    /// Number of patterns still possible
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Sum of weights of the remaining patterns
    pub const fn weight_sum(&self) -> f64 {
        self.weight_sum
    }

    /// Sum of `w ln w` over the remaining patterns
    pub const fn log_weight_sum(&self) -> f64 {
        self.log_weight_sum
    }

    /// Exactly one pattern remains
    pub const fn is_collapsed(&self) -> bool {
        self.remaining == 1
    }

    /// No pattern remains
    pub const fn is_contradicted(&self) -> bool {
        self.remaining == 0
    }

    /// Entropy of the weight-normalised distribution over remaining patterns
    pub fn entropy(&self) -> f64 {
        shannon_entropy(self.weight_sum, self.log_weight_sum)
    }
}

/// Per-cell possibility sets plus the pending propagation queue
#[derive(Clone, Debug)]
pub struct Wave {
    dimensions: GridDimensions,
    cells: Array2<Cell>,
    queue: VecDeque<[usize; 2]>,
    weights: Vec<f64>,
    log_weights: Vec<f64>,
    collapsed_cells: usize,
}

impl Wave {
    /// Create a wave where every cell may hold every catalogue pattern
    pub fn new(dimensions: GridDimensions, catalogue: &PatternCatalogue) -> Self {
        let weights = catalogue.weights().to_vec();
        let log_weights = (0..catalogue.len())
            .map(|index| catalogue.log_weight(index))
            .collect();
        let mut wave = Self {
            dimensions,
            cells: Array2::from_elem((0, 0), Cell::unrestricted(0, 0.0, 0.0)),
            queue: VecDeque::new(),
            weights,
            log_weights,
            collapsed_cells: 0,
        };
        wave.reset();
        wave
    }

    /// Reinitialise every cell to the full catalogue and clear the queue
    pub fn reset(&mut self) {
        let pattern_count = self.weights.len();
        let weight_sum: f64 = self.weights.iter().sum();
        let log_weight_sum: f64 = self.log_weights.iter().sum();
        self.cells = Array2::from_elem(
            (self.dimensions.height, self.dimensions.width),
            Cell::unrestricted(pattern_count, weight_sum, log_weight_sum),
        );
        self.queue.clear();
        self.collapsed_cells = if pattern_count == 1 {
            self.dimensions.cell_count()
        } else {
            0
        };
    }

    /// Grid geometry
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Number of patterns in the catalogue
    pub const fn pattern_count(&self) -> usize {
        self.weights.len()
    }

    /// Cell at `position`
    pub fn cell(&self, position: [usize; 2]) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Patterns still possible at `position`
    pub fn possible(&self, position: [usize; 2]) -> Option<&PatternBitset> {
        self.cell(position).map(Cell::possible)
    }

    /// Entropy ranking key of `position`
    pub fn entropy_of(&self, position: [usize; 2]) -> f64 {
        self.cell(position).map_or(0.0, Cell::entropy)
    }

    /// Whether exactly one pattern remains at `position`
    pub fn is_collapsed(&self, position: [usize; 2]) -> bool {
        self.cell(position).is_some_and(Cell::is_collapsed)
    }

    /// Whether no pattern remains at `position`
    pub fn is_contradicted(&self, position: [usize; 2]) -> bool {
        self.cell(position).is_some_and(Cell::is_contradicted)
    }

    /// Whether every cell holds exactly one pattern
    pub const fn is_fully_collapsed(&self) -> bool {
        self.collapsed_cells == self.dimensions.cell_count()
    }

    /// Number of cells holding exactly one pattern
    pub const fn collapsed_count(&self) -> usize {
        self.collapsed_cells
    }

    /// The single pattern at `position`, if collapsed
    pub fn collapsed_pattern(&self, position: [usize; 2]) -> Option<usize> {
        self.cell(position)
            .filter(|cell| cell.is_collapsed())
            .and_then(|cell| cell.possible.iter().next())
    }

    /// Remove `pattern` from `position`
    ///
    /// Returns whether the pattern was present. Removing an absent pattern is
    /// a no-op. The cell joins the propagation queue on its first removal
    /// since it was last drained.
    pub fn eliminate(&mut self, position: [usize; 2], pattern: usize) -> bool {
        let weight = self.weights.get(pattern).copied().unwrap_or(0.0);
        let log_weight = self.log_weights.get(pattern).copied().unwrap_or(0.0);
        let Some(cell) = self.cells.get_mut(position) else {
            return false;
        };
        if !cell.possible.remove(pattern) {
            return false;
        }

        cell.remaining -= 1;
        cell.weight_sum -= weight;
        cell.log_weight_sum -= log_weight;
        match cell.remaining {
            1 => self.collapsed_cells += 1,
            0 => self.collapsed_cells = self.collapsed_cells.saturating_sub(1),
            _ => {}
        }
        if cell.remaining == 0 {
            cell.weight_sum = 0.0;
            cell.log_weight_sum = 0.0;
        }

        if !cell.queued {
            cell.queued = true;
            self.queue.push_back(position);
        }
        true
    }

    /// Eliminate every possible pattern at `position` other than `pattern`
    pub fn collapse_to(&mut self, position: [usize; 2], pattern: usize) {
        let others: Vec<usize> = self
            .possible(position)
            .map(|possible| possible.iter().filter(|&p| p != pattern).collect())
            .unwrap_or_default();
        for other in others {
            self.eliminate(position, other);
        }
    }

    /// Queue `position` for propagation even without a fresh elimination
    pub fn enqueue(&mut self, position: [usize; 2]) {
        if let Some(cell) = self.cells.get_mut(position)
            && !cell.queued
        {
            cell.queued = true;
            self.queue.push_back(position);
        }
    }

    /// Take the next queued cell, clearing its queued flag
    pub fn pop_pending(&mut self) -> Option<[usize; 2]> {
        let position = self.queue.pop_front()?;
        if let Some(cell) = self.cells.get_mut(position) {
            cell.queued = false;
        }
        Some(position)
    }

    /// Whether any cell awaits propagation
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Number of cells awaiting propagation
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Sum of remaining pattern counts over all cells
    pub fn total_possibilities(&self) -> usize {
        self.cells.iter().map(Cell::remaining).sum()
    }

    /// Iterate `(position, cell)` pairs in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ([usize; 2], &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|(position, cell)| (<[usize; 2]>::from(position), cell))
    }
}
