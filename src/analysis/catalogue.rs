//! Pattern extraction into a deduplicated, weighted catalogue
//!
//! An N×N window slides over every pixel of the exemplar, wrapping at the
//! edges, so each position contributes one raw block. Non-periodic exemplars
//! only yield windows that lie entirely inside the image. Each block, and
//! optionally its symmetry variants, is inserted into the catalogue; repeated
//! blocks increase the weight of the existing entry.

use crate::analysis::patterns::Exemplar;
use crate::io::error::Result;
use crate::math::entropy::weight_log_weight;
use crate::spatial::tiles::{Color, Pattern};
use std::collections::HashMap;

/// Controls which blocks are taken from the exemplar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Side length N of extracted patterns
    pub tile_size: usize,
    /// Wrap windows around the exemplar edges
    pub periodic_input: bool,
    /// Insert the 90°, 180° and 270° rotations of every block
    pub include_rotations: bool,
    /// Insert the mirror image of every block and rotation
    pub include_reflections: bool,
}

impl ExtractionConfig {
    /// Plain extraction without symmetry variants
    pub const fn new(tile_size: usize) -> Self {
        Self {
            tile_size,
            periodic_input: true,
            include_rotations: false,
            include_reflections: false,
        }
    }

    /// Extraction with all seven symmetry variants
    pub const fn with_symmetry(tile_size: usize) -> Self {
        Self {
            tile_size,
            periodic_input: true,
            include_rotations: true,
            include_reflections: true,
        }
    }
}

/// Immutable list of unique patterns with occurrence weights
///
/// Patterns are indexed `0..len()` in order of first appearance, which keeps
/// extraction deterministic for a given exemplar and configuration.
#[derive(Clone, Debug)]
pub struct PatternCatalogue {
    tile_size: usize,
    patterns: Vec<Pattern>,
    weights: Vec<f64>,
    log_weights: Vec<f64>,
}

impl PatternCatalogue {
    /// Extract every window of the exemplar
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the tile size is zero or exceeds either
    /// exemplar dimension.
    pub fn extract(exemplar: &Exemplar, config: ExtractionConfig) -> Result<Self> {
        exemplar.validate_tile_size(config.tile_size)?;
        let n = config.tile_size;

        let (rows, cols) = if config.periodic_input {
            (exemplar.height(), exemplar.width())
        } else {
            (exemplar.height() - n + 1, exemplar.width() - n + 1)
        };

        let mut builder = CatalogueBuilder::new(n);
        for y in 0..rows {
            for x in 0..cols {
                let block = Pattern::from_fn(n, |dx, dy| exemplar.get_wrapped(x + dx, y + dy));
                for variant in block.variants(config.include_rotations, config.include_reflections)
                {
                    builder.insert(variant);
                }
            }
        }

        let catalogue = builder.finish();
        log::info!(
            "Extracted {} unique {n}x{n} patterns from {}x{} exemplar",
            catalogue.len(),
            exemplar.width(),
            exemplar.height()
        );
        Ok(catalogue)
    }

    /// Side length N of every pattern
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of unique patterns
    pub const fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalogue is empty
    pub const fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern at `index`
    pub fn pattern(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// All patterns in index order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Occurrence weight of the pattern at `index`
    pub fn weight(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(0.0)
    }

    /// `weight * ln(weight)` of the pattern at `index`
    pub fn log_weight(&self, index: usize) -> f64 {
        self.log_weights.get(index).copied().unwrap_or(0.0)
    }

    /// All weights in index order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Output colour contributed by the pattern at `index`
    pub fn color(&self, index: usize) -> Color {
        self.pattern(index).map_or([0, 0, 0], Pattern::top_left)
    }

    /// Index of the pattern with exactly these pixels, if present
    pub fn find(&self, pattern: &Pattern) -> Option<usize> {
        self.patterns.iter().position(|candidate| candidate == pattern)
    }
}

/// Accumulates patterns and weights during extraction
struct CatalogueBuilder {
    tile_size: usize,
    index_of: HashMap<Pattern, usize>,
    patterns: Vec<Pattern>,
    counts: Vec<usize>,
}

impl CatalogueBuilder {
    fn new(tile_size: usize) -> Self {
        Self {
            tile_size,
            index_of: HashMap::new(),
            patterns: Vec::new(),
            counts: Vec::new(),
        }
    }

    fn insert(&mut self, pattern: Pattern) {
        if let Some(&index) = self.index_of.get(&pattern) {
            if let Some(count) = self.counts.get_mut(index) {
                *count += 1;
            }
            return;
        }
        let index = self.patterns.len();
        self.index_of.insert(pattern.clone(), index);
        self.patterns.push(pattern);
        self.counts.push(1);
    }

    fn finish(self) -> PatternCatalogue {
        let weights: Vec<f64> = self.counts.iter().map(|&count| count as f64).collect();
        let log_weights = weights.iter().copied().map(weight_log_weight).collect();
        PatternCatalogue {
            tile_size: self.tile_size,
            patterns: self.patterns,
            weights,
            log_weights,
        }
    }
}
