//! Directional compatibility between overlapping patterns
//!
//! Pattern B may sit at offset `d` from pattern A when the pixels the two
//! blocks share at that offset are identical. Because the overlap of (A, B)
//! at `d` is the overlap of (B, A) at `-d`, only half of the directions are
//! compared pixel by pixel and the other half are filled in by mirroring.

use crate::algorithm::bitset::PatternBitset;
use crate::analysis::catalogue::PatternCatalogue;
use crate::spatial::offsets::{Direction, DirectionSet};
use crate::spatial::tiles::Pattern;

/// Read-only table of `compatible(direction, A, B)`
///
/// Stored as one bitset of admissible B per `(direction, A)` pair so that
/// propagation can union whole rows at once.
#[derive(Clone, Debug)]
pub struct CompatibilityTable {
    directions: DirectionSet,
    pattern_count: usize,
    rows: Vec<PatternBitset>,
}

impl CompatibilityTable {
    /// Compare every pattern pair in every overlap direction
    pub fn build(catalogue: &PatternCatalogue) -> Self {
        let directions = DirectionSet::for_tile_size(catalogue.tile_size());
        let pattern_count = catalogue.len();
        let mut rows = vec![PatternBitset::new(pattern_count); directions.len() * pattern_count];

        // The enumeration is point-symmetric, so the first half holds exactly
        // one direction from each opposite pair
        let half = directions.len() / 2;
        for (index, direction) in directions.iter().take(half) {
            let opposite = directions.opposite_index(index);
            for (a, pattern_a) in catalogue.patterns().iter().enumerate() {
                for (b, pattern_b) in catalogue.patterns().iter().enumerate() {
                    if !overlap_matches(pattern_a, pattern_b, direction) {
                        continue;
                    }
                    if let Some(row) = rows.get_mut(index * pattern_count + a) {
                        row.insert(b);
                    }
                    if let Some(row) = rows.get_mut(opposite * pattern_count + b) {
                        row.insert(a);
                    }
                }
            }
        }

        log::info!(
            "Built compatibility table: {pattern_count} patterns x {} directions",
            directions.len()
        );

        Self {
            directions,
            pattern_count,
            rows,
        }
    }

    /// Directions the table is indexed by
    pub const fn directions(&self) -> &DirectionSet {
        &self.directions
    }

    /// Number of patterns on each axis of the table
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Patterns allowed at offset `direction_index` from pattern `a`
    pub fn allowed(&self, direction_index: usize, a: usize) -> Option<&PatternBitset> {
        if a >= self.pattern_count {
            return None;
        }
        self.rows.get(direction_index * self.pattern_count + a)
    }

    /// Whether `b` may occupy the cell at `direction_index` from a cell holding `a`
    pub fn compatible(&self, direction_index: usize, a: usize, b: usize) -> bool {
        self.allowed(direction_index, a)
            .is_some_and(|row| row.contains(b))
    }

    /// Union of allowed neighbors over every pattern in `source`
    ///
    /// This is the set of patterns at the neighbor that still have support
    /// from at least one pattern possible at the source cell.
    pub fn supported_by(&self, direction_index: usize, source: &PatternBitset) -> PatternBitset {
        let mut supported = PatternBitset::new(self.pattern_count);
        for a in source.iter() {
            if let Some(row) = self.allowed(direction_index, a) {
                supported.union_with(row);
            }
        }
        supported
    }
}

/// Pixel comparison of the region shared by `a` and `b` placed at `direction` from `a`
pub fn overlap_matches(a: &Pattern, b: &Pattern, direction: Direction) -> bool {
    let n = a.size() as i32;
    if b.size() as i32 != n || direction.dx.abs() >= n || direction.dy.abs() >= n {
        return false;
    }
    let (dx, dy) = (direction.dx, direction.dy);

    for y in dy.max(0)..n.min(n + dy) {
        for x in dx.max(0)..n.min(n + dx) {
            let in_a = a.get(x as usize, y as usize);
            let in_b = b.get((x - dx) as usize, (y - dy) as usize);
            if in_a != in_b {
                return false;
            }
        }
    }
    true
}
