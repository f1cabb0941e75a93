//! Arc-consistency propagation over the compatibility table
//!
//! Draining the wave queue removes, from every neighbor of a changed cell,
//! the patterns no longer supported by anything the changed cell can still
//! hold. Each removal queues the neighbor in turn, so the loop stops once no
//! cell changes. Every iteration either removes a possibility or empties the
//! queue, which bounds the work by the total possibility count.

use crate::algorithm::wave::Wave;
use crate::analysis::compatibility::CompatibilityTable;

/// Result of draining the propagation queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// Fixed point reached with every cell non-empty
    Stable {
        /// Patterns removed while draining
        eliminations: usize,
    },
    /// A cell lost its last pattern; the attempt is void
    Contradiction {
        /// Position of the emptied cell
        cell: [usize; 2],
    },
}

impl PropagationOutcome {
    /// Whether propagation ended in a contradiction
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

/// Enforces the compatibility table across a wave
pub struct Propagator<'a> {
    table: &'a CompatibilityTable,
}

impl<'a> Propagator<'a> {
    /// Create a propagator over `table`
    pub const fn new(table: &'a CompatibilityTable) -> Self {
        Self { table }
    }

    /// Drain the wave's queue to a fixed point
    ///
    /// Stops at the first emptied cell; the wave is then left partially
    /// propagated and must be reset before reuse.
    pub fn propagate(&self, wave: &mut Wave) -> PropagationOutcome {
        let dimensions = wave.dimensions();
        let mut eliminations = 0;

        while let Some(position) = wave.pop_pending() {
            let Some(source) = wave.possible(position).cloned() else {
                continue;
            };
            if source.is_empty() {
                return PropagationOutcome::Contradiction { cell: position };
            }

            for (index, direction) in self.table.directions().iter() {
                let Some(neighbor) = dimensions.neighbor(position, direction) else {
                    continue;
                };
                let supported = self.table.supported_by(index, &source);
                let unsupported = wave
                    .possible(neighbor)
                    .map(|possible| possible.difference(&supported))
                    .unwrap_or_default();

                for pattern in unsupported {
                    if wave.eliminate(neighbor, pattern) {
                        eliminations += 1;
                    }
                }
                if wave.is_contradicted(neighbor) {
                    return PropagationOutcome::Contradiction { cell: neighbor };
                }
            }
        }

        PropagationOutcome::Stable { eliminations }
    }
}

/// First possibility that lacks support from some in-bounds neighbor
///
/// Returns the cell and pattern of the violation, or `None` when the wave is
/// arc-consistent with respect to `table`.
pub fn find_unsupported(wave: &Wave, table: &CompatibilityTable) -> Option<([usize; 2], usize)> {
    let dimensions = wave.dimensions();
    for (position, cell) in wave.cells() {
        for (index, direction) in table.directions().iter() {
            let Some(neighbor) = dimensions.neighbor(position, direction) else {
                continue;
            };
            let Some(neighbor_possible) = wave.possible(neighbor) else {
                continue;
            };
            for pattern in cell.possible().iter() {
                let supported = table
                    .allowed(index, pattern)
                    .is_some_and(|allowed| allowed.intersects(neighbor_possible));
                if !supported {
                    return Some((position, pattern));
                }
            }
        }
    }
    None
}
