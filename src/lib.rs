//! Overlapping wave function collapse for exemplar-based image synthesis
//!
//! Every N×N block of a small exemplar becomes a weighted pattern. An output
//! grid starts with every pattern possible in every cell; the solver
//! repeatedly collapses the lowest-entropy cell and propagates overlap
//! constraints to its neighbours until every cell holds one pattern, restarting
//! from scratch whenever a cell runs out of candidates.

#![forbid(unsafe_code)]

/// Wave state, propagation, cell selection and the solve loop
pub mod algorithm;
/// Exemplar loading, pattern extraction and compatibility
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Entropy helpers
pub mod math;
/// Grid geometry, neighbour offsets and pattern pixels
pub mod spatial;

pub use io::error::{Result, SynthesisError};
