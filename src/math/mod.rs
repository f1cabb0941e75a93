//! Mathematical utilities for the algorithm

/// Weighted Shannon entropy used to rank cells
pub mod entropy;
