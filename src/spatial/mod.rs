//! Spatial data structures for patterns and the output grid
//!
//! This module contains spatial-related functionality including:
//! - Pattern storage and symmetry transforms
//! - Overlap directions between neighboring patterns
//! - Output grid geometry and neighbor lookup

/// Output grid geometry and neighbor resolution
pub mod grid;
/// Overlap directions between patterns
pub mod offsets;
/// Pixel patterns and symmetry transforms
pub mod tiles;

pub use grid::GridDimensions;
pub use offsets::{Direction, DirectionSet};
pub use tiles::{Color, Pattern};
