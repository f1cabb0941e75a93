//! Output grid geometry and neighbor resolution
//!
//! Positions are `[row, col]` pairs. A bounded grid drops neighbors that fall
//! outside it; a periodic grid wraps them around both axes.

use crate::spatial::offsets::Direction;

/// Output grid extent and border behaviour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Whether neighbors wrap around the edges
    pub periodic: bool,
}

impl GridDimensions {
    /// A bounded grid
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            periodic: false,
        }
    }

    /// A grid whose opposite edges are adjacent
    pub const fn periodic(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            periodic: true,
        }
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Neighbor of `position` displaced by `direction`
    ///
    /// Returns `None` for out-of-bounds neighbors on a bounded grid.
    pub fn neighbor(&self, position: [usize; 2], direction: Direction) -> Option<[usize; 2]> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let row = position[0] as i64 + i64::from(direction.dy);
        let col = position[1] as i64 + i64::from(direction.dx);
        let (height, width) = (self.height as i64, self.width as i64);

        if self.periodic {
            Some([row.rem_euclid(height) as usize, col.rem_euclid(width) as usize])
        } else if (0..height).contains(&row) && (0..width).contains(&col) {
            Some([row as usize, col as usize])
        } else {
            None
        }
    }

    /// Iterate every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = [usize; 2]> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| [row, col]))
    }
}
