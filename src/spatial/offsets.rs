//! Neighbor offsets between overlapping patterns
//!
//! Two patterns of size N overlap whenever their anchors differ by less than N
//! on both axes, so the constraint directions are every `(dx, dy)` with
//! `|dx|, |dy| < N` other than `(0, 0)`.

/// Offset from a cell to one of its constrained neighbors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Column offset (positive is right)
    pub dx: i32,
    /// Row offset (positive is down)
    pub dy: i32,
}

impl Direction {
    /// Create an offset
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// The offset pointing back from the neighbor to the cell
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

/// Ordered set of directions for one tile size
///
/// Directions are enumerated row by row from `(-(N-1), -(N-1))` to
/// `(N-1, N-1)`. The enumeration is point-symmetric, so the opposite of
/// the direction at index `i` sits at index `len - 1 - i`.
#[derive(Clone, Debug)]
pub struct DirectionSet {
    directions: Vec<Direction>,
}

impl DirectionSet {
    /// All overlap directions for patterns of side `tile_size`
    ///
    /// A tile size of one has no overlaps and therefore no directions.
    pub fn for_tile_size(tile_size: usize) -> Self {
        let reach = tile_size.saturating_sub(1) as i32;
        let mut directions = Vec::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if dx != 0 || dy != 0 {
                    directions.push(Direction::new(dx, dy));
                }
            }
        }
        Self { directions }
    }

    /// Number of directions
    pub const fn len(&self) -> usize {
        self.directions.len()
    }

    /// Whether the set is empty (tile size one)
    pub const fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Direction at `index`
    pub fn get(&self, index: usize) -> Option<Direction> {
        self.directions.get(index).copied()
    }

    /// Index of the direction opposite to `index`
    pub const fn opposite_index(&self, index: usize) -> usize {
        self.directions.len().saturating_sub(1).saturating_sub(index)
    }

    /// Iterate `(index, direction)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Direction)> + '_ {
        self.directions.iter().copied().enumerate()
    }
}
