//! Square pixel patterns and their symmetry transforms
//!
//! A pattern is an N×N block of RGB colours cut from the exemplar. Blocks are
//! stored row-major so that two patterns with the same pixels compare and hash
//! equal, which is what deduplication in the catalogue relies on.

/// RGB colour of a single pixel
pub type Color = [u8; 3];

/// An N×N block of pixel colours, stored row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    size: usize,
    pixels: Vec<Color>,
}

impl Pattern {
    /// Build a pattern from row-major pixels
    ///
    /// Returns `None` when `pixels.len()` is not `size * size` or `size` is zero.
    pub fn from_pixels(size: usize, pixels: Vec<Color>) -> Option<Self> {
        (size > 0 && pixels.len() == size * size).then_some(Self { size, pixels })
    }

    /// Build a pattern by sampling `color_at(x, y)` for every local coordinate
    pub fn from_fn(size: usize, mut color_at: impl FnMut(usize, usize) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                pixels.push(color_at(x, y));
            }
        }
        Self { size, pixels }
    }

    /// Side length N
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Colour at local column `x`, row `y`
    ///
    /// Out-of-range coordinates yield black rather than panicking.
    pub fn get(&self, x: usize, y: usize) -> Color {
        if x >= self.size || y >= self.size {
            return [0, 0, 0];
        }
        self.pixels
            .get(y * self.size + x)
            .copied()
            .unwrap_or([0, 0, 0])
    }

    /// The pixel this pattern contributes to the output image
    pub fn top_left(&self) -> Color {
        self.get(0, 0)
    }

    /// Row-major pixel slice
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Rotate a quarter turn clockwise
    #[must_use]
    pub fn rotate_90(&self) -> Self {
        let n = self.size;
        Self::from_fn(n, |x, y| self.get(y, n - 1 - x))
    }

    /// Mirror left to right
    #[must_use]
    pub fn reflect(&self) -> Self {
        let n = self.size;
        Self::from_fn(n, |x, y| self.get(n - 1 - x, y))
    }

    /// The block followed by its enabled symmetry variants
    ///
    /// Rotations add the 90°, 180° and 270° turns; reflections mirror every
    /// block produced so far. With both enabled this yields the original plus
    /// seven variants. Variants are not deduplicated here.
    pub fn variants(&self, include_rotations: bool, include_reflections: bool) -> Vec<Self> {
        let mut variants = vec![self.clone()];

        if include_rotations {
            let rot90 = self.rotate_90();
            let rot180 = rot90.rotate_90();
            let rot270 = rot180.rotate_90();
            variants.push(rot90);
            variants.push(rot180);
            variants.push(rot270);
        }

        if include_reflections {
            let current_len = variants.len();
            for i in 0..current_len {
                if let Some(variant) = variants.get(i) {
                    let reflected = variant.reflect();
                    variants.push(reflected);
                }
            }
        }

        variants
    }
}
