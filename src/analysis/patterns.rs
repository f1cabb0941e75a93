//! Exemplar images as decoded RGB pixel grids

use crate::io::error::{Result, SynthesisError, invalid_input};
use crate::spatial::tiles::Color;
use ndarray::Array2;
use std::path::Path;

/// Decoded exemplar image indexed by `[row, col]`
#[derive(Clone, Debug)]
pub struct Exemplar {
    pixels: Array2<Color>,
}

impl Exemplar {
    /// Load an exemplar from any image format the `image` crate decodes
    ///
    /// Alpha is discarded; only RGB takes part in pattern matching.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or decoded
    /// - The decoded image holds no pixels
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| SynthesisError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgb_img = img.to_rgb8();

        let (width, height) = (rgb_img.width() as usize, rgb_img.height() as usize);
        let mut pixels = Array2::from_elem((height, width), [0, 0, 0]);
        for (x, y, pixel) in rgb_img.enumerate_pixels() {
            if let Some(slot) = pixels.get_mut((y as usize, x as usize)) {
                *slot = pixel.0;
            }
        }

        Self::from_pixels(pixels)
    }

    /// Wrap an already decoded pixel grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the grid has no pixels.
    pub fn from_pixels(pixels: Array2<Color>) -> Result<Self> {
        if pixels.is_empty() {
            return Err(invalid_input(&"exemplar has no pixels"));
        }
        Ok(Self { pixels })
    }

    /// Build from row-major rows of equal length
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the rows are empty or ragged.
    pub fn from_rows(rows: &[Vec<Color>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(invalid_input(&"exemplar rows differ in length"));
        }
        let flat: Vec<Color> = rows.iter().flatten().copied().collect();
        let pixels = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| invalid_input(&format!("exemplar shape: {e}")))?;
        Self::from_pixels(pixels)
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Colour at `(x, y)` with toroidal wrapping on both axes
    pub fn get_wrapped(&self, x: usize, y: usize) -> Color {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return [0, 0, 0];
        }
        self.pixels
            .get((y % height, x % width))
            .copied()
            .unwrap_or([0, 0, 0])
    }

    /// Underlying pixel grid
    pub const fn pixels(&self) -> &Array2<Color> {
        &self.pixels
    }

    /// Check that `tile_size` windows fit inside the exemplar
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the tile size is zero or exceeds either dimension.
    pub fn validate_tile_size(&self, tile_size: usize) -> Result<()> {
        if tile_size == 0 {
            return Err(invalid_input(&"tile size must be positive"));
        }
        if tile_size > self.width() || tile_size > self.height() {
            return Err(invalid_input(&format!(
                "tile size {tile_size} exceeds exemplar dimensions {}x{}",
                self.width(),
                self.height()
            )));
        }
        Ok(())
    }
}
