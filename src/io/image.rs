//! Encoding of the synthesised output image

use crate::io::error::{Result, SynthesisError};
use crate::spatial::tiles::Color;
use image::{ImageFormat, Rgb, RgbImage};
use ndarray::Array2;
use std::io::BufWriter;
use std::path::Path;

/// Convert `[row, col]` output pixels into an RGB image buffer
pub fn output_to_image(output: &Array2<Color>) -> RgbImage {
    let (height, width) = output.dim();
    let mut img = RgbImage::new(width as u32, height as u32);
    for ((row, col), color) in output.indexed_iter() {
        img.put_pixel(col as u32, row as u32, Rgb(*color));
    }
    img
}

/// Encode the output to a new file at `output_path`
///
/// The format follows the file extension. The parent directory must already
/// exist and the file itself must not.
///
/// # Errors
///
/// Returns an error if:
/// - The extension does not name a supported image format
/// - The parent directory does not exist
/// - A file already exists at the path
/// - The image cannot be encoded
pub fn export_output(output: &Array2<Color>, output_path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(output_path).map_err(|e| SynthesisError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "locate output directory",
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "output directory does not exist",
            ),
        });
    }

    let file = std::fs::File::create_new(output_path).map_err(|e| SynthesisError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create output file",
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    output_to_image(output)
        .write_to(&mut writer, format)
        .map_err(|e| SynthesisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
