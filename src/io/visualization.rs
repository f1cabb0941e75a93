//! Progress snapshots, notification sinks and GIF capture
//!
//! After every observation round the solver hands a [`WaveSnapshot`] to a
//! [`FrameSink`]. Sinks decide what to do with it: drop it, record it as an
//! animation frame, or record it and wait for the user before continuing.

use crate::algorithm::wave::Wave;
use crate::analysis::catalogue::PatternCatalogue;
use crate::io::configuration::MANUAL_STEP_PROMPT;
use crate::io::error::{Result, SynthesisError};
use crate::spatial::tiles::Color;
use image::{Frame, Rgba, RgbaImage};
use std::io::BufRead;
use std::path::Path;

/// How progress is reported while solving
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum VisualizationMode {
    /// Render a frame after every round
    Auto,
    /// Render a frame and wait for acknowledgment after every round
    Manual,
    /// No notifications
    #[default]
    Off,
}

/// Rendering-relevant state of one cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellView {
    /// Several patterns remain
    Undetermined {
        /// Entropy of the remaining distribution
        entropy: f64,
        /// Mean output colour of the remaining patterns
        color: Color,
    },
    /// Exactly one pattern remains
    Collapsed(Color),
    /// No pattern remains
    Contradicted,
}

impl CellView {
    /// Colour used when drawing this cell
    pub const fn color(&self) -> Color {
        match self {
            Self::Undetermined { color, .. } | Self::Collapsed(color) => *color,
            Self::Contradicted => [0, 0, 0],
        }
    }
}

/// Read-only picture of the wave at the end of a round
#[derive(Clone, Debug)]
pub struct WaveSnapshot {
    width: usize,
    height: usize,
    cells: Vec<CellView>,
}

impl WaveSnapshot {
    /// Capture the current state of `wave`
    pub fn capture(wave: &Wave, catalogue: &PatternCatalogue) -> Self {
        let dimensions = wave.dimensions();
        let cells = wave
            .cells()
            .map(|(_, cell)| match cell.remaining() {
                0 => CellView::Contradicted,
                1 => CellView::Collapsed(
                    cell.possible()
                        .iter()
                        .next()
                        .map_or([0, 0, 0], |pattern| catalogue.color(pattern)),
                ),
                _ => CellView::Undetermined {
                    entropy: cell.entropy(),
                    color: mean_color(cell.possible().iter().map(|p| catalogue.color(p))),
                },
            })
            .collect();

        Self {
            width: dimensions.width,
            height: dimensions.height,
            cells,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// View of the cell at `[row, col]`
    pub fn cell(&self, position: [usize; 2]) -> Option<&CellView> {
        if position[1] >= self.width {
            return None;
        }
        self.cells.get(position[0] * self.width + position[1])
    }

    /// All cell views in row-major order
    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|view| matches!(view, CellView::Collapsed(_)))
            .count()
    }
}

/// Integer mean of a set of colours; mid-grey when empty
pub fn mean_color(colors: impl Iterator<Item = Color>) -> Color {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for color in colors {
        for (sum, channel) in sums.iter_mut().zip(color) {
            *sum += u64::from(channel);
        }
        count += 1;
    }
    if count == 0 {
        return [128, 128, 128];
    }
    sums.map(|sum| (sum / count) as u8)
}

/// Receiver of per-round progress notifications
pub trait FrameSink {
    /// Whether this sink consumes snapshots at all
    ///
    /// The solver skips building snapshots for sinks that return `false`.
    fn wants_snapshots(&self) -> bool {
        true
    }

    /// Called once after every observation and propagation round
    ///
    /// # Errors
    ///
    /// Implementations may fail when waiting for or recording the frame fails.
    fn on_round(&mut self, snapshot: &WaveSnapshot) -> Result<()>;

    /// Called when a contradiction discards the current attempt
    ///
    /// # Errors
    ///
    /// Implementations may fail when recording the reset frame fails.
    fn on_reset(&mut self) -> Result<()>;
}

/// Sink for the `off` mode
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn wants_snapshots(&self) -> bool {
        false
    }

    fn on_round(&mut self, _snapshot: &WaveSnapshot) -> Result<()> {
        Ok(())
    }

    fn on_reset(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Records every round as a scaled animation frame
///
/// Resets are recorded as a flat fill of the catalogue's mean colour.
pub struct FrameRecorder {
    frames: Vec<RgbaImage>,
    reset_color: Color,
    cell_size: u32,
    dimensions: (u32, u32),
}

impl FrameRecorder {
    /// Create a recorder for a `width` × `height` output
    pub fn new(width: usize, height: usize, catalogue: &PatternCatalogue, cell_size: u32) -> Self {
        let reset_color = mean_color((0..catalogue.len()).map(|index| catalogue.color(index)));
        Self {
            frames: Vec::new(),
            reset_color,
            cell_size: cell_size.max(1),
            dimensions: (width as u32, height as u32),
        }
    }

    /// Frames captured so far
    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// Number of frames captured so far
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Colour of the flat reset frame
    pub const fn reset_color(&self) -> Color {
        self.reset_color
    }

    fn blank(&self, color: Color) -> RgbaImage {
        let (width, height) = self.dimensions;
        RgbaImage::from_pixel(
            width * self.cell_size,
            height * self.cell_size,
            Rgba([color[0], color[1], color[2], 255]),
        )
    }

    fn render(&self, snapshot: &WaveSnapshot) -> RgbaImage {
        let mut img = self.blank(self.reset_color);
        let size = self.cell_size;
        for row in 0..snapshot.height() {
            for col in 0..snapshot.width() {
                let Some(view) = snapshot.cell([row, col]) else {
                    continue;
                };
                let color = view.color();
                let pixel = Rgba([color[0], color[1], color[2], 255]);
                for dy in 0..size {
                    for dx in 0..size {
                        let x = col as u32 * size + dx;
                        let y = row as u32 * size + dy;
                        if x < img.width() && y < img.height() {
                            img.put_pixel(x, y, pixel);
                        }
                    }
                }
            }
        }
        img
    }

    /// Write the captured frames as an animated GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - A file already exists at `output_path` or it cannot be created
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(SynthesisError::InvalidInput {
                reason: "No frames captured for visualization".to_string(),
            });
        }

        let file =
            std::fs::File::create_new(output_path).map_err(|e| SynthesisError::FileSystem {
                path: output_path.to_path_buf(),
                operation: "create visualization file",
                source: e,
            })?;

        let delay = image::Delay::from_numer_denom_ms(frame_delay_ms, 1);
        let frames = self
            .frames
            .iter()
            .map(|img| Frame::from_parts(img.clone(), 0, 0, delay));

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| SynthesisError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }
}

impl FrameSink for FrameRecorder {
    fn on_round(&mut self, snapshot: &WaveSnapshot) -> Result<()> {
        let frame = self.render(snapshot);
        self.frames.push(frame);
        Ok(())
    }

    fn on_reset(&mut self) -> Result<()> {
        let frame = self.blank(self.reset_color);
        self.frames.push(frame);
        Ok(())
    }
}

/// Records frames and blocks for a line of input after every round
///
/// End of input releases the stepper, after which it records without waiting.
pub struct ManualStepper<R: BufRead> {
    recorder: FrameRecorder,
    input: R,
    exhausted: bool,
    acknowledged: usize,
}

impl<R: BufRead> ManualStepper<R> {
    /// Wrap `recorder`, reading acknowledgments from `input`
    pub const fn new(recorder: FrameRecorder, input: R) -> Self {
        Self {
            recorder,
            input,
            exhausted: false,
            acknowledged: 0,
        }
    }

    /// Rounds acknowledged so far
    pub const fn acknowledged(&self) -> usize {
        self.acknowledged
    }

    /// Recorded frames
    pub const fn recorder(&self) -> &FrameRecorder {
        &self.recorder
    }

    /// Take back the recorder
    pub fn into_recorder(self) -> FrameRecorder {
        self.recorder
    }

    // Allow print for the interactive prompt
    #[allow(clippy::print_stderr)]
    fn wait_for_acknowledgment(&mut self) -> Result<()> {
        if self.exhausted {
            return Ok(());
        }
        eprintln!("{MANUAL_STEP_PROMPT}");
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| SynthesisError::FileSystem {
                path: "<input>".into(),
                operation: "read acknowledgment",
                source: e,
            })?;
        if read == 0 {
            self.exhausted = true;
        } else {
            self.acknowledged += 1;
        }
        Ok(())
    }
}

impl<R: BufRead> FrameSink for ManualStepper<R> {
    fn on_round(&mut self, snapshot: &WaveSnapshot) -> Result<()> {
        self.recorder.on_round(snapshot)?;
        self.wait_for_acknowledgment()
    }

    fn on_reset(&mut self) -> Result<()> {
        self.recorder.on_reset()
    }
}
