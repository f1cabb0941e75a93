//! Command-line interface: exemplar in, synthesised image out

use crate::algorithm::executor::{RoundOutcome, SolveReport, Solver, SolverConfig};
use crate::algorithm::selection::TieBreak;
use crate::analysis::catalogue::ExtractionConfig;
use crate::analysis::patterns::Exemplar;
use crate::io::configuration::{
    DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_SEED, DEFAULT_TILE_SIZE,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, VISUALIZATION_CELL_SIZE, VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, SynthesisError};
use crate::io::image::export_output;
use crate::io::progress::ProgressManager;
use crate::io::visualization::{
    FrameRecorder, FrameSink, ManualStepper, NullSink, VisualizationMode,
};
use clap::Parser;
use std::io::{BufReader, Stdin};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Synthesise images locally similar to an exemplar with overlapping wave function collapse"
)]
/// Command-line arguments for the synthesis tool
// Independent feature toggles
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Exemplar image to learn patterns from
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination image (defaults to <input>_result.png next to the input)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Side length of extracted patterns
    #[arg(short = 'n', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Output width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Progress visualization written as an animated GIF next to the output
    #[arg(short, long, value_enum, default_value_t = VisualizationMode::Off)]
    pub visualization: VisualizationMode,

    /// Add rotated patterns (90°, 180°, 270°)
    #[arg(short = 'r', long)]
    pub rotate: bool,

    /// Add mirrored patterns
    #[arg(short = 'm', long)]
    pub mirror: bool,

    /// Add all seven rotated and mirrored variants
    #[arg(short = 'S', long)]
    pub symmetry: bool,

    /// Only extract windows lying fully inside the exemplar
    #[arg(long)]
    pub bounded_input: bool,

    /// Make opposite output edges constrain each other
    #[arg(long)]
    pub periodic: bool,

    /// Give up after this many contradiction restarts
    #[arg(long, value_name = "COUNT")]
    pub max_restarts: Option<usize>,

    /// Break entropy ties by scan order instead of at random
    #[arg(long)]
    pub ordered_ties: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Pattern extraction settings
    pub const fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            tile_size: self.tile_size,
            periodic_input: !self.bounded_input,
            include_rotations: self.rotate || self.symmetry,
            include_reflections: self.mirror || self.symmetry,
        }
    }

    /// Solver settings
    pub const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            width: self.width,
            height: self.height,
            periodic_output: self.periodic,
            max_restarts: self.max_restarts,
            tie_break: if self.ordered_ties {
                TieBreak::FirstInOrder
            } else {
                TieBreak::Random
            },
        }
    }

    /// Where the output image is written
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self.input.file_stem().unwrap_or_default();
            sibling(
                &self.input,
                &format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy()),
            )
        })
    }

    /// Where the visualization GIF is written for a given output path
    pub fn visualization_path(output_path: &Path) -> PathBuf {
        let stem = output_path.file_stem().unwrap_or_default();
        sibling(
            output_path,
            &format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy()),
        )
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && !matches!(self.visualization, VisualizationMode::Manual)
    }
}

fn sibling(path: &Path, file_name: &str) -> PathBuf {
    path.parent()
        .map_or_else(|| PathBuf::from(file_name), |parent| parent.join(file_name))
}

/// The notification sink selected by the visualization mode
pub enum Visualizer {
    /// Notifications are dropped
    Off(NullSink),
    /// Every round is recorded
    Auto(FrameRecorder),
    /// Every round is recorded and acknowledged on standard input
    Manual(ManualStepper<BufReader<Stdin>>),
}

impl Visualizer {
    /// Build the sink for `mode`
    pub fn for_mode(mode: VisualizationMode, solver: &Solver) -> Self {
        let config = solver.config();
        let recorder = || {
            FrameRecorder::new(
                config.width,
                config.height,
                solver.catalogue(),
                VISUALIZATION_CELL_SIZE,
            )
        };
        match mode {
            VisualizationMode::Off => Self::Off(NullSink),
            VisualizationMode::Auto => Self::Auto(recorder()),
            VisualizationMode::Manual => {
                Self::Manual(ManualStepper::new(recorder(), BufReader::new(std::io::stdin())))
            }
        }
    }

    /// The sink to hand to the solver
    pub fn sink(&mut self) -> &mut dyn FrameSink {
        match self {
            Self::Off(sink) => sink,
            Self::Auto(recorder) => recorder,
            Self::Manual(stepper) => stepper,
        }
    }

    /// Recorded frames, if this mode records any
    pub const fn recorder(&self) -> Option<&FrameRecorder> {
        match self {
            Self::Off(_) => None,
            Self::Auto(recorder) => Some(recorder),
            Self::Manual(stepper) => Some(stepper.recorder()),
        }
    }
}

/// Drive `solver` to completion while reporting to `sink` and `progress`
///
/// # Errors
///
/// Returns `Contradiction` once a configured restart cap is exceeded, or any
/// error raised by the sink.
pub fn run_to_completion(
    solver: &mut Solver,
    sink: &mut dyn FrameSink,
    mut progress: Option<&mut ProgressManager>,
) -> Result<SolveReport> {
    solver.solve_observed(sink, |current, outcome| {
        let Some(pm) = progress.as_deref_mut() else {
            return;
        };
        match outcome {
            RoundOutcome::Continue => {
                pm.update_round(current.rounds(), current.wave().collapsed_count());
            }
            RoundOutcome::Reset { .. } => pm.record_restart(current.restarts()),
            RoundOutcome::Complete => {}
        }
    })
}

/// Runs one synthesis from parsed arguments
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load, solve, and write the output (and visualization if enabled)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The exemplar cannot be loaded or the configuration is invalid
    /// - The output file, or the visualization file when enabled, already exists
    /// - A configured restart cap is exceeded
    /// - Encoding the output or the visualization fails
    pub fn run(&self) -> Result<SolveReport> {
        let output_path = self.cli.output_path();
        refuse_existing(&output_path, "create output file")?;
        let viz_path = Cli::visualization_path(&output_path);
        if self.cli.visualization != VisualizationMode::Off {
            refuse_existing(&viz_path, "create visualization file")?;
        }

        let exemplar = Exemplar::from_file(&self.cli.input)?;
        let mut solver = Solver::from_exemplar(
            &exemplar,
            self.cli.extraction_config(),
            self.cli.solver_config(),
            self.cli.seed,
        )?;

        let mut visualizer = Visualizer::for_mode(self.cli.visualization, &solver);
        let mut progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressManager::new(self.cli.width * self.cli.height));

        let report = run_to_completion(&mut solver, visualizer.sink(), progress.as_mut())?;

        if let Some(ref pm) = progress {
            pm.finish();
        }

        export_output(&report.output, &output_path)?;
        log::info!("Wrote {}", output_path.display());

        // A catalogue of one pattern solves without a single round
        if let Some(recorder) = visualizer.recorder().filter(|r| r.frame_count() > 0) {
            recorder.export_gif(&viz_path, GIF_FRAME_DELAY_MS)?;
            log::info!("Wrote {}", viz_path.display());
        }

        Ok(report)
    }
}

fn refuse_existing(path: &Path, operation: &'static str) -> Result<()> {
    if path.exists() {
        return Err(SynthesisError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file already exists"),
        });
    }
    Ok(())
}
