use crate::{
    algorithm::propagation::{PropagationOutcome, Propagator},
    algorithm::selection::{RandomSelector, TieBreak, choose_pattern, select_min_entropy_cell},
    algorithm::wave::Wave,
    analysis::catalogue::{ExtractionConfig, PatternCatalogue},
    analysis::compatibility::CompatibilityTable,
    analysis::patterns::Exemplar,
    io::configuration::MAX_GRID_DIMENSION,
    io::error::{Result, SynthesisError, invalid_input, invalid_parameter},
    io::visualization::{FrameSink, WaveSnapshot},
    spatial::grid::GridDimensions,
    spatial::tiles::Color,
};
use ndarray::Array2;

/// Output geometry and restart policy for one solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Output width in pixels
    pub width: usize,
    /// Output height in pixels
    pub height: usize,
    /// Whether opposite output edges constrain each other
    pub periodic_output: bool,
    /// Restarts allowed before giving up; `None` retries forever
    pub max_restarts: Option<usize>,
    /// How ties between minimum-entropy cells are broken
    pub tie_break: TieBreak,
}

impl SolverConfig {
    /// Bounded output with unlimited restarts and random tie-breaking
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            periodic_output: false,
            max_restarts: None,
            tie_break: TieBreak::Random,
        }
    }

    /// Check the output dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero dimension and `InvalidParameter` for
    /// a dimension above [`MAX_GRID_DIMENSION`].
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid_input(&format!(
                "output dimensions {}x{} must be positive",
                self.width, self.height
            )));
        }
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }

    /// Grid geometry described by this configuration
    pub const fn dimensions(&self) -> GridDimensions {
        GridDimensions {
            width: self.width,
            height: self.height,
            periodic: self.periodic_output,
        }
    }
}

/// How an attempt ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    /// Every cell holds exactly one pattern
    Success,
    /// A cell emptied; the wave must be rebuilt
    ContradictionReset {
        /// Cell that lost its last pattern
        cell: [usize; 2],
    },
}

/// Driver state between rounds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Choosing the next cell to collapse
    Observing,
    /// Draining eliminations to a fixed point
    Propagating,
    /// The current attempt is over
    Terminal(Terminal),
}

/// What a single call to [`Solver::run_round`] achieved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// One cell was observed and propagation settled
    Continue,
    /// A contradiction discarded the attempt and the wave was rebuilt
    Reset {
        /// Cell that lost its last pattern
        cell: [usize; 2],
    },
    /// The wave is fully collapsed
    Complete,
}

/// Result of a successful solve
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// Output pixels indexed by `[row, col]`
    pub output: Array2<Color>,
    /// Successful observation rounds across all attempts
    pub rounds: usize,
    /// Contradiction restarts performed
    pub restarts: usize,
}

/// Overlapping wave function collapse driver
///
/// Owns the pattern catalogue and compatibility table, which survive
/// restarts, and the wave, which is rebuilt from scratch after every
/// contradiction.
pub struct Solver {
    catalogue: PatternCatalogue,
    table: CompatibilityTable,
    config: SolverConfig,
    wave: Wave,
    random_selector: RandomSelector,
    phase: Phase,
    rounds: usize,
    restarts: usize,
}

impl Solver {
    /// Create a solver over a prepared catalogue and table
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the catalogue is
    /// empty.
    pub fn new(
        catalogue: PatternCatalogue,
        table: CompatibilityTable,
        config: SolverConfig,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        if catalogue.is_empty() {
            return Err(invalid_input(&"pattern catalogue is empty"));
        }
        if table.pattern_count() != catalogue.len() {
            return Err(invalid_input(&format!(
                "compatibility table covers {} patterns, catalogue holds {}",
                table.pattern_count(),
                catalogue.len()
            )));
        }

        let wave = Wave::new(config.dimensions(), &catalogue);
        let mut solver = Self {
            catalogue,
            table,
            config,
            wave,
            random_selector: RandomSelector::new(seed),
            phase: Phase::Observing,
            rounds: 0,
            restarts: 0,
        };
        solver.start();
        Ok(solver)
    }

    /// Extract patterns from `exemplar` and create a solver over them
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the tile size does not fit the exemplar or
    /// the output configuration is invalid.
    pub fn from_exemplar(
        exemplar: &Exemplar,
        extraction: ExtractionConfig,
        config: SolverConfig,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        let catalogue = PatternCatalogue::extract(exemplar, extraction)?;
        let table = CompatibilityTable::build(&catalogue);
        Self::new(catalogue, table, config, seed)
    }

    /// Pattern catalogue in use
    pub const fn catalogue(&self) -> &PatternCatalogue {
        &self.catalogue
    }

    /// Compatibility table in use
    pub const fn table(&self) -> &CompatibilityTable {
        &self.table
    }

    /// Active configuration
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Current wave
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Current driver phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Successful rounds so far
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// Restarts so far
    pub const fn restarts(&self) -> usize {
        self.restarts
    }

    /// Rebuild the wave and settle any initial constraints
    fn start(&mut self) {
        self.wave.reset();
        // A fresh bounded or periodic wave has no pending eliminations
        self.phase = match Propagator::new(&self.table).propagate(&mut self.wave) {
            PropagationOutcome::Stable { .. } => Phase::Observing,
            PropagationOutcome::Contradiction { cell } => {
                Phase::Terminal(Terminal::ContradictionReset { cell })
            }
        };
    }

    /// Advance by one observation and propagation round
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` when a restart cap is configured and exceeded,
    /// or any error raised by the sink.
    pub fn run_round(&mut self, sink: &mut dyn FrameSink) -> Result<RoundOutcome> {
        match self.phase {
            Phase::Terminal(Terminal::Success) => return Ok(RoundOutcome::Complete),
            Phase::Terminal(Terminal::ContradictionReset { cell }) => {
                return self.restart(cell, sink);
            }
            Phase::Observing | Phase::Propagating => {}
        }

        if self.wave.is_fully_collapsed() {
            self.phase = Phase::Terminal(Terminal::Success);
            log::info!(
                "Solved {}x{} after {} rounds and {} restarts",
                self.config.width,
                self.config.height,
                self.rounds,
                self.restarts
            );
            return Ok(RoundOutcome::Complete);
        }

        let Some(cell) = select_min_entropy_cell(
            &self.wave,
            &mut self.random_selector,
            self.config.tie_break,
        ) else {
            let cell = self
                .wave
                .cells()
                .find(|(_, candidate)| candidate.is_contradicted())
                .map_or([0, 0], |(position, _)| position);
            self.phase = Phase::Terminal(Terminal::ContradictionReset { cell });
            return self.restart(cell, sink);
        };

        let pattern = choose_pattern(
            &self.wave,
            self.catalogue.weights(),
            cell,
            &mut self.random_selector,
        )
        .ok_or_else(|| invalid_input(&format!("cell {cell:?} has no pattern to observe")))?;
        self.wave.collapse_to(cell, pattern);
        self.wave.enqueue(cell);

        self.phase = Phase::Propagating;
        match Propagator::new(&self.table).propagate(&mut self.wave) {
            PropagationOutcome::Contradiction { cell: emptied } => {
                self.phase = Phase::Terminal(Terminal::ContradictionReset { cell: emptied });
                self.restart(emptied, sink)
            }
            PropagationOutcome::Stable { .. } => {
                self.rounds += 1;
                self.phase = Phase::Observing;
                if sink.wants_snapshots() {
                    sink.on_round(&WaveSnapshot::capture(&self.wave, &self.catalogue))?;
                }
                Ok(RoundOutcome::Continue)
            }
        }
    }

    fn restart(&mut self, cell: [usize; 2], sink: &mut dyn FrameSink) -> Result<RoundOutcome> {
        if self
            .config
            .max_restarts
            .is_some_and(|max| self.restarts >= max)
        {
            return Err(SynthesisError::Contradiction {
                cell,
                restarts: self.restarts,
            });
        }

        self.restarts += 1;
        log::debug!(
            "Contradiction at ({}, {}); restart {}",
            cell[0],
            cell[1],
            self.restarts
        );
        sink.on_reset()?;
        self.start();
        Ok(RoundOutcome::Reset { cell })
    }

    /// Run rounds until the wave is fully collapsed and render it
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` when a restart cap is configured and exceeded,
    /// or any error raised by the sink.
    pub fn solve(&mut self, sink: &mut dyn FrameSink) -> Result<SolveReport> {
        self.solve_observed(sink, |_, _| {})
    }

    /// [`Solver::solve`], calling `observe` after every round that did not complete
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` when a restart cap is configured and exceeded,
    /// or any error raised by the sink.
    pub fn solve_observed(
        &mut self,
        sink: &mut dyn FrameSink,
        mut observe: impl FnMut(&Self, RoundOutcome),
    ) -> Result<SolveReport> {
        loop {
            let outcome = self.run_round(sink)?;
            if outcome == RoundOutcome::Complete {
                break;
            }
            observe(self, outcome);
        }
        let output = self
            .render()
            .ok_or_else(|| invalid_input(&"solver finished without collapsing every cell"))?;
        Ok(SolveReport {
            output,
            rounds: self.rounds,
            restarts: self.restarts,
        })
    }

    /// Output pixels of a fully collapsed wave
    ///
    /// Each cell contributes the top-left pixel of its pattern. Returns
    /// `None` while any cell is undecided.
    pub fn render(&self) -> Option<Array2<Color>> {
        if !self.wave.is_fully_collapsed() {
            return None;
        }
        let mut output = Array2::from_elem((self.config.height, self.config.width), [0, 0, 0]);
        for (position, pixel) in output.indexed_iter_mut() {
            let pattern = self.wave.collapsed_pattern(position.into())?;
            *pixel = self.catalogue.color(pattern);
        }
        Some(output)
    }
}
