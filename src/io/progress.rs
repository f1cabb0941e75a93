//! Terminal progress display for a running solve

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

use crate::io::configuration::PROGRESS_TICK_MS;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows collapsed cells against the grid size, plus round and restart counts
///
/// The bar length is the number of output cells; a restart rewinds it.
pub struct ProgressManager {
    bar: ProgressBar,
    rounds: usize,
    restarts: usize,
}

impl ProgressManager {
    /// Create a bar for a grid of `cell_count` cells
    pub fn new(cell_count: usize) -> Self {
        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Self {
            bar,
            rounds: 0,
            restarts: 0,
        }
    }

    /// A bar that never draws, for tests and quiet runs
    pub fn hidden(cell_count: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(cell_count as u64);
        Self {
            bar,
            rounds: 0,
            restarts: 0,
        }
    }

    /// Report the state after a completed round
    pub fn update_round(&mut self, rounds: usize, collapsed: usize) {
        self.rounds = rounds;
        self.bar.set_position(collapsed as u64);
        self.refresh_message();
    }

    /// Report a contradiction restart
    pub fn record_restart(&mut self, restarts: usize) {
        self.restarts = restarts;
        self.bar.set_position(0);
        self.refresh_message();
    }

    /// Rounds shown on the bar
    pub const fn rounds(&self) -> usize {
        self.rounds
    }

    /// Restarts shown on the bar
    pub const fn restarts(&self) -> usize {
        self.restarts
    }

    /// Cells shown as collapsed
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish and remove the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn refresh_message(&self) {
        self.bar.set_message(format!(
            "round {} | restarts {}",
            self.rounds, self.restarts
        ));
    }
}
