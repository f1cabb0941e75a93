//! CLI entry point for overlapping wave function collapse synthesis

use clap::Parser;
use wavetile::io::cli::{Cli, Runner};

fn main() -> wavetile::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let report = Runner::new(cli).run()?;
    log::info!(
        "Finished in {} rounds with {} restarts",
        report.rounds,
        report.restarts
    );
    Ok(())
}
