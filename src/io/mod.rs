/// Command-line parsing and the single-run driver
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Output image encoding
pub mod image;
/// Terminal progress reporting
pub mod progress;
/// Per-round snapshots, frame capture and GIF export
pub mod visualization;
