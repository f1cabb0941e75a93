//! Algorithm constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default side length of extracted patterns
pub const DEFAULT_TILE_SIZE: usize = 2;

/// Default output width in pixels
pub const DEFAULT_OUTPUT_WIDTH: usize = 30;

/// Default output height in pixels
pub const DEFAULT_OUTPUT_HEIGHT: usize = 30;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Entropies closer than this to the minimum are treated as tied
pub const ENTROPY_TIE_TOLERANCE: f64 = 1e-9;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Screen pixels per output cell in visualization frames
pub const VISUALIZATION_CELL_SIZE: u32 = 8;
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 50;
/// Message shown while waiting for acknowledgment in manual mode
pub const MANUAL_STEP_PROMPT: &str = "Press Enter to continue";

// Progress display settings
/// Refresh interval of the progress spinner in milliseconds
pub const PROGRESS_TICK_MS: u64 = 100;
