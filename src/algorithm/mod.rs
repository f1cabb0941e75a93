/// Fixed-capacity pattern sets backed by a bit vector
pub mod bitset;
/// Observation loop, restarts and output rendering
pub mod executor;
/// Arc-consistency propagation over the wave
pub mod propagation;
/// Minimum-entropy cell selection and weighted pattern choice
pub mod selection;
/// Per-cell possibility sets with cached entropy sums
pub mod wave;
