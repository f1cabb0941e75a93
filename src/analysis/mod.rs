//! Analysis modules for exemplar loading and pattern extraction

/// Deduplicated weighted pattern catalogue
pub mod catalogue;
/// Directional compatibility between overlapping patterns
pub mod compatibility;
/// Exemplar pixel grids and image decoding
pub mod patterns;
