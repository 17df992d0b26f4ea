//! Error types for the scatter-filters crate.

/// Error type for all fallible operations in the scatter-filters crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Returned when the number of scales is zero.
    #[error("number of scales must be >= 1, got {0}")]
    InvalidScaleCount(usize),

    /// Returned when the number of orientations is zero.
    #[error("number of orientations must be >= 1, got {0}")]
    InvalidOrientationCount(usize),

    /// Returned when the grid cannot be subsampled `n_scales` times.
    #[error("grid {rows}x{cols} is not a positive multiple of 2^{n_scales}")]
    GridNotDivisible {
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
        /// Number of dyadic scales requested.
        n_scales: usize,
    },

    /// Returned when a filter is periodized to a resolution the grid does not support.
    #[error("cannot periodize a {rows}x{cols} filter to resolution {resolution}")]
    ResolutionTooFine {
        /// Requested resolution level.
        resolution: usize,
        /// Filter rows.
        rows: usize,
        /// Filter columns.
        cols: usize,
    },
}
