//! Error types for the scatter-fourier crate.

/// Error type for all fallible operations in the scatter-fourier crate.
///
/// These errors indicate that two operands disagree on their grid, which
/// only happens when a caller mixes filters and signals from different
/// resolutions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FourierError {
    /// Returned when a signal and a filter have different shapes.
    #[error("shape mismatch: signal is {signal:?}, filter is {filter:?}")]
    ShapeMismatch {
        /// Shape of the signal (rows, cols).
        signal: (usize, usize),
        /// Shape of the filter (rows, cols).
        filter: (usize, usize),
    },

    /// Returned when a periodization factor is zero or does not divide the grid.
    #[error("invalid periodization factor {factor} for grid {rows}x{cols}")]
    InvalidFactor {
        /// Requested subsampling factor.
        factor: usize,
        /// Number of rows in the spectrum.
        rows: usize,
        /// Number of columns in the spectrum.
        cols: usize,
    },

    /// Returned when an unknown backend name is requested.
    #[error("unknown fourier backend: {0}")]
    UnknownBackend(String),
}
