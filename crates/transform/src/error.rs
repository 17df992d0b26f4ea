//! Error types for the scatter-transform crate.

use scatter_filters::FilterError;
use scatter_fourier::FourierError;

/// Error type for all fallible operations in the scatter-transform crate.
///
/// Configuration variants are raised by [`Scattering2D::new`]; input
/// variants are raised by [`Scattering2D::transform`] before any filter is
/// applied.
///
/// [`Scattering2D::new`]: crate::Scattering2D::new
/// [`Scattering2D::transform`]: crate::Scattering2D::transform
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScatteringError {
    /// Returned when `J` is zero.
    #[error("number of scales J must be >= 1, got {0}")]
    InvalidScale(usize),

    /// Returned when `L` is zero.
    #[error("number of orientations L must be >= 1, got {0}")]
    InvalidOrientations(usize),

    /// Returned when the maximum order is outside `1..=max`.
    #[error("max_order must be between 1 and {max}, got {order}")]
    InvalidMaxOrder {
        /// Requested maximum order.
        order: usize,
        /// Largest supported order.
        max: usize,
    },

    /// Returned when `2^J` exceeds a side of the unpadded input.
    #[error("2^J = 2^{j} exceeds input shape {rows}x{cols}")]
    ScaleExceedsShape {
        /// Requested number of scales.
        j: usize,
        /// Input rows.
        rows: usize,
        /// Input columns.
        cols: usize,
    },

    /// Returned when cropping would leave no output pixels.
    #[error("padded shape {rows}x{cols} at scale 2^{j} leaves no output after cropping")]
    OutputTooSmall {
        /// Number of scales.
        j: usize,
        /// Padded rows.
        rows: usize,
        /// Padded columns.
        cols: usize,
    },

    /// Returned when the channel count, or the output size of one plane,
    /// does not fit in `usize`.
    #[error("J={j}, L={l}, max_order={max_order} gives more output values than can be addressed")]
    TooManyChannels {
        /// Number of scales.
        j: usize,
        /// Number of orientations.
        l: usize,
        /// Maximum scattering order.
        max_order: usize,
    },

    /// Returned when the input has fewer than two dimensions.
    #[error("input must have at least 2 dimensions, got {ndim}")]
    RankTooLow {
        /// Number of input dimensions.
        ndim: usize,
    },

    /// Returned when the input is not in contiguous row-major layout.
    #[error("input must be contiguous in row-major layout")]
    NonContiguous,

    /// Returned when unpadded input has the wrong spatial size.
    #[error("input must be of spatial size {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Actual `(rows, cols)`.
        got: (usize, usize),
    },

    /// Returned when pre-padded input has the wrong spatial size.
    #[error("padded input must be of spatial size {expected:?}, got {got:?}")]
    PaddedShapeMismatch {
        /// Expected padded `(rows, cols)`.
        expected: (usize, usize),
        /// Actual `(rows, cols)`.
        got: (usize, usize),
    },

    /// Returned when the input contains NaN or infinity.
    #[error("input contains non-finite values")]
    NonFiniteInput,


    /// Wraps a filter bank construction failure.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Wraps a Fourier primitive failure.
    #[error(transparent)]
    Fourier(#[from] FourierError),

    /// Wraps an array reshaping failure.
    #[error("array layout error: {0}")]
    Layout(#[from] ndarray::ShapeError),
}

impl ScatteringError {
    /// Returns `true` for errors raised while validating the configuration.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidScale(_)
                | Self::InvalidOrientations(_)
                | Self::InvalidMaxOrder { .. }
                | Self::ScaleExceedsShape { .. }
                | Self::OutputTooSmall { .. }
                | Self::TooManyChannels { .. }
                | Self::Filter(_)
        )
    }

    /// Returns `true` for errors raised while validating an input array.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::RankTooLow { .. }
                | Self::NonContiguous
                | Self::ShapeMismatch { .. }
                | Self::PaddedShapeMismatch { .. }
                | Self::NonFiniteInput
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_scale() {
        let err = ScatteringError::InvalidScale(0);
        assert_eq!(err.to_string(), "number of scales J must be >= 1, got 0");
        assert!(err.is_config());
    }

    #[test]
    fn error_invalid_max_order() {
        let err = ScatteringError::InvalidMaxOrder { order: 5, max: 4 };
        assert_eq!(err.to_string(), "max_order must be between 1 and 4, got 5");
    }

    #[test]
    fn error_scale_exceeds_shape() {
        let err = ScatteringError::ScaleExceedsShape {
            j: 6,
            rows: 32,
            cols: 64,
        };
        assert_eq!(err.to_string(), "2^J = 2^6 exceeds input shape 32x64");
        assert!(err.is_config());
        assert!(!err.is_input());
    }

    #[test]
    fn error_too_many_channels() {
        let err = ScatteringError::TooManyChannels {
            j: 4,
            l: 1 << 20,
            max_order: 4,
        };
        assert_eq!(
            err.to_string(),
            "J=4, L=1048576, max_order=4 gives more output values than can be addressed"
        );
        assert!(err.is_config());
        assert!(!err.is_input());
    }

    #[test]
    fn error_rank_too_low() {
        let err = ScatteringError::RankTooLow { ndim: 1 };
        assert_eq!(err.to_string(), "input must have at least 2 dimensions, got 1");
        assert!(err.is_input());
    }

    #[test]
    fn error_shape_mismatch() {
        let err = ScatteringError::ShapeMismatch {
            expected: (32, 32),
            got: (31, 32),
        };
        assert_eq!(
            err.to_string(),
            "input must be of spatial size (32, 32), got (31, 32)"
        );
    }

    #[test]
    fn error_padded_shape_mismatch() {
        let err = ScatteringError::PaddedShapeMismatch {
            expected: (36, 36),
            got: (32, 32),
        };
        assert_eq!(
            err.to_string(),
            "padded input must be of spatial size (36, 36), got (32, 32)"
        );
    }

    #[test]
    fn error_from_filter_is_transparent() {
        let err: ScatteringError = FilterError::InvalidOrientationCount(0).into();
        assert_eq!(err.to_string(), "number of orientations must be >= 1, got 0");
        assert!(err.is_config());
    }

    #[test]
    fn error_from_fourier_is_transparent() {
        let err: ScatteringError = FourierError::InvalidFactor {
            factor: 3,
            rows: 4,
            cols: 4,
        }
        .into();
        assert_eq!(err.to_string(), "invalid periodization factor 3 for grid 4x4");
        assert!(!err.is_config() && !err.is_input());
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<ScatteringError>();
    }
}
