//! Shape planning: padded grid, pad widths, output shape and channel layout.

use crate::config::ScatteringConfig;
use crate::error::ScatteringError;
use crate::padding::{CROP_MARGIN, PadWidths};

/// Number of order-`order` channels: `L^order · C(J, order)`, or `None`
/// when it overflows `usize`.
///
/// Order 0 always has exactly one channel; orders above `J` have none
/// because scales must strictly increase along a path.
///
/// ```
/// use scatter_transform::order_size;
///
/// assert_eq!(order_size(2, 8, 0), Some(1));
/// assert_eq!(order_size(2, 8, 1), Some(16));
/// assert_eq!(order_size(2, 8, 2), Some(64));
/// assert_eq!(order_size(2, 8, 3), Some(0));
/// ```
pub fn order_size(j: usize, l: usize, order: usize) -> Option<usize> {
    let choose = binomial(j, order)?;
    if choose == 0 {
        return Some(0);
    }
    let exponent = u32::try_from(order).ok()?;
    choose.checked_mul(l.checked_pow(exponent)?)
}

/// Total channel count `Σ_{k=0..=max_order} L^k · C(J, k)`, or `None` on
/// overflow.
pub fn channel_count(j: usize, l: usize, max_order: usize) -> Option<usize> {
    (0..=max_order).try_fold(0usize, |total, k| total.checked_add(order_size(j, l, k)?))
}

fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    // Each partial product is itself a binomial coefficient, so division is exact.
    (0..k).try_fold(1usize, |acc, i| Some(acc.checked_mul(n - i)? / (i + 1)))
}

/// Smallest multiple of `window` that is at least `n`.
fn padded_size(n: usize, window: usize) -> usize {
    n.div_ceil(window) * window
}

/// Every shape derived from a validated [`ScatteringConfig`].
///
/// # Example
///
/// ```
/// use scatter_transform::{ScatteringConfig, ShapePlan};
///
/// let plan = ShapePlan::new(&ScatteringConfig::new(2, (30, 32))).unwrap();
/// assert_eq!(plan.padded_shape(), (32, 32));
/// assert_eq!(plan.output_shape(), (6, 6));
/// assert_eq!(plan.n_channels(), 81);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapePlan {
    j: usize,
    l: usize,
    max_order: usize,
    input: (usize, usize),
    padded: (usize, usize),
    pads: PadWidths,
    output: (usize, usize),
    sizes: Vec<usize>,
    offsets: Vec<usize>,
    n_channels: usize,
}

impl ShapePlan {
    /// Validates `config` and derives the shapes.
    ///
    /// # Errors
    ///
    /// Any error of [`ScatteringConfig::validate`], plus
    /// [`ScatteringError::OutputTooSmall`] when cropping `CROP_MARGIN` pixels
    /// from each side of the `padded / 2^J` grid leaves nothing, and
    /// [`ScatteringError::TooManyChannels`] when the `(D, Md, Nd)` output of
    /// one plane cannot be addressed.
    pub fn new(config: &ScatteringConfig) -> Result<Self, ScatteringError> {
        config.validate()?;
        let window = config
            .window()
            .ok_or(ScatteringError::InvalidScale(config.j()))?;
        let j = config.j();
        let (rows, cols) = config.shape();
        let padded = (padded_size(rows, window), padded_size(cols, window));

        let coarse = (padded.0 / window, padded.1 / window);
        if coarse.0 <= 2 * CROP_MARGIN || coarse.1 <= 2 * CROP_MARGIN {
            return Err(ScatteringError::OutputTooSmall {
                j,
                rows: padded.0,
                cols: padded.1,
            });
        }
        let output = (coarse.0 - 2 * CROP_MARGIN, coarse.1 - 2 * CROP_MARGIN);

        let l = config.orientations();
        let max_order = config.max_order();
        let too_many = || ScatteringError::TooManyChannels { j, l, max_order };
        let mut sizes = Vec::with_capacity(max_order + 1);
        let mut offsets = Vec::with_capacity(max_order + 1);
        let mut n_channels: usize = 0;
        for order in 0..=max_order {
            let size = order_size(j, l, order).ok_or_else(too_many)?;
            offsets.push(n_channels);
            sizes.push(size);
            n_channels = n_channels.checked_add(size).ok_or_else(too_many)?;
        }
        let per_plane = n_channels
            .checked_mul(output.0)
            .and_then(|n| n.checked_mul(output.1));
        if per_plane.is_none() {
            return Err(too_many());
        }

        Ok(Self {
            j,
            l,
            max_order,
            input: (rows, cols),
            padded,
            pads: PadWidths::between((rows, cols), padded),
            output,
            sizes,
            offsets,
            n_channels,
        })
    }

    /// Number of scales `J`.
    pub fn j(&self) -> usize {
        self.j
    }

    /// Number of orientations `L`.
    pub fn orientations(&self) -> usize {
        self.l
    }

    /// Maximum scattering order.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Unpadded spatial shape `(M, N)`.
    pub fn input_shape(&self) -> (usize, usize) {
        self.input
    }

    /// Padded spatial shape `(M_padded, N_padded)`.
    pub fn padded_shape(&self) -> (usize, usize) {
        self.padded
    }

    /// Pad widths added on each side of the input.
    pub fn pad_widths(&self) -> PadWidths {
        self.pads
    }

    /// Spatial output shape `(Md, Nd)`.
    pub fn output_shape(&self) -> (usize, usize) {
        self.output
    }

    /// Total channel count `D`.
    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    /// Channel count of a single order, or `0` above `max_order`.
    pub fn order_size(&self, order: usize) -> usize {
        self.sizes.get(order).copied().unwrap_or(0)
    }

    /// Index of the first channel of `order`, or `None` above `max_order`.
    pub fn order_offset(&self, order: usize) -> Option<usize> {
        self.offsets.get(order).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(0, 0), Some(1));
        assert_eq!(binomial(4, 2), Some(6));
        assert_eq!(binomial(5, 5), Some(1));
        assert_eq!(binomial(10, 3), Some(120));
        assert_eq!(binomial(2, 3), Some(0));
    }

    #[test]
    fn channel_count_matches_formula() {
        assert_eq!(channel_count(2, 8, 2), Some(1 + 16 + 64));
        assert_eq!(channel_count(3, 8, 2), Some(1 + 24 + 3 * 64));
        assert_eq!(channel_count(4, 2, 4), Some(1 + 8 + 6 * 4 + 4 * 8 + 16));
        assert_eq!(channel_count(1, 3, 2), Some(1 + 3));
    }

    #[test]
    fn channel_count_overflow_is_none() {
        assert_eq!(order_size(4, 1 << 20, 4), None);
        assert_eq!(channel_count(4, 1 << 20, 4), None);
        assert_eq!(order_size(4, usize::MAX, 1), None);
        // Orders above J contribute nothing, however large L is.
        assert_eq!(order_size(2, usize::MAX, 3), Some(0));
        assert_eq!(channel_count(1, usize::MAX, 2), None);
        assert_eq!(channel_count(1, usize::MAX - 1, 2), Some(usize::MAX));
    }

    #[test]
    fn rejects_unaddressable_channel_count() {
        let config = ScatteringConfig::new(4, (64, 64))
            .with_orientations(1 << 20)
            .with_max_order(4);
        assert!(config.validate().is_ok());
        let err = ShapePlan::new(&config).unwrap_err();
        assert!(matches!(
            err,
            ScatteringError::TooManyChannels {
                j: 4,
                l: 1_048_576,
                max_order: 4
            }
        ));
        assert!(err.is_config());
    }

    #[test]
    fn rejects_unaddressable_output_size() {
        // D = 1 + L fits in usize, but D · 6 · 6 does not.
        let config = ScatteringConfig::new(1, (16, 16))
            .with_orientations(usize::MAX / 4)
            .with_max_order(1);
        let err = ShapePlan::new(&config).unwrap_err();
        assert!(matches!(err, ScatteringError::TooManyChannels { .. }));
    }

    #[test]
    fn padded_size_rounds_up_to_window() {
        assert_eq!(padded_size(32, 4), 32);
        assert_eq!(padded_size(30, 4), 32);
        assert_eq!(padded_size(33, 8), 40);
    }

    #[test]
    fn plan_for_square_input() {
        let plan = ShapePlan::new(&ScatteringConfig::new(2, (32, 32))).unwrap();
        assert_eq!(plan.padded_shape(), (32, 32));
        assert_eq!(plan.pad_widths(), PadWidths::default());
        assert_eq!(plan.output_shape(), (6, 6));
        assert_eq!(plan.n_channels(), 81);
        assert_eq!(plan.order_offset(0), Some(0));
        assert_eq!(plan.order_offset(1), Some(1));
        assert_eq!(plan.order_offset(2), Some(17));
        assert_eq!(plan.order_offset(3), None);
    }

    #[test]
    fn plan_for_non_divisible_input() {
        let plan = ShapePlan::new(&ScatteringConfig::new(3, (37, 50))).unwrap();
        assert_eq!(plan.padded_shape(), (40, 56));
        let pads = plan.pad_widths();
        assert_eq!((pads.top, pads.bottom), (1, 2));
        assert_eq!((pads.left, pads.right), (3, 3));
        assert_eq!(plan.output_shape(), (3, 5));
    }

    #[test]
    fn rejects_empty_output() {
        let err = ShapePlan::new(&ScatteringConfig::new(2, (8, 32))).unwrap_err();
        assert!(matches!(
            err,
            ScatteringError::OutputTooSmall {
                j: 2,
                rows: 8,
                cols: 32
            }
        ));
    }

    #[test]
    fn order_sizes_beyond_max_order_are_zero() {
        let plan = ShapePlan::new(&ScatteringConfig::new(3, (32, 32)).with_max_order(1)).unwrap();
        assert_eq!(plan.order_size(1), 24);
        assert_eq!(plan.order_size(2), 0);
        assert_eq!(plan.n_channels(), 25);
    }
}
