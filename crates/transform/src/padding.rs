//! Boundary handling: reflection padding before the cascade and cropping after.

use ndarray::{Array2, ArrayView2, s};
use scatter_filters::Precision;

/// Pixels cropped from each side of every output map.
pub const CROP_MARGIN: usize = 1;

/// Pad widths on each side of a 2D signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PadWidths {
    /// Rows added above.
    pub top: usize,
    /// Rows added below.
    pub bottom: usize,
    /// Columns added on the left.
    pub left: usize,
    /// Columns added on the right.
    pub right: usize,
}

impl PadWidths {
    /// Splits the size difference evenly, putting the extra pixel after.
    pub fn between(input: (usize, usize), padded: (usize, usize)) -> Self {
        let rows = padded.0.saturating_sub(input.0);
        let cols = padded.1.saturating_sub(input.1);
        Self {
            top: rows / 2,
            bottom: rows - rows / 2,
            left: cols / 2,
            right: cols - cols / 2,
        }
    }
}

/// Maps an out-of-range index onto `0..n` by mirroring about the edges,
/// without repeating the edge sample.
fn reflect_index(index: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let folded = index.rem_euclid(period);
    if folded < n as isize {
        folded as usize
    } else {
        (period - folded) as usize
    }
}

/// Reflection-pads `signal` by `widths`.
///
/// Pads wider than the signal fold back repeatedly.
pub fn reflect_pad(signal: &ArrayView2<f64>, widths: PadWidths) -> Array2<f64> {
    let (rows, cols) = signal.dim();
    let out_rows = rows + widths.top + widths.bottom;
    let out_cols = cols + widths.left + widths.right;
    Array2::from_shape_fn((out_rows, out_cols), |(r, c)| {
        let src_r = reflect_index(r as isize - widths.top as isize, rows);
        let src_c = reflect_index(c as isize - widths.left as isize, cols);
        signal[[src_r, src_c]]
    })
}

/// Crops [`CROP_MARGIN`] pixels from every side.
///
/// A map with no more than `2 · CROP_MARGIN` pixels along an axis crops to an
/// empty axis.
pub fn unpad(signal: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = signal.dim();
    if rows <= 2 * CROP_MARGIN || cols <= 2 * CROP_MARGIN {
        return Array2::zeros((0, 0));
    }
    let row_end = rows - CROP_MARGIN;
    let col_end = cols - CROP_MARGIN;
    signal
        .slice(s![CROP_MARGIN..row_end, CROP_MARGIN..col_end])
        .to_owned()
}

/// Prepares one input plane for the cascade.
///
/// Holds the pad widths and the working precision so both can migrate
/// together with the filter bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    widths: PadWidths,
    pre_pad: bool,
    precision: Precision,
}

impl Padding {
    /// Creates a boundary handler.
    pub fn new(widths: PadWidths, pre_pad: bool) -> Self {
        Self {
            widths,
            pre_pad,
            precision: Precision::Double,
        }
    }

    /// Pad widths applied when the input is not pre-padded.
    pub fn widths(&self) -> PadWidths {
        self.widths
    }

    /// Whether inputs arrive pre-padded.
    pub fn pre_pad(&self) -> bool {
        self.pre_pad
    }

    /// Working precision of padded planes.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns a copy working at `precision`.
    pub fn migrate(&self, precision: Precision) -> Self {
        Self { precision, ..*self }
    }

    /// Pads `plane` (unless pre-padded) and rounds it to the working precision.
    pub fn pad(&self, plane: &ArrayView2<f64>) -> Array2<f64> {
        let mut padded = if self.pre_pad {
            plane.to_owned()
        } else {
            reflect_pad(plane, self.widths)
        };
        if self.precision != Precision::Double {
            let precision = self.precision;
            padded.mapv_inplace(|v| precision.round(v));
        }
        padded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn reflect_index_mirrors_without_edge_repeat() {
        // n = 4: ... 2 1 | 0 1 2 3 | 2 1 0 1 ...
        let mapped: Vec<usize> = (-3..8).map(|i| reflect_index(i, 4)).collect();
        assert_eq!(mapped, vec![3, 2, 1, 0, 1, 2, 3, 2, 1, 0, 1]);
    }

    #[test]
    fn reflect_index_single_sample() {
        assert_eq!(reflect_index(-5, 1), 0);
        assert_eq!(reflect_index(7, 1), 0);
    }

    #[test]
    fn reflect_pad_small_example() {
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let widths = PadWidths {
            top: 1,
            bottom: 0,
            left: 1,
            right: 2,
        };
        let padded = reflect_pad(&x.view(), widths);
        let expected = array![
            [5.0, 4.0, 5.0, 6.0, 5.0, 4.0],
            [2.0, 1.0, 2.0, 3.0, 2.0, 1.0],
            [5.0, 4.0, 5.0, 6.0, 5.0, 4.0],
        ];
        assert_eq!(padded, expected);
    }

    #[test]
    fn reflect_pad_keeps_interior() {
        let x = Array2::from_shape_fn((5, 7), |(r, c)| (r * 7 + c) as f64);
        let widths = PadWidths::between((5, 7), (8, 8));
        let padded = reflect_pad(&x.view(), widths);
        assert_eq!(padded.dim(), (8, 8));
        let interior = padded.slice(s![1..6, 0..7]);
        assert_eq!(interior, x);
    }

    #[test]
    fn pad_widths_split() {
        let w = PadWidths::between((29, 32), (32, 40));
        assert_eq!(
            w,
            PadWidths {
                top: 1,
                bottom: 2,
                left: 4,
                right: 4
            }
        );
    }

    #[test]
    fn unpad_crops_one_pixel_per_side() {
        let x = Array2::from_shape_fn((5, 6), |(r, c)| (r * 6 + c) as f64);
        let cropped = unpad(&x);
        assert_eq!(cropped.dim(), (3, 4));
        assert_eq!(cropped[[0, 0]], x[[1, 1]]);
        assert_eq!(cropped[[2, 3]], x[[3, 4]]);
    }

    #[test]
    fn unpad_tiny_map_is_empty() {
        let x = Array2::<f64>::ones((2, 2));
        assert_eq!(unpad(&x).len(), 0);
    }

    #[test]
    fn pre_pad_passes_through() {
        let x = array![[0.1, 0.2], [0.3, 0.4]];
        let padding = Padding::new(PadWidths::default(), true);
        assert_eq!(padding.pad(&x.view()), x);
    }

    #[test]
    fn single_precision_rounds_plane() {
        let x = array![[0.1, 1.0 / 3.0]];
        let padding = Padding::new(PadWidths::default(), true).migrate(Precision::Single);
        let padded = padding.pad(&x.view());
        assert_eq!(padded[[0, 0]], 0.1f32 as f64);
        assert_eq!(padded[[0, 1]], (1.0f32 / 3.0) as f64);
        assert_eq!(padding.precision(), Precision::Single);
    }
}
