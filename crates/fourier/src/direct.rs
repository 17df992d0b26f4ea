//! Direct (matrix) DFT backend.

use std::f64::consts::PI;

use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;

use crate::backend::FourierBackend;

/// Separable DFT computed by direct summation along each axis.
///
/// Costs `O(R·C·(R + C))` per transform and shares no state between calls,
/// which makes it a slow but independent reference for [`RustFftBackend`].
///
/// [`RustFftBackend`]: crate::RustFftBackend
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectBackend;

impl DirectBackend {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

/// `sign = -1` for the forward transform, `+1` for the inverse.
fn dft_matrix(n: usize, sign: f64) -> Array2<Complex64> {
    Array2::from_shape_fn((n, n), |(k, m)| {
        // Reduce k·m modulo n before scaling to keep the phase accurate.
        let phase = sign * 2.0 * PI * ((k * m) % n) as f64 / n as f64;
        Complex64::from_polar(1.0, phase)
    })
}

fn transform(input: &Array2<Complex64>, sign: f64) -> Array2<Complex64> {
    let (rows, cols) = input.dim();
    if rows == 0 || cols == 0 {
        return input.to_owned();
    }
    let row_matrix = dft_matrix(rows, sign);
    let col_matrix = dft_matrix(cols, sign);

    // Columns first: X = F_rows · x, then X · F_cols (F_cols is symmetric).
    let mut out = Array2::<Complex64>::zeros((rows, cols));
    for (k, mut out_row) in out.axis_iter_mut(Axis(0)).enumerate() {
        let weights = row_matrix.row(k);
        let mut acc = Array1::<Complex64>::zeros(cols);
        for (m, in_row) in input.axis_iter(Axis(0)).enumerate() {
            let w = weights[m];
            acc.zip_mut_with(&in_row, |a, &x| *a += w * x);
        }
        for (l, slot) in out_row.iter_mut().enumerate() {
            *slot = acc
                .iter()
                .zip(col_matrix.column(l).iter())
                .map(|(&a, &w)| a * w)
                .sum();
        }
    }
    out
}

impl FourierBackend for DirectBackend {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn fft2(&self, signal: &Array2<Complex64>) -> Array2<Complex64> {
        transform(signal, -1.0)
    }

    fn ifft2(&self, spectrum: &Array2<Complex64>) -> Array2<Complex64> {
        let (rows, cols) = spectrum.dim();
        let mut out = transform(spectrum, 1.0);
        if rows > 0 && cols > 0 {
            let norm = 1.0 / (rows * cols) as f64;
            out.mapv_inplace(|c| c * norm);
        }
        out
    }
}
