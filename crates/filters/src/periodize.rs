//! Resolution reduction of frequency-domain filters.

use std::ops::Range;

use ndarray::Array2;

use crate::error::FilterError;

/// Periodizes a real filter spectrum to resolution `resolution`.
///
/// The result lives on the `(rows / 2^res) × (cols / 2^res)` frequency grid a
/// signal has after being subsampled `res` times. The central band of high
/// frequencies that has no counterpart on the coarse grid is discarded, then
/// the `2^res × 2^res` aliases of every coarse bin are summed.
///
/// # Errors
///
/// Returns [`FilterError::ResolutionTooFine`] if `2^res` does not divide both
/// axes.
pub fn periodize_filter(
    spectrum: &Array2<f64>,
    resolution: usize,
) -> Result<Array2<f64>, FilterError> {
    let (rows, cols) = spectrum.dim();
    let too_fine = FilterError::ResolutionTooFine {
        resolution,
        rows,
        cols,
    };
    let factor = 1usize.checked_shl(resolution as u32).ok_or(too_fine.clone())?;
    if rows % factor != 0 || cols % factor != 0 {
        return Err(too_fine);
    }

    let out_rows = rows / factor;
    let out_cols = cols / factor;
    let row_band = discarded_band(rows, resolution);
    let col_band = discarded_band(cols, resolution);

    Ok(Array2::from_shape_fn((out_rows, out_cols), |(r, c)| {
        let mut acc = 0.0;
        for i in 0..factor {
            let rr = r + i * out_rows;
            if row_band.contains(&rr) {
                continue;
            }
            for j in 0..factor {
                let cc = c + j * out_cols;
                if !col_band.contains(&cc) {
                    acc += spectrum[[rr, cc]];
                }
            }
        }
        acc
    }))
}

/// Indices `[n / 2^(res+1), n / 2^(res+1) + n·(1 - 2^-res))` along one axis.
fn discarded_band(n: usize, resolution: usize) -> Range<usize> {
    if resolution == 0 {
        return 0..0;
    }
    let start = n >> (resolution + 1);
    let len = n - (n >> resolution);
    start..start + len
}
