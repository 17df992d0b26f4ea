//! Backend-independent pointwise operations on 2D spectra.
//!
//! These are shared by every [`FourierBackend`](crate::FourierBackend)
//! through the trait's default methods.

use ndarray::{Array2, Zip};
use num_complex::Complex64;

use crate::error::FourierError;

/// Multiplies a complex spectrum pointwise by a real filter.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`FourierError::ShapeMismatch`] | `spectrum` and `filter` differ in shape |
pub fn multiply(
    spectrum: &Array2<Complex64>,
    filter: &Array2<f64>,
) -> Result<Array2<Complex64>, FourierError> {
    if spectrum.dim() != filter.dim() {
        return Err(FourierError::ShapeMismatch {
            signal: spectrum.dim(),
            filter: filter.dim(),
        });
    }
    Ok(Zip::from(spectrum)
        .and(filter)
        .map_collect(|&s, &f| s * f))
}

/// Complex magnitude of every element.
pub fn modulus(signal: &Array2<Complex64>) -> Array2<f64> {
    signal.mapv(|c| c.norm())
}

/// Subsamples a spectrum by `factor` along both axes by periodization.
///
/// Output element `(r, c)` is the mean of the `factor × factor` aliases
/// `(r + i·R/factor, c + j·C/factor)`. With an unnormalized forward FFT and
/// a `1/(R·C)`-normalized inverse, the inverse transform of the result equals
/// the spatial signal sampled every `factor` pixels.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`FourierError::InvalidFactor`] | `factor == 0` or `factor` does not divide both axes |
pub fn periodize(
    spectrum: &Array2<Complex64>,
    factor: usize,
) -> Result<Array2<Complex64>, FourierError> {
    let (rows, cols) = spectrum.dim();
    if factor == 0 || rows % factor != 0 || cols % factor != 0 {
        return Err(FourierError::InvalidFactor { factor, rows, cols });
    }
    if factor == 1 {
        return Ok(spectrum.clone());
    }

    let out_rows = rows / factor;
    let out_cols = cols / factor;
    let scale = 1.0 / (factor * factor) as f64;

    Ok(Array2::from_shape_fn((out_rows, out_cols), |(r, c)| {
        let mut acc = Complex64::new(0.0, 0.0);
        for i in 0..factor {
            for j in 0..factor {
                acc += spectrum[[r + i * out_rows, c + j * out_cols]];
            }
        }
        acc * scale
    }))
}

/// Lifts a real plane to complex with zero imaginary part.
pub fn to_complex(signal: &Array2<f64>) -> Array2<Complex64> {
    signal.mapv(|v| Complex64::new(v, 0.0))
}
