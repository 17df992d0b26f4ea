//! Spatial Gabor and Morlet wavelets on a periodic 2D grid.
//!
//! Filters are centered at the origin of the grid and periodized by summing
//! over a `(2·TILES + 1)²` neighbourhood of copies, so their discrete Fourier
//! transform is (numerically) real.

use std::f64::consts::PI;

use ndarray::Array2;
use num_complex::Complex64;

/// Number of neighbouring grid copies summed on each side when periodizing.
const TILES: i64 = 2;

/// Anisotropic Gabor filter sampled on a `rows × cols` periodic grid.
///
/// The Gaussian envelope has width `sigma` along the direction `theta` and
/// `sigma / slant` across it; the carrier has angular frequency `xi` along
/// `theta`. Normalized by `2π·sigma² / slant`.
pub fn gabor_2d(
    rows: usize,
    cols: usize,
    sigma: f64,
    theta: f64,
    xi: f64,
    slant: f64,
) -> Array2<Complex64> {
    let (sin_t, cos_t) = theta.sin_cos();
    let slant2 = slant * slant;
    let denom = 2.0 * sigma * sigma;

    // R · diag(1, slant²) · R⁻¹ / (2σ²)
    let c_xx = (cos_t * cos_t + slant2 * sin_t * sin_t) / denom;
    let c_xy = 2.0 * cos_t * sin_t * (1.0 - slant2) / denom;
    let c_yy = (sin_t * sin_t + slant2 * cos_t * cos_t) / denom;

    let kx = xi * cos_t;
    let ky = xi * sin_t;
    let norm = 2.0 * PI * sigma * sigma / slant;
    let (m, n) = (rows as i64, cols as i64);

    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let mut acc = Complex64::new(0.0, 0.0);
        for ex in -TILES..=TILES {
            let x = (r as i64 + ex * m) as f64;
            for ey in -TILES..=TILES {
                let y = (c as i64 + ey * n) as f64;
                let envelope = -(c_xx * x * x + c_xy * x * y + c_yy * y * y);
                let phase = kx * x + ky * y;
                acc += Complex64::new(envelope, phase).exp();
            }
        }
        acc / norm
    })
}

/// Zero-mean Morlet wavelet: a Gabor minus its envelope scaled to cancel the mean.
pub fn morlet_2d(
    rows: usize,
    cols: usize,
    sigma: f64,
    theta: f64,
    xi: f64,
    slant: f64,
) -> Array2<Complex64> {
    let wave = gabor_2d(rows, cols, sigma, theta, xi, slant);
    let envelope = gabor_2d(rows, cols, sigma, theta, 0.0, slant);
    let k = wave.sum() / envelope.sum();
    wave - envelope.mapv(|e| e * k)
}
