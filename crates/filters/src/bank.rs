//! Multiresolution filter bank: oriented Morlet band-pass filters and a
//! Gaussian low-pass filter, stored in the frequency domain.

use std::f64::consts::PI;

use ndarray::Array2;
use rayon::prelude::*;
use scatter_fourier::FourierBackend;
use tracing::debug;

use crate::error::FilterError;
use crate::gabor::{gabor_2d, morlet_2d};
use crate::periodize::periodize_filter;

/// Envelope width of the finest wavelet, in pixels.
const SIGMA0: f64 = 0.8;
/// Center frequency of the finest wavelet, in radians per pixel.
const XI0: f64 = 3.0 * PI / 4.0;
/// Number of orientations the slant constant is tuned for.
const CANONICAL_ORIENTATIONS: f64 = 4.0;

/// Storage precision of filter coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 64-bit floating point.
    #[default]
    Double,
    /// Coefficients rounded through 32-bit floating point.
    Single,
}

impl Precision {
    /// Rounds `value` to this precision.
    pub fn round(self, value: f64) -> f64 {
        match self {
            Self::Double => value,
            Self::Single => value as f32 as f64,
        }
    }

    /// Rounds every element of `array` to this precision.
    pub fn round_array(self, array: &Array2<f64>) -> Array2<f64> {
        match self {
            Self::Double => array.clone(),
            Self::Single => array.mapv(|v| self.round(v)),
        }
    }
}

/// An oriented band-pass filter at one dyadic scale.
///
/// `levels[k]` is the filter on the frequency grid subsampled by `2^k`, for
/// `k = 0..=scale`.
#[derive(Clone, Debug)]
pub struct Wavelet {
    scale: usize,
    orientation: usize,
    angle: f64,
    levels: Vec<Array2<f64>>,
}

impl Wavelet {
    /// Dyadic scale index `j`.
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Orientation index `θ`.
    pub fn orientation(&self) -> usize {
        self.orientation
    }

    /// Orientation angle in radians, in `(-π/2, π/2]` for the canonical bank.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Returns the filter at `resolution`, if stored.
    pub fn at(&self, resolution: usize) -> Option<&Array2<f64>> {
        self.levels.get(resolution)
    }

    /// Returns the filter at `resolution`.
    ///
    /// # Panics
    ///
    /// Panics if `resolution > scale`.
    pub fn level(&self, resolution: usize) -> &Array2<f64> {
        &self.levels[resolution]
    }

    /// Number of stored resolutions (`scale + 1`).
    pub fn n_resolutions(&self) -> usize {
        self.levels.len()
    }
}

/// The Gaussian low-pass filter at the coarsest scale `J`.
///
/// `levels[k]` is the filter on the grid subsampled by `2^k`, `k = 0..J`.
#[derive(Clone, Debug)]
pub struct LowPass {
    scale: usize,
    levels: Vec<Array2<f64>>,
}

impl LowPass {
    /// Scale of the averaging window (`J`).
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Returns the filter at `resolution`, if stored.
    pub fn at(&self, resolution: usize) -> Option<&Array2<f64>> {
        self.levels.get(resolution)
    }

    /// Returns the filter at `resolution`.
    ///
    /// # Panics
    ///
    /// Panics if `resolution >= J`.
    pub fn level(&self, resolution: usize) -> &Array2<f64> {
        &self.levels[resolution]
    }

    /// Number of stored resolutions (`J`).
    pub fn n_resolutions(&self) -> usize {
        self.levels.len()
    }
}

/// All filters a scattering cascade needs, for one padded grid size.
///
/// Wavelets are ordered by scale, then orientation: the wavelet with scale
/// `j` and orientation `θ` sits at index `j·L + θ`.
///
/// # Example
///
/// ```
/// use scatter_filters::FilterBank;
/// use scatter_fourier::BackendKind;
///
/// let backend = BackendKind::RustFft.build();
/// let bank = FilterBank::new(32, 32, 2, 8, backend.as_ref()).unwrap();
/// assert_eq!(bank.wavelets().len(), 16);
/// assert_eq!(bank.low_pass().n_resolutions(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct FilterBank {
    shape: (usize, usize),
    n_scales: usize,
    n_orientations: usize,
    wavelets: Vec<Wavelet>,
    low_pass: LowPass,
    precision: Precision,
}

impl FilterBank {
    /// Builds the filter bank for a `rows × cols` padded grid.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FilterError::InvalidScaleCount`] | `n_scales == 0` |
    /// | [`FilterError::InvalidOrientationCount`] | `n_orientations == 0` |
    /// | [`FilterError::GridNotDivisible`] | a side is zero or not a multiple of `2^n_scales` |
    #[tracing::instrument(skip(backend), fields(backend = backend.name()))]
    pub fn new(
        rows: usize,
        cols: usize,
        n_scales: usize,
        n_orientations: usize,
        backend: &dyn FourierBackend,
    ) -> Result<Self, FilterError> {
        validate_grid(rows, cols, n_scales, n_orientations)?;

        let wavelets = (0..n_scales * n_orientations)
            .into_par_iter()
            .map(|index| {
                let scale = index / n_orientations;
                let orientation = index % n_orientations;
                build_wavelet(rows, cols, scale, orientation, n_orientations, backend)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let low_pass = build_low_pass(rows, cols, n_scales, backend)?;

        debug!(
            n_wavelets = wavelets.len(),
            n_low_pass_levels = low_pass.n_resolutions(),
            "filter bank built"
        );

        Ok(Self {
            shape: (rows, cols),
            n_scales,
            n_orientations,
            wavelets,
            low_pass,
            precision: Precision::Double,
        })
    }

    /// Padded grid shape `(rows, cols)` at resolution 0.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of scales `J`.
    pub fn n_scales(&self) -> usize {
        self.n_scales
    }

    /// Number of orientations `L`.
    pub fn n_orientations(&self) -> usize {
        self.n_orientations
    }

    /// All band-pass filters, scale-major.
    pub fn wavelets(&self) -> &[Wavelet] {
        &self.wavelets
    }

    /// The band-pass filter at `(scale, orientation)`.
    pub fn wavelet(&self, scale: usize, orientation: usize) -> Option<&Wavelet> {
        if scale >= self.n_scales || orientation >= self.n_orientations {
            return None;
        }
        self.wavelets.get(scale * self.n_orientations + orientation)
    }

    /// The low-pass filter.
    pub fn low_pass(&self) -> &LowPass {
        &self.low_pass
    }

    /// Precision the coefficients are currently stored at.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns a copy of the bank with every stored filter at `precision`.
    ///
    /// Migrating to [`Precision::Single`] rounds coefficients through `f32`;
    /// migrating back to [`Precision::Double`] keeps the rounded values.
    pub fn migrate(&self, precision: Precision) -> Self {
        let round_levels = |levels: &[Array2<f64>]| -> Vec<Array2<f64>> {
            levels.iter().map(|a| precision.round_array(a)).collect()
        };
        Self {
            shape: self.shape,
            n_scales: self.n_scales,
            n_orientations: self.n_orientations,
            wavelets: self
                .wavelets
                .iter()
                .map(|w| Wavelet {
                    scale: w.scale,
                    orientation: w.orientation,
                    angle: w.angle,
                    levels: round_levels(&w.levels),
                })
                .collect(),
            low_pass: LowPass {
                scale: self.low_pass.scale,
                levels: round_levels(&self.low_pass.levels),
            },
            precision,
        }
    }
}

fn validate_grid(
    rows: usize,
    cols: usize,
    n_scales: usize,
    n_orientations: usize,
) -> Result<(), FilterError> {
    if n_scales == 0 {
        return Err(FilterError::InvalidScaleCount(n_scales));
    }
    if n_orientations == 0 {
        return Err(FilterError::InvalidOrientationCount(n_orientations));
    }
    let divisible = u32::try_from(n_scales)
        .ok()
        .and_then(|s| 1usize.checked_shl(s))
        .is_some_and(|f| rows >= f && cols >= f && rows % f == 0 && cols % f == 0);
    if !divisible {
        return Err(FilterError::GridNotDivisible {
            rows,
            cols,
            n_scales,
        });
    }
    Ok(())
}

/// Orientation angle for index `orientation` out of `n`.
///
/// Angles are spaced by `π / n` and decrease with the index, starting from
/// `trunc(n - n/2 - 1) · π / n`.
pub fn orientation_angle(orientation: usize, n: usize) -> f64 {
    let n_f = n as f64;
    let first = (n_f - n_f / 2.0 - 1.0).trunc();
    (first - orientation as f64) * PI / n_f
}

fn build_wavelet(
    rows: usize,
    cols: usize,
    scale: usize,
    orientation: usize,
    n_orientations: usize,
    backend: &dyn FourierBackend,
) -> Result<Wavelet, FilterError> {
    let dilation = (1u64 << scale) as f64;
    let angle = orientation_angle(orientation, n_orientations);
    let slant = CANONICAL_ORIENTATIONS / n_orientations as f64;
    let spatial = morlet_2d(
        rows,
        cols,
        SIGMA0 * dilation,
        angle,
        XI0 / dilation,
        slant,
    );
    let spectrum = backend.fft2(&spatial).mapv(|c| c.re);
    let levels = (0..=scale)
        .map(|res| periodize_filter(&spectrum, res))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Wavelet {
        scale,
        orientation,
        angle,
        levels,
    })
}

fn build_low_pass(
    rows: usize,
    cols: usize,
    n_scales: usize,
    backend: &dyn FourierBackend,
) -> Result<LowPass, FilterError> {
    let sigma = SIGMA0 * (1u64 << (n_scales - 1)) as f64;
    let spatial = gabor_2d(rows, cols, sigma, 0.0, 0.0, 1.0);
    let spectrum = backend.fft2(&spatial).mapv(|c| c.re);
    let levels = (0..n_scales)
        .map(|res| periodize_filter(&spectrum, res))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LowPass {
        scale: n_scales,
        levels,
    })
}
