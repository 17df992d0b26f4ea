//! The Fourier capability interface and backend selection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ndarray::Array2;
use num_complex::Complex64;
use tracing::info;

use crate::direct::DirectBackend;
use crate::error::FourierError;
use crate::fft::RustFftBackend;
use crate::ops;

/// Numeric operations the scattering cascade needs from a tensor engine.
///
/// Every operation acts on a single 2D plane. Transforms follow the usual
/// convention: the forward transform is unnormalized and the inverse is
/// scaled by `1 / (rows · cols)`, so `ifft2(fft2(x)) == x`.
///
/// Only [`fft2`](Self::fft2) and [`ifft2`](Self::ifft2) are required; the
/// pointwise operations have shared default implementations.
pub trait FourierBackend: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Forward 2D FFT of a complex plane.
    fn fft2(&self, signal: &Array2<Complex64>) -> Array2<Complex64>;

    /// Inverse 2D FFT of a complex spectrum.
    fn ifft2(&self, spectrum: &Array2<Complex64>) -> Array2<Complex64>;

    /// Forward 2D FFT of a real plane.
    fn fft2_real(&self, signal: &Array2<f64>) -> Array2<Complex64> {
        self.fft2(&ops::to_complex(signal))
    }

    /// Inverse 2D FFT keeping only the real part.
    ///
    /// Use when the caller knows the result is real-valued.
    fn ifft2_real(&self, spectrum: &Array2<Complex64>) -> Array2<f64> {
        self.ifft2(spectrum).mapv(|c| c.re)
    }

    /// Applies a real frequency-domain filter to a spectrum.
    fn multiply(
        &self,
        spectrum: &Array2<Complex64>,
        filter: &Array2<f64>,
    ) -> Result<Array2<Complex64>, FourierError> {
        ops::multiply(spectrum, filter)
    }

    /// Complex magnitude.
    fn modulus(&self, signal: &Array2<Complex64>) -> Array2<f64> {
        ops::modulus(signal)
    }

    /// Frequency-domain subsampling by periodization.
    fn periodize(
        &self,
        spectrum: &Array2<Complex64>,
        factor: usize,
    ) -> Result<Array2<Complex64>, FourierError> {
        ops::periodize(spectrum, factor)
    }
}

/// Selects which [`FourierBackend`] implementation to construct.
///
/// # Example
///
/// ```
/// use scatter_fourier::BackendKind;
///
/// let kind: BackendKind = "rustfft".parse().unwrap();
/// let backend = kind.build();
/// assert_eq!(backend.name(), "rustfft");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Planned mixed-radix FFT from `rustfft`.
    #[default]
    RustFft,
    /// Separable direct DFT. Quadratic per axis; intended for cross-checks.
    Direct,
}

impl BackendKind {
    /// Returns the canonical name of this backend.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RustFft => "rustfft",
            Self::Direct => "direct",
        }
    }

    /// Parses a backend from a case-insensitive name.
    ///
    /// # Supported Names
    ///
    /// | Input | Backend |
    /// |-------|---------|
    /// | `"rustfft"`, `"fft"` | [`BackendKind::RustFft`] |
    /// | `"direct"`, `"dft"` | [`BackendKind::Direct`] |
    ///
    /// # Errors
    ///
    /// Returns [`FourierError::UnknownBackend`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, FourierError> {
        match name.to_lowercase().as_str() {
            "rustfft" | "fft" => Ok(Self::RustFft),
            "direct" | "dft" => Ok(Self::Direct),
            _ => Err(FourierError::UnknownBackend(name.to_string())),
        }
    }

    /// Constructs the selected backend.
    pub fn build(self) -> Arc<dyn FourierBackend> {
        let backend: Arc<dyn FourierBackend> = match self {
            Self::RustFft => Arc::new(RustFftBackend::new()),
            Self::Direct => Arc::new(DirectBackend::new()),
        };
        info!(backend = backend.name(), "fourier backend selected");
        backend
    }
}

impl FromStr for BackendKind {
    type Err = FourierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
