//! # scatter-fourier
//!
//! Fourier-domain primitives consumed by the scattering cascade: forward and
//! inverse 2D FFTs, filtering by pointwise multiplication, complex modulus,
//! and subsampling by periodization.
//!
//! The cascade only talks to the [`FourierBackend`] trait. A concrete
//! backend is chosen once through [`BackendKind::build`]:
//!
//! | Backend | Algorithm | Use |
//! |---------|-----------|-----|
//! | [`BackendKind::RustFft`] | planned mixed-radix FFT | default |
//! | [`BackendKind::Direct`] | direct separable DFT | reference / cross-checks |
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::Array2;
//! use scatter_fourier::BackendKind;
//!
//! let backend = BackendKind::RustFft.build();
//! let image = Array2::<f64>::ones((8, 8));
//! let spectrum = backend.fft2_real(&image);
//! let half = backend.periodize(&spectrum, 2).unwrap();
//! let subsampled = backend.ifft2_real(&half);
//! assert_eq!(subsampled.dim(), (4, 4));
//! ```

mod backend;
mod direct;
mod error;
mod fft;
pub mod ops;

pub use backend::{BackendKind, FourierBackend};
pub use direct::DirectBackend;
pub use error::FourierError;
pub use fft::RustFftBackend;
pub use num_complex::Complex64;
