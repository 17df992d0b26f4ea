//! # scatter-filters
//!
//! Frequency-domain filter bank for the 2D scattering transform.
//!
//! ## Construction Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["morlet_2d / gabor_2d"] -->|"fft2, real part"| B["spectrum"]
//!     B -->|"periodize_filter(res)"| C["levels[0..]"]
//!     C --> D["Wavelet / LowPass"]
//!     D --> E["FilterBank"]
//! ```
//!
//! ## Filters
//!
//! | Filter | Count | Spatial form | Stored resolutions |
//! |--------|-------|--------------|--------------------|
//! | [`Wavelet`] `(j, θ)` | `J·L` | Morlet, `σ = 0.8·2^j`, `ξ = 3π/(4·2^j)`, slant `4/L` | `0..=j` |
//! | [`LowPass`] | 1 | Gaussian, `σ = 0.8·2^(J-1)` | `0..J` |
//!
//! The slant constant makes `L = 8` the canonical configuration.

mod bank;
mod error;
mod gabor;
mod periodize;

pub use bank::{FilterBank, LowPass, Precision, Wavelet, orientation_angle};
pub use error::FilterError;
pub use gabor::{gabor_2d, morlet_2d};
pub use periodize::periodize_filter;
