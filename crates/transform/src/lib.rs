//! # scatter-transform
//!
//! Windowed 2D scattering transform: a cascade of wavelet convolutions and
//! complex moduli, each path averaged by a low-pass window of size `2^J` and
//! subsampled to the window's resolution.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["input (B..., M, N)"] -->|"reflect pad"| B["padded plane"]
//!     B -->|fft2| C["order 0 state"]
//!     C -->|"ψ(j1,θ1), |·|"| D["order 1 states"]
//!     D -->|"ψ(j2,θ2), j2 > j1, |·|"| E["order 2 states"]
//!     C & D & E -->|"φ, subsample 2^J, crop"| F["(B..., D, Md, Nd)"]
//! ```
//!
//! ## Channel Layout
//!
//! | Order | Channels | Offset |
//! |-------|----------|--------|
//! | 0 | 1 | 0 |
//! | 1 | `J·L` | 1 |
//! | 2 | `L²·C(J,2)` | `1 + J·L` |
//! | k | `L^k·C(J,k)` | sum of lower orders |
//!
//! Within an order, channels follow the lexicographic order of the wavelet
//! indices `j·L + θ` along the path. [`Scattering2D::paths`] lists them.
//!
//! ## Quick Start
//!
//! ```
//! use ndarray::Array2;
//! use scatter_transform::{Scattering2D, ScatteringConfig};
//!
//! let config = ScatteringConfig::new(2, (32, 32)).with_orientations(4);
//! let scattering = Scattering2D::new(&config).unwrap();
//! let image = Array2::from_shape_fn((32, 32), |(r, c)| ((r + c) % 7) as f64);
//! let s = scattering.transform_image(&image.view()).unwrap();
//! assert_eq!(s.dim(), (1 + 8 + 16, 6, 6));
//! ```

mod cascade;
mod config;
mod error;
mod padding;
mod path;
mod plan;
mod scattering;

pub use config::{MAX_ORDER, ScatteringConfig};
pub use error::ScatteringError;
pub use padding::{CROP_MARGIN, PadWidths, reflect_pad, unpad};
pub use path::{ScatteringPath, enumerate_paths};
pub use plan::{ShapePlan, channel_count, order_size};
pub use scatter_filters::Precision;
pub use scatter_fourier::BackendKind;
pub use scattering::Scattering2D;
