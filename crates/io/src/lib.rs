//! # scatter-io
//!
//! Read signals from JSON into `ndarray` arrays and write scattering
//! coefficients back out as JSON with one label per channel.
//!
//! ## Output Format
//!
//! ```json
//! {"shape": [1, 81, 6, 6], "channels": ["S0", "S1(0,0)", ...], "data": [...]}
//! ```
//!
//! `data` is row-major in `shape`; the channel axis is third from the end.

mod error;
mod reader;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::{parse_signal, read_signal};
pub use writer::{ScatteringOutput, WriterConfig, read_output, write_output};
