//! JSON writer for scattering coefficients.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::IoError;
use crate::validate::{ValidationCollector, validate_finite, validate_shape};

/// Minimum rank of a result: `(D, Md, Nd)`.
const MIN_OUTPUT_RANK: usize = 3;

/// Scattering coefficients with one label per channel, ready to serialize.
///
/// `data` holds the coefficients in row-major order of `shape`, whose third
/// axis from the end is the channel axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatteringOutput {
    shape: Vec<usize>,
    channels: Vec<String>,
    data: Vec<f64>,
}

impl ScatteringOutput {
    /// Packs `coefficients` of shape `(B..., D, Md, Nd)` with `D` channel labels.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`IoError::DimensionMismatch`] | `channels.len() != D` |
    /// | [`IoError::Validation`] | rank < 3 or non-finite coefficients |
    pub fn new(coefficients: &ArrayD<f64>, channels: Vec<String>) -> Result<Self, IoError> {
        let output = Self {
            shape: coefficients.shape().to_vec(),
            channels,
            data: coefficients.iter().copied().collect(),
        };
        output.validate()?;
        Ok(output)
    }

    /// Output shape `(B..., D, Md, Nd)`.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// One label per channel.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Row-major coefficients.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Rebuilds the coefficient array.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `shape` and `data` disagree.
    pub fn to_array(&self) -> Result<ArrayD<f64>, IoError> {
        validate_shape(&self.shape, MIN_OUTPUT_RANK, self.data.len()).finish()?;
        ArrayD::from_shape_vec(IxDyn(&self.shape), self.data.clone()).map_err(|e| {
            IoError::Validation {
                count: 1,
                details: e.to_string(),
            }
        })
    }

    fn validate(&self) -> Result<(), IoError> {
        let mut c = validate_shape(&self.shape, MIN_OUTPUT_RANK, self.data.len());
        c.merge(validate_finite(&self.data));
        if !c.is_empty() {
            return c.finish();
        }

        let expected = self.shape[self.shape.len() - MIN_OUTPUT_RANK];
        if self.channels.len() != expected {
            return Err(IoError::DimensionMismatch {
                name: "channel".to_string(),
                expected,
                got: self.channels.len(),
            });
        }
        Ok(())
    }
}

/// Configuration for writing scattering output.
#[derive(Debug, Clone, Default)]
pub struct WriterConfig {
    /// Indent the JSON for reading by eye.
    pretty: bool,
}

impl WriterConfig {
    /// Enables or disables indented output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Whether output is indented.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

/// Write scattering output to a JSON file, replacing any existing file.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be created or written, or
/// [`IoError::Json`] if serialization fails.
pub fn write_output(
    path: &Path,
    output: &ScatteringOutput,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::io(path, &e))?;
    let mut writer = BufWriter::new(file);
    if config.pretty {
        serde_json::to_writer_pretty(&mut writer, output)?;
    } else {
        serde_json::to_writer(&mut writer, output)?;
    }
    writer.flush().map_err(|e| IoError::io(path, &e))?;

    info!(
        path = %path.display(),
        shape = ?output.shape,
        channels = output.channels.len(),
        "wrote scattering output"
    );
    Ok(())
}

/// Read scattering output previously written by [`write_output`].
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Io`] | the file cannot be read |
/// | [`IoError::Json`] | malformed JSON or missing fields |
/// | [`IoError::DimensionMismatch`] | channel labels do not match the channel axis |
/// | [`IoError::Validation`] | inconsistent shape and data |
pub fn read_output(path: &Path) -> Result<ScatteringOutput, IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| IoError::io(path, &e))?;
    let output: ScatteringOutput = serde_json::from_str(&text)?;
    output.validate()?;
    Ok(output)
}
