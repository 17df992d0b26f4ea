use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level scatter configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ScatterConfig {
    /// Transform settings.
    #[serde(default)]
    pub transform: TransformToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,
}

impl ScatterConfig {
    /// Loads a TOML config file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformToml {
    /// Number of scales J; required from the file or the command line.
    #[serde(default)]
    pub j: Option<usize>,
    /// Unpadded input shape `[rows, cols]`; taken from the input when absent.
    #[serde(default)]
    pub shape: Option<[usize; 2]>,
    #[serde(default = "default_l")]
    pub l: usize,
    #[serde(default = "default_max_order")]
    pub max_order: usize,
    #[serde(default)]
    pub pre_pad: bool,
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_precision")]
    pub precision: String,
}

impl Default for TransformToml {
    fn default() -> Self {
        Self {
            j: None,
            shape: None,
            l: default_l(),
            max_order: default_max_order(),
            pre_pad: false,
            backend: default_backend(),
            precision: default_precision(),
        }
    }
}

fn default_l() -> usize {
    8
}
fn default_max_order() -> usize {
    2
}
fn default_backend() -> String {
    "rustfft".to_string()
}
fn default_precision() -> String {
    "double".to_string()
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub pretty: bool,
}
