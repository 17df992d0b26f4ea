//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use scatter_filters::Precision;
use scatter_fourier::BackendKind;
use scatter_io::WriterConfig;
use scatter_transform::ScatteringConfig;

use crate::cli::TransformOverrides;
use crate::config::{IoConfig, TransformToml};

/// Parses a Fourier backend name into the corresponding enum variant.
pub fn parse_backend(s: &str) -> Result<BackendKind> {
    Ok(BackendKind::from_name(s)?)
}

/// Parses a precision name into the corresponding enum variant.
pub fn parse_precision(s: &str) -> Result<Precision> {
    match s.to_lowercase().as_str() {
        "double" | "f64" => Ok(Precision::Double),
        "single" | "f32" => Ok(Precision::Single),
        other => bail!("unknown precision: {other:?}"),
    }
}

/// Applies command-line overrides on top of the file settings.
pub fn apply_overrides(transform: &mut TransformToml, overrides: &TransformOverrides) -> Result<()> {
    if let Some(j) = overrides.j {
        transform.j = Some(j);
    }
    if let Some(l) = overrides.l {
        transform.l = l;
    }
    if let Some(max_order) = overrides.max_order {
        transform.max_order = max_order;
    }
    if let Some(shape) = &overrides.shape {
        let &[rows, cols] = shape.as_slice() else {
            bail!("--shape takes exactly two values, got {}", shape.len());
        };
        transform.shape = Some([rows, cols]);
    }
    Ok(())
}

/// Builds a [`ScatteringConfig`] from the TOML transform settings.
///
/// `input_shape` is the trailing `(rows, cols)` of the signal, used when no
/// explicit shape is configured.
pub fn build_scattering_config(
    transform: &TransformToml,
    input_shape: Option<(usize, usize)>,
) -> Result<ScatteringConfig> {
    let Some(j) = transform.j else {
        bail!("no scale count: set [transform].j in config or use --scales");
    };
    let shape = match (transform.shape, input_shape) {
        (Some([rows, cols]), _) => (rows, cols),
        (None, Some(_)) if transform.pre_pad => {
            bail!("pre_pad needs the unpadded shape: set [transform].shape or use --shape")
        }
        (None, Some(shape)) => shape,
        (None, None) => bail!("no input shape: set [transform].shape or use --shape"),
    };
    let backend = parse_backend(&transform.backend)?;

    let config = ScatteringConfig::new(j, shape)
        .with_orientations(transform.l)
        .with_max_order(transform.max_order)
        .with_pre_pad(transform.pre_pad)
        .with_backend(backend);
    config.validate()?;
    Ok(config)
}

/// Builds a [`WriterConfig`] from the TOML I/O settings.
pub fn build_writer_config(io: &IoConfig) -> WriterConfig {
    WriterConfig::default().with_pretty(io.pretty)
}
