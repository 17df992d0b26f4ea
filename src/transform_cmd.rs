//! Transform command: scatter a JSON signal and write the coefficients.

use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use scatter_filters::Precision;
use scatter_io::{ScatteringOutput, read_signal, write_output};
use scatter_transform::Scattering2D;

use crate::cli::TransformArgs;
use crate::config::ScatterConfig;
use crate::convert;

/// Run the transform pipeline.
pub fn run(args: TransformArgs) -> Result<()> {
    let _cmd = info_span!("transform").entered();

    // 1. Load config and apply command-line overrides
    let mut config = ScatterConfig::load(args.config.as_deref())?;
    convert::apply_overrides(&mut config.transform, &args.overrides)?;
    if let Some(backend) = args.backend {
        config.transform.backend = backend;
    }
    if let Some(precision) = args.precision {
        config.transform.precision = precision;
    }
    if args.pre_pad {
        config.transform.pre_pad = true;
    }
    if args.pretty {
        config.io.pretty = true;
    }

    let input = args.input.or(config.io.input.take()).ok_or_else(|| {
        anyhow!("no input path: set [io].input in config or use --input")
    })?;
    let output = args.output.or(config.io.output.take()).ok_or_else(|| {
        anyhow!("no output path: set [io].output in config or use --output")
    })?;

    // 2. Read the signal; its trailing axes give the spatial shape
    let signal = read_signal(&input)
        .with_context(|| format!("failed to read signal: {}", input.display()))?;
    let ndim = signal.ndim();
    let plane_shape = (signal.shape()[ndim - 2], signal.shape()[ndim - 1]);

    // 3. Build the transform
    let scattering_cfg = convert::build_scattering_config(&config.transform, Some(plane_shape))?;
    let precision = convert::parse_precision(&config.transform.precision)?;
    let mut scattering =
        Scattering2D::new(&scattering_cfg).context("failed to build scattering transform")?;
    if precision != Precision::Double {
        scattering = scattering.migrate(precision);
    }

    // 4. Scatter
    let start = Instant::now();
    let coefficients = scattering
        .transform(&signal.view())
        .context("scattering transform failed")?;
    info!(
        shape = ?coefficients.shape(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "transform complete"
    );

    // 5. Write labelled output
    let labels = scattering.paths().iter().map(ToString::to_string).collect();
    let result = ScatteringOutput::new(&coefficients, labels)?;
    let writer_cfg = convert::build_writer_config(&config.io);
    write_output(&output, &result, &writer_cfg)
        .with_context(|| format!("failed to write output: {}", output.display()))?;

    Ok(())
}
