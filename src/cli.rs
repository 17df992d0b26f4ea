use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Windowed 2D scattering transform.
#[derive(Parser)]
#[command(
    name = "scatter",
    version,
    about = "Windowed 2D scattering transform of image signals"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Scatter a JSON signal and write the coefficients as JSON.
    Transform(TransformArgs),
    /// Print the padded size, output size and channel layout for a configuration.
    Plan(PlanArgs),
}

/// Transform parameters shared by both subcommands.
#[derive(clap::Args, Default)]
pub struct TransformOverrides {
    /// Override the number of scales J.
    #[arg(short = 'J', long = "scales")]
    pub j: Option<usize>,

    /// Override the number of orientations L.
    #[arg(short = 'L', long = "orientations")]
    pub l: Option<usize>,

    /// Override the maximum scattering order.
    #[arg(short = 'm', long = "max-order")]
    pub max_order: Option<usize>,

    /// Override the unpadded spatial shape, as ROWS COLS.
    #[arg(long, num_args = 2, value_names = ["ROWS", "COLS"])]
    pub shape: Option<Vec<usize>>,
}

/// Arguments for the `transform` subcommand.
#[derive(clap::Args)]
pub struct TransformArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input JSON path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Transform parameter overrides.
    #[command(flatten)]
    pub overrides: TransformOverrides,

    /// Override the Fourier backend (rustfft, direct).
    #[arg(short, long)]
    pub backend: Option<String>,

    /// Override the working precision (double, single).
    #[arg(long)]
    pub precision: Option<String>,

    /// Treat the input as already padded.
    #[arg(long)]
    pub pre_pad: bool,

    /// Indent the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `plan` subcommand.
#[derive(clap::Args)]
pub struct PlanArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Transform parameter overrides.
    #[command(flatten)]
    pub overrides: TransformOverrides,

    /// Also list every channel with its path label.
    #[arg(long)]
    pub paths: bool,
}
