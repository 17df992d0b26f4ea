//! Plan command: report shapes and channel layout without reading any input.

use anyhow::Result;
use tracing::{info, info_span};

use scatter_transform::{ShapePlan, enumerate_paths};

use crate::cli::PlanArgs;
use crate::config::ScatterConfig;
use crate::convert;

/// Print the shape plan for the configured transform.
pub fn run(args: PlanArgs) -> Result<()> {
    let _cmd = info_span!("plan").entered();

    let mut config = ScatterConfig::load(args.config.as_deref())?;
    convert::apply_overrides(&mut config.transform, &args.overrides)?;
    let scattering_cfg = convert::build_scattering_config(&config.transform, None)?;
    let plan = ShapePlan::new(&scattering_cfg)?;
    info!(channels = plan.n_channels(), "plan computed");

    let pads = plan.pad_widths();
    println!("input      {:?}", plan.input_shape());
    println!("padded     {:?}", plan.padded_shape());
    println!(
        "padding    top {} bottom {} left {} right {}",
        pads.top, pads.bottom, pads.left, pads.right
    );
    println!("output     {:?}", plan.output_shape());
    for order in 0..=plan.max_order() {
        println!(
            "order {order}    {} channel(s) from index {}",
            plan.order_size(order),
            plan.order_offset(order).unwrap_or(plan.n_channels())
        );
    }
    println!("channels   {}", plan.n_channels());

    if args.paths {
        let paths = enumerate_paths(plan.j(), plan.orientations(), plan.max_order());
        for (index, path) in paths.iter().enumerate() {
            println!("{index:>6}  {path}");
        }
    }

    Ok(())
}
