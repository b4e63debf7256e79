use clap::Args;
use ecowatt_core::error::EcoWattError;
use ecowatt_core::tariff::simulate;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::output;

#[derive(Args)]
pub struct SimulateArgs {
    /// Region (falls back to default_region from the config)
    #[arg(long)]
    region: Option<String>,

    /// Connection class: domestic or commercial
    #[arg(long, default_value = "domestic")]
    connection: String,

    /// First consumption level in kWh
    #[arg(long, default_value_t = 50.0)]
    from: f64,

    /// Last consumption level in kWh (inclusive)
    #[arg(long, default_value_t = 1000.0)]
    to: f64,

    /// Distance between levels in kWh
    #[arg(long, default_value_t = 50.0)]
    step: f64,

    /// Custom JSON tariff file
    #[arg(long, value_name = "FILE")]
    tariff: Option<PathBuf>,

    /// Output format: table (default) or json
    #[arg(short, long)]
    output: Option<String>,
}

pub fn run(args: &SimulateArgs, cfg: &AppConfig) -> Result<(), EcoWattError> {
    let region = super::resolve_region(args.region.as_deref(), cfg)?;
    let connection = super::parse_connection(&args.connection)?;
    let tariff = super::resolve_tariff(args.tariff.as_deref(), cfg)?;

    let points = simulate(&tariff, region, connection, args.from, args.to, args.step)?;

    match cfg.output_format(args.output.as_deref()) {
        "json" => output::json::print(&points)?,
        _ => output::table::print_curve(&points, region, connection),
    }

    Ok(())
}
