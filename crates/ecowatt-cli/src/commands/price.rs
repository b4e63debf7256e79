use clap::Args;
use ecowatt_core::error::EcoWattError;
use ecowatt_core::tariff::quote;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::output;

#[derive(Args)]
pub struct PriceArgs {
    /// Monthly consumption in kWh
    kwh: f64,

    /// Region (falls back to default_region from the config)
    #[arg(long)]
    region: Option<String>,

    /// Connection class: domestic or commercial
    #[arg(long, default_value = "domestic")]
    connection: String,

    /// Custom JSON tariff file
    #[arg(long, value_name = "FILE")]
    tariff: Option<PathBuf>,

    /// Output format: table (default) or json
    #[arg(short, long)]
    output: Option<String>,
}

pub fn run(args: &PriceArgs, cfg: &AppConfig) -> Result<(), EcoWattError> {
    let region = super::resolve_region(args.region.as_deref(), cfg)?;
    let connection = super::parse_connection(&args.connection)?;
    let tariff = super::resolve_tariff(args.tariff.as_deref(), cfg)?;

    let q = quote(&tariff, args.kwh, region, connection)?;

    match cfg.output_format(args.output.as_deref()) {
        "json" => output::json::print(&q)?,
        _ => output::table::print_quote(&q),
    }

    Ok(())
}
