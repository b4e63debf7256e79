use clap::Args;
use ecowatt_core::error::EcoWattError;
use ecowatt_core::model::UsageInput;
use ecowatt_core::predict::command::CommandPredictor;
use ecowatt_core::predict::{FixedPredictor, KwhPredictor};
use ecowatt_core::profile::load_profile;
use ecowatt_core::AnalyzeOptions;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a JSON usage document
    input_file: PathBuf,

    /// Known monthly consumption in kWh (skips the predictor)
    #[arg(long, conflicts_with = "predictor")]
    kwh: Option<f64>,

    /// Prediction command; receives the monthly record as a JSON file path
    #[arg(long, value_name = "CMD")]
    predictor: Option<String>,

    /// Region overriding the one in the document
    #[arg(long)]
    region: Option<String>,

    /// Connection class overriding the profile default (domestic, commercial)
    #[arg(long)]
    connection: Option<String>,

    /// Custom JSON tariff file
    #[arg(long, value_name = "FILE")]
    tariff: Option<PathBuf>,

    /// Custom JSON premises profile replacing the built-in one
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Output format: table (default) or json
    #[arg(short, long)]
    output: Option<String>,
}

pub fn run(args: &AnalyzeArgs, cfg: &AppConfig, verbose: bool) -> Result<(), EcoWattError> {
    let json_bytes = std::fs::read(&args.input_file)?;
    let input: UsageInput = serde_json::from_slice(&json_bytes)?;

    let predictor = select_predictor(args, cfg)?;

    let region = args.region.clone().or_else(|| {
        if input.region.trim().is_empty() {
            cfg.default_region.clone()
        } else {
            None
        }
    });
    let connection = args
        .connection
        .as_deref()
        .map(super::parse_connection)
        .transpose()?;
    let options = AnalyzeOptions {
        tariff: super::custom_tariff(args.tariff.as_deref(), cfg)?,
        region,
        connection,
        profile: args.profile.as_deref().map(load_profile).transpose()?,
    };

    let result = ecowatt_core::analyze(&input, predictor.as_ref(), &options)?;

    match cfg.output_format(args.output.as_deref()) {
        "json" => output::json::print(&result)?,
        _ => output::table::print_analysis(&result, verbose),
    }

    Ok(())
}

fn select_predictor(
    args: &AnalyzeArgs,
    cfg: &AppConfig,
) -> Result<Box<dyn KwhPredictor>, EcoWattError> {
    if let Some(kwh) = args.kwh {
        return Ok(Box::new(FixedPredictor::new(kwh)));
    }
    match args.predictor.as_deref().or(cfg.predictor_command.as_deref()) {
        Some(line) => Ok(Box::new(CommandPredictor::from_command_line(line)?)),
        None => Err(EcoWattError::PredictionUnavailable(
            "no predictor configured: pass --kwh or --predictor, or set predictor_command".into(),
        )),
    }
}
