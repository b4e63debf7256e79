mod commands;
mod config;
mod observability;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::analyze::AnalyzeArgs;
use crate::commands::price::PriceArgs;
use crate::commands::simulate::SimulateArgs;

#[derive(Parser)]
#[command(
    name = "ecowatt",
    version,
    about = "Electricity cost, usage tier and saving tips for homes, shops and offices"
)]
struct Cli {
    /// Debug logging and detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a usage document: predict consumption, price it, classify it and suggest savings
    Analyze(AnalyzeArgs),
    /// Price a monthly consumption figure
    Price(PriceArgs),
    /// Cost over a range of monthly consumption figures
    Simulate(SimulateArgs),
    /// Inspect and validate tariffs
    Tariffs {
        #[command(subcommand)]
        action: TariffsAction,
    },
    /// Inspect and validate premises profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum TariffsAction {
    /// Show the built-in tariff's connection classes and regions
    List,
    /// Print the slab rates of a connection class (domestic, commercial)
    Explain {
        class: String,
        /// Custom JSON tariff file instead of the built-in one
        #[arg(long, value_name = "FILE")]
        tariff: Option<PathBuf>,
    },
    /// Validate a custom tariff file
    Validate {
        /// Path to JSON tariff file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List the built-in premises profiles
    List,
    /// Explain a profile (home, shop, office) in plain language
    Explain { category: String },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    observability::init_tracing(cli.verbose);

    let result = config::AppConfig::load().and_then(|cfg| match cli.command {
        Commands::Analyze(args) => commands::analyze::run(&args, &cfg, cli.verbose),
        Commands::Price(args) => commands::price::run(&args, &cfg),
        Commands::Simulate(args) => commands::simulate::run(&args, &cfg),
        Commands::Tariffs { action } => match action {
            TariffsAction::List => commands::tariffs::list(),
            TariffsAction::Explain { class, tariff } => {
                commands::tariffs::explain(&class, tariff.as_deref(), &cfg)
            }
            TariffsAction::Validate { file } => commands::tariffs::validate(&file),
        },
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Explain { category } => commands::profiles::explain(&category),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
