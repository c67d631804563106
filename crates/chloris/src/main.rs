use std::path::PathBuf;

use anyhow::{Context, Result};
use chloris_core::crops::CropDatabase;
use chloris_core::settings::Settings;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    breed::BreedArgs, climate::ClimateArgs, crops::CropsCommand, diagnose::DiagnoseArgs,
    market::MarketArgs, nutrients::NutrientsArgs, pathogens::PathogensArgs,
    phenology::PhenologyArgs, prompt::PromptCommand, runs::CompareArgs, runs::ExportArgs,
    simulate::SimulateArgs, sweep::SweepArgs,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Chloris plant cultivation toolkit", long_about = None)]
struct Cli {
    /// Settings file (falls back to $CHLORIS_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the crop reference table
    Crops {
        #[command(subcommand)]
        command: CropsCommand,
    },
    /// DLI, VPD and HVAC sizing for the configured grow space
    Climate(ClimateArgs),
    /// Add VPD and GDD columns to every CSV log matching a glob pattern
    Sweep(SweepArgs),
    /// Reservoir EC, ionic balance and antagonism check
    Nutrients(NutrientsArgs),
    /// Facility yield, energy cost and revenue projection
    Market(MarketArgs),
    /// Photoperiod, vernalization and thermal time assessment
    Phenology(PhenologyArgs),
    /// Mendelian trait predictions for a cross
    Breed(BreedArgs),
    /// Search the pathogen library
    Pathogens(PathogensArgs),
    /// Parse a vision diagnosis reply and link it to the pathogen library
    Diagnose(DiagnoseArgs),
    /// Print the request that would be sent to the generative model
    Prompt {
        #[command(subcommand)]
        command: PromptCommand,
    },
    /// Run a growth simulation against a stored model reply
    Simulate(SimulateArgs),
    /// Write the stage table of a simulation as CSV
    Export(ExportArgs),
    /// Compare a saved run with a current simulation
    Compare(CompareArgs),
}

/// Settings plus the crop table they point at.
pub struct App {
    pub settings: Settings,
    pub crops: CropDatabase,
}

impl App {
    fn load(config: Option<&std::path::Path>) -> Result<Self> {
        let settings = Settings::load(config).context("failed to load settings")?;
        let mut crops = CropDatabase::builtin().context("built-in crop table is invalid")?;
        if let Some(table) = settings.crop_table.as_ref() {
            crops
                .merge_file(table)
                .with_context(|| format!("failed to merge crop table {}", table.display()))?;
        }
        info!(crops = crops.len(), "Crop table ready");
        Ok(Self { settings, crops })
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let app = App::load(cli.config.as_deref())?;

    match cli.command {
        Command::Crops { command } => commands::crops::handle(command, &app),
        Command::Climate(args) => commands::climate::handle(args, &app),
        Command::Sweep(args) => commands::sweep::handle(args, &app),
        Command::Nutrients(args) => commands::nutrients::handle(args, &app),
        Command::Market(args) => commands::market::handle(args, &app),
        Command::Phenology(args) => commands::phenology::handle(args, &app),
        Command::Breed(args) => commands::breed::handle(args, &app),
        Command::Pathogens(args) => commands::pathogens::handle(args),
        Command::Diagnose(args) => commands::diagnose::handle(args),
        Command::Prompt { command } => commands::prompt::handle(command, &app),
        Command::Simulate(args) => commands::simulate::handle(args, &app),
        Command::Export(args) => commands::runs::handle_export(args),
        Command::Compare(args) => commands::runs::handle_compare(args),
    }
}
