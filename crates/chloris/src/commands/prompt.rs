use std::path::PathBuf;

use anyhow::Result;
use chloris_core::oracle::{breeding_request, growth_request, vision_request, OracleRequest};
use clap::{Args, Subcommand};

use super::diagnose::load_image;
use super::{select_crop, ClimateOverrides};
use crate::App;

#[derive(Args, Debug, Clone)]
pub struct GrowthRequestArgs {
    /// Crop id (defaults to the configured crop)
    #[arg(long)]
    pub crop: Option<String>,
    #[command(flatten)]
    pub overrides: ClimateOverrides,
    /// Sowing date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start: Option<String>,
}

impl GrowthRequestArgs {
    pub fn start_date(&self) -> String {
        self.start
            .clone()
            .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string())
    }
}

#[derive(Subcommand, Debug)]
pub enum PromptCommand {
    /// Phenological timeline request
    Growth(GrowthRequestArgs),
    /// F1 cross request
    Breed { parent_a: String, parent_b: String },
    /// Leaf/canopy diagnosis request
    Vision {
        /// Text file holding the image as a data URL
        #[arg(long)]
        image: PathBuf,
    },
}

fn print_request(request: &OracleRequest) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(request)?);
    Ok(())
}

pub fn handle(command: PromptCommand, app: &App) -> Result<()> {
    match command {
        PromptCommand::Growth(args) => {
            let crop = select_crop(app, args.crop.as_deref())?;
            let climate = args.overrides.resolve(&app.settings.climate)?;
            print_request(&growth_request(crop, &climate, &args.start_date()))
        }
        PromptCommand::Breed { parent_a, parent_b } => {
            let parent_a = app.crops.require(&parent_a)?;
            let parent_b = app.crops.require(&parent_b)?;
            print_request(&breeding_request(parent_a, parent_b))
        }
        PromptCommand::Vision { image } => print_request(&vision_request(load_image(&image)?)),
    }
}
