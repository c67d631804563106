use anyhow::Result;
use chloris_core::phenology::{assess, days_to_gdd};
use clap::Args;

use super::{select_crop, ClimateOverrides};
use crate::App;

#[derive(Args, Debug)]
pub struct PhenologyArgs {
    /// Crop id (defaults to the configured crop)
    #[arg(long)]
    pub crop: Option<String>,
    #[command(flatten)]
    pub overrides: ClimateOverrides,
    /// Report how many days the climate needs to bank this many GDD
    #[arg(long)]
    pub target_gdd: Option<f64>,
}

pub fn handle(args: PhenologyArgs, app: &App) -> Result<()> {
    let crop = select_crop(app, args.crop.as_deref())?;
    let climate = args.overrides.resolve(&app.settings.climate)?;
    let assessment = assess(crop, &climate);

    println!("{}", crop.display_name());
    println!("  DLI: {:.2} mol/m²/d", assessment.dli);
    println!(
        "  thermal time: {:.1} GDD/day (Tb {} °C), {:.0} GDD over {} days",
        assessment.daily_gdd, crop.base_temp, assessment.maturity_gdd, crop.expected_maturity_days
    );
    println!("  photoperiod: {}", assessment.photoperiod);
    println!("  vernalization: {}", assessment.vernalization);
    println!("  spectrum: {}", assessment.spectrum);
    println!("  CO2: {}", assessment.co2);

    if let Some(target) = args.target_gdd {
        match days_to_gdd(&climate, crop.base_temp, target) {
            Some(days) => println!("  {target} GDD reached after {days} days"),
            None => println!("  {target} GDD is never reached: mean temperature is at or below Tb"),
        }
    }

    if assessment.blocks_flowering() {
        println!("Reproductive transition is blocked under this climate.");
    }

    Ok(())
}
