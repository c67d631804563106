use std::path::PathBuf;

use anyhow::{Context, Result};
use chloris_core::oracle::{run_growth_simulation, OracleTask, ReplayOracle};
use chloris_core::results::{SavedRun, SimulationResult};
use clap::Args;
use tracing::{error, info};

use super::new_table;
use super::prompt::GrowthRequestArgs;
use super::select_crop;
use crate::App;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub request: GrowthRequestArgs,
    /// Stored growth reply from the generative model
    #[arg(long)]
    pub reply: PathBuf,
    /// Keep the run, with its inputs, as JSON for later comparison
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn print_result(result: &SimulationResult) {
    println!(
        "{}: {} -> {} ({} days)",
        result.crop_name,
        result.sowing_date,
        result.harvest_date,
        result.duration_days()
    );
    println!(
        "  total GDD: {:.0}  average DLI: {:.1}",
        result.total_gdd, result.average_dli
    );

    let mut table = new_table(vec!["Stage", "Start", "End", "Days", "GDD", "DLI"]);
    for stage in &result.stages {
        table.add_row(vec![
            stage.stage.clone(),
            stage.start_date.clone(),
            stage.end_date.clone(),
            stage.duration_days.to_string(),
            format!("{:.0}", stage.accumulated_gdd),
            format!("{:.1}", stage.required_dli),
        ]);
    }
    println!("{table}");

    println!(
        "Yield: {} (score {:.0}/100)",
        result.yield_summary(),
        result.yield_score()
    );
    if let Some(estimate) = result
        .yield_projection
        .as_ref()
        .and_then(|projection| projection.estimated_yield())
    {
        println!("  estimate: {estimate}");
    }
    if !result.stress_analysis.is_empty() {
        println!("Stress analysis: {}", result.stress_analysis);
    }
    if !result.scientific_notes.is_empty() {
        println!("Scientific notes: {}", result.scientific_notes);
    }
}

pub fn handle(args: SimulateArgs, app: &App) -> Result<()> {
    let crop = select_crop(app, args.request.crop.as_deref())?;
    let climate = args.request.overrides.resolve(&app.settings.climate)?;
    let oracle = ReplayOracle::from_file(&args.reply);

    let result = match run_growth_simulation(&oracle, crop, &climate, &args.request.start_date()) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Growth simulation failed");
            println!("{}", OracleTask::Growth.failure_message());
            return Ok(());
        }
    };

    print_result(&result);

    if let Some(path) = args.save {
        let run = SavedRun::new(result, Some(climate), Some(crop.clone()));
        let json = serde_json::to_string_pretty(&run)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(id = %run.id, path = %path.display(), "Saved run");
        println!("Saved run {} to {}", run.id, path.display());
    }

    Ok(())
}
