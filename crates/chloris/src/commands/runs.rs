use std::path::PathBuf;

use anyhow::{Context, Result};
use chloris_core::export::{export_file_name, stage_table_csv};
use chloris_core::results::{compare_runs, SimulationResult};
use clap::Args;
use tracing::info;

use super::read_json;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Simulation result or saved run, as JSON
    pub run: PathBuf,
    /// Destination file (defaults to <Crop_Name>_Simulation.csv in the current directory)
    #[arg(long, conflicts_with = "stdout")]
    pub out: Option<PathBuf>,
    /// Print the table instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// The saved run
    pub saved: PathBuf,
    /// The run to compare against it
    pub current: PathBuf,
}

pub fn handle_export(args: ExportArgs) -> Result<()> {
    let result: SimulationResult = read_json(&args.run)?;
    let csv = stage_table_csv(&result)?;

    if args.stdout {
        print!("{csv}");
        return Ok(());
    }

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(export_file_name(&result.crop_name)));
    std::fs::write(&out, csv).with_context(|| format!("failed to write {}", out.display()))?;
    info!(path = %out.display(), stages = result.stages.len(), "Exported stage table");
    println!("Wrote {}", out.display());
    Ok(())
}

fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.0}")
    } else {
        format!("{value:.0}")
    }
}

pub fn handle_compare(args: CompareArgs) -> Result<()> {
    let saved: SimulationResult = read_json(&args.saved)?;
    let current: SimulationResult = read_json(&args.current)?;
    let comparison = compare_runs(&saved, &current);

    let mut table = super::new_table(vec!["", "Current", "Saved", "Saved - Current"]);
    table.add_row(vec![
        "Duration (days)".to_string(),
        comparison.current_duration.to_string(),
        comparison.saved_duration.to_string(),
        signed(comparison.duration_diff as f64),
    ]);
    table.add_row(vec![
        "Total GDD".to_string(),
        format!("{:.0}", current.total_gdd),
        format!("{:.0}", saved.total_gdd),
        signed(comparison.gdd_diff),
    ]);
    table.add_row(vec![
        "Yield score".to_string(),
        format!("{:.0}", current.yield_score()),
        format!("{:.0}", saved.yield_score()),
        signed(comparison.score_diff),
    ]);
    println!("{} vs {}", current.crop_name, saved.crop_name);
    println!("{table}");
    Ok(())
}
