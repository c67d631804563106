use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chloris_core::phenology::apply_gdd;
use chloris_core::psychrometrics::apply_vpd;
use clap::Args;
use polars::prelude::*;
use tracing::{info, warn};

use super::select_crop;
use crate::App;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Glob pattern of CSV logs, e.g. "logs/**/*.csv"
    pub pattern: String,
    /// Directory for the enriched files (defaults to next to each input)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Crop whose base temperature drives the GDD columns
    #[arg(long)]
    pub crop: Option<String>,
    /// Leaf offset used when a log has no leaf_offset_c column
    #[arg(long, allow_hyphen_values = true)]
    pub leaf_offset: Option<f64>,
}

fn has_columns(df: &DataFrame, names: &[&str]) -> bool {
    names.iter().all(|name| df.column(name).is_ok())
}

fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "log".to_string());
    let name = format!("{stem}.chloris.csv");
    match out_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Returns false when the file carried none of the recognised reading columns.
fn enrich_file(path: &Path, out: &Path, leaf_offset: f64, base_temp: f64) -> Result<bool> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let mut touched = false;
    if has_columns(&df, &["temperature_c", "relative_humidity_pct"]) {
        df = apply_vpd(&df, leaf_offset)?;
        touched = true;
    }
    if has_columns(&df, &["temperature_max_c", "temperature_min_c"]) {
        df = apply_gdd(&df, base_temp)?;
        touched = true;
    }
    if !touched {
        return Ok(false);
    }

    let mut file =
        File::create(out).with_context(|| format!("failed to create {}", out.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    info!(input = %path.display(), output = %out.display(), rows = df.height(), "Enriched log");
    Ok(true)
}

pub fn handle(args: SweepArgs, app: &App) -> Result<()> {
    let crop = select_crop(app, args.crop.as_deref())?;
    let leaf_offset = args
        .leaf_offset
        .unwrap_or(app.settings.facility.leaf_offset_c);

    if let Some(dir) = args.out_dir.as_ref() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut success_count = 0;
    let mut skipped_count = 0;
    let mut failure_count = 0;

    for entry in glob::glob(&args.pattern).context("invalid glob pattern")? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Could not read path from glob pattern");
                failure_count += 1;
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }

        let out = output_path(&path, args.out_dir.as_deref());
        match enrich_file(&path, &out, leaf_offset, crop.base_temp) {
            Ok(true) => {
                println!("{} -> {}", path.display(), out.display());
                success_count += 1;
            }
            Ok(false) => {
                warn!(path = %path.display(), "No temperature columns, skipping");
                skipped_count += 1;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping file");
                failure_count += 1;
            }
        }
    }

    println!("\n--- Sweep Summary ---");
    println!("  Enriched: {success_count}");
    println!("  Skipped (no readings): {skipped_count}");
    println!("  Failed: {failure_count}");
    Ok(())
}
