use std::path::PathBuf;

use anyhow::Result;
use chloris_core::genetics::{compatible, expected_stability, predict_traits, TraitPrediction};
use chloris_core::oracle::{run_breeding_simulation, OracleTask, ReplayOracle};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use tracing::{error, warn};

use crate::App;

#[derive(Args, Debug)]
pub struct BreedArgs {
    /// Pollen donor crop id
    pub parent_a: String,
    /// Receptor crop id
    pub parent_b: String,
    /// Stored breeding reply from the generative model
    #[arg(long)]
    pub reply: Option<PathBuf>,
}

fn print_prediction(prediction: &TraitPrediction) {
    println!("{}", prediction.name);
    let mut square = Table::new();
    square.load_preset(UTF8_FULL);
    for row in &prediction.punnett_square {
        square.add_row(row.clone());
    }
    println!("{square}");
    for entry in &prediction.probabilities {
        println!("  {:>5.1}%  {}", entry.probability * 100.0, entry.phenotype);
    }
}

pub fn handle(args: BreedArgs, app: &App) -> Result<()> {
    let parent_a = app.crops.require(&args.parent_a)?;
    let parent_b = app.crops.require(&args.parent_b)?;

    println!(
        "{} x {}",
        parent_a.display_name(),
        parent_b.display_name()
    );
    if !compatible(parent_a, parent_b) {
        warn!(a = %parent_a.id, b = %parent_b.id, "Crossing different species");
        println!(
            "Incompatible species: {} cannot be crossed with {}.",
            parent_a.scientific_name, parent_b.scientific_name
        );
        return Ok(());
    }

    let predictions = predict_traits(parent_a, parent_b)?;
    if predictions.is_empty() {
        println!("The parents share no catalogued loci.");
    }
    for prediction in &predictions {
        print_prediction(prediction);
    }
    println!(
        "Expected stability: {}",
        expected_stability(&predictions).as_str()
    );

    if let Some(reply) = args.reply {
        let oracle = ReplayOracle::from_file(&reply);
        match run_breeding_simulation(&oracle, parent_a, parent_b) {
            Ok(result) => {
                println!("\nOffspring: {}", result.offspring_name);
                println!("  predicted yield: {}", result.predicted_yield);
                println!("  stability: {}", result.genetic_stability.as_str());
                for prediction in &result.traits {
                    print_prediction(prediction);
                }
                if !result.ai_analysis.is_empty() {
                    println!("\nBreeder's note: {}", result.ai_analysis);
                }
            }
            Err(e) => {
                error!(error = %e, "Breeding simulation failed");
                println!("{}", OracleTask::Breeding.failure_message());
            }
        }
    }

    Ok(())
}
