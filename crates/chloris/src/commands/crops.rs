use anyhow::{anyhow, Result};
use chloris_core::crops::{CropCategory, CropProfile};
use clap::Subcommand;

use super::{new_table, select_crop};
use crate::App;

#[derive(Subcommand, Debug)]
pub enum CropsCommand {
    /// List cultivars, optionally filtered like the cultivar browser
    List {
        /// Substring of the crop name or variety
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        category: Option<String>,
        /// Minimum headline resistance score (0-10)
        #[arg(long, default_value_t = 0.0)]
        min_resistance: f64,
    },
    /// Search name, variety and scientific name
    Search { query: String },
    /// Show every field of one crop profile
    Show {
        /// Crop id (defaults to the configured crop)
        id: Option<String>,
        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn handle(command: CropsCommand, app: &App) -> Result<()> {
    match command {
        CropsCommand::List {
            query,
            category,
            min_resistance,
        } => {
            let category = category
                .as_deref()
                .map(CropCategory::try_from)
                .transpose()
                .map_err(|e| anyhow!(e))?;
            print_crops(&app.crops.filter(&query, category, min_resistance));
        }
        CropsCommand::Search { query } => {
            let found = app.crops.search(&query);
            if found.is_empty() {
                println!("No crops match '{query}'.");
            } else {
                print_crops(&found);
            }
        }
        CropsCommand::Show { id, json } => {
            let crop = select_crop(app, id.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(crop)?);
            } else {
                show_crop(crop);
            }
        }
    }
    Ok(())
}

fn print_crops(crops: &[&CropProfile]) {
    let mut table = new_table(vec![
        "ID", "Name", "Variety", "Type", "Category", "Tb (°C)", "DLI min/opt", "Days",
    ]);
    for crop in crops {
        table.add_row(vec![
            crop.id.clone(),
            crop.name.clone(),
            crop.variety.clone(),
            crop.photoperiod_type.to_string(),
            crop.category.to_string(),
            crop.base_temp.to_string(),
            format!("{}/{}", crop.min_dli, crop.optimal_dli),
            crop.expected_maturity_days.to_string(),
        ]);
    }
    println!("{table}");
}

fn show_crop(crop: &CropProfile) {
    println!("{} ({})", crop.display_name(), crop.scientific_name);
    println!("  id: {}  category: {}  type: {}", crop.id, crop.category, crop.photoperiod_type);
    println!(
        "  base/optimal temp: {}/{} °C  DLI min/opt: {}/{}  maturity: {} days",
        crop.base_temp, crop.optimal_temp, crop.min_dli, crop.optimal_dli, crop.expected_maturity_days
    );
    if let Some(trigger) = crop.flowering_trigger.as_deref() {
        println!("  flowering trigger: {trigger}");
    }
    if let Some(config) = crop.photoperiod_config.as_ref() {
        println!(
            "  critical day length: {} h ({}, sensitive during {})",
            config.critical_day_length,
            config.response_type.as_str(),
            config.sensitivity_stage
        );
        if let Some(vernalization) = config.vernalization.as_ref().filter(|v| v.required) {
            println!(
                "  vernalization: {} days below {} °C",
                vernalization.min_duration_days, vernalization.temp_threshold
            );
        }
    }
    if let Some(range) = crop.vpd_range {
        println!("  VPD target: {}-{} kPa", range.min, range.max);
    }
    if let Some(range) = crop.co2_range {
        println!("  CO2 range: {}-{} ppm", range.min, range.max);
    }
    if let Some(lineage) = crop.lineage.as_ref() {
        println!(
            "  lineage: {} x {} ({}, {})",
            lineage.mother, lineage.father, lineage.breeder, lineage.generation
        );
    }
    if let Some(resistance) = crop.resistance {
        println!(
            "  resistance: mold {} pests {} drought {} cold {}",
            resistance.mold, resistance.pests, resistance.drought, resistance.cold
        );
    }
    if let Some(chemotype) = crop.chemotype.as_ref() {
        let terpenes: Vec<String> = chemotype
            .terpene_list
            .iter()
            .map(|terpene| format!("{} {}", terpene.name, terpene.value))
            .collect();
        println!("  terpenes: {} ({})", terpenes.join(", "), chemotype.aroma_description);
    }

    if !crop.genetic_traits.is_empty() {
        let mut table = new_table(vec!["Trait", "Locus", "Type", "Genotype", "Phenotype"]);
        for genetic_trait in &crop.genetic_traits {
            table.add_row(vec![
                genetic_trait.name.clone(),
                genetic_trait.locus.clone(),
                format!("{:?}", genetic_trait.allele_type),
                genetic_trait.genotype.clone(),
                genetic_trait.phenotype.clone(),
            ]);
        }
        println!("{table}");
    }
    if let Some(description) = crop.description.as_deref() {
        println!("{description}");
    }
}
