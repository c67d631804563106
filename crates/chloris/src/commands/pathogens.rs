use anyhow::{anyhow, Result};
use chloris_core::pathology::{pathogen, search, PathogenProfile};
use clap::Args;

use super::new_table;

#[derive(Args, Debug)]
pub struct PathogensArgs {
    /// Matches name, type or symptom (empty lists the whole library)
    #[arg(default_value = "")]
    pub query: String,
    /// Show the full profile for one pathogen id
    #[arg(long, conflicts_with = "query")]
    pub id: Option<String>,
}

pub fn print_profile(profile: &PathogenProfile) {
    match profile.scientific_name {
        Some(scientific) => println!("{} ({scientific})", profile.name),
        None => println!("{}", profile.name),
    }
    println!("  type: {}  threat: {}", profile.pathogen_type, profile.severity);
    println!("  symptoms:");
    for symptom in profile.symptoms {
        println!("    - {symptom}");
    }
    println!("  conditions: {}", profile.conditions);
    println!("  prevention: {}", profile.prevention);
    println!("  organic remedy: {}", profile.organic_remedy);
    println!("  chemical remedy: {}", profile.chemical_remedy);
}

pub fn handle(args: PathogensArgs) -> Result<()> {
    if let Some(id) = args.id.as_deref() {
        let profile = pathogen(id).ok_or_else(|| anyhow!("no pathogen with id '{id}'"))?;
        print_profile(profile);
        return Ok(());
    }

    let found = search(&args.query);
    if found.is_empty() {
        println!("No pathogens match '{}'.", args.query);
        return Ok(());
    }

    let mut table = new_table(vec!["ID", "Name", "Type", "Threat", "First symptom"]);
    for profile in found {
        table.add_row(vec![
            profile.id.to_string(),
            profile.name.to_string(),
            profile.pathogen_type.to_string(),
            profile.severity.to_string(),
            profile.symptoms.first().copied().unwrap_or_default().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
