use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chloris_core::oracle::{run_diagnosis, InlineImage, OracleTask, ReplayOracle};
use chloris_core::pathology::VisionDiagnosis;
use clap::Args;
use tracing::error;

use super::pathogens::print_profile;

#[derive(Args, Debug)]
pub struct DiagnoseArgs {
    /// Text file holding the image as a data URL (data:image/jpeg;base64,...)
    #[arg(long)]
    pub image: PathBuf,
    /// Stored vision reply from the generative model
    #[arg(long)]
    pub reply: PathBuf,
}

pub fn load_image(path: &Path) -> Result<InlineImage> {
    let url = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    InlineImage::from_data_url(&url)
        .ok_or_else(|| anyhow!("{} does not hold a base64 data URL", path.display()))
}

fn print_diagnosis(diagnosis: &VisionDiagnosis) {
    let verdict = if diagnosis.is_healthy {
        "healthy"
    } else {
        "issue detected"
    };
    println!(
        "{} ({verdict}, {:.0}% confidence)",
        diagnosis.diagnosis, diagnosis.confidence
    );
    for symptom in &diagnosis.symptoms {
        println!("  - {symptom}");
    }
    if !diagnosis.cause.is_empty() {
        println!("  cause: {}", diagnosis.cause);
    }
    if !diagnosis.remedy.is_empty() {
        println!("  remedy: {}", diagnosis.remedy);
    }
}

pub fn handle(args: DiagnoseArgs) -> Result<()> {
    let image = load_image(&args.image)?;
    let oracle = ReplayOracle::from_file(&args.reply);

    let diagnosis = match run_diagnosis(&oracle, image) {
        Ok(diagnosis) => diagnosis,
        Err(e) => {
            error!(error = %e, "Vision analysis failed");
            println!("{}", OracleTask::Vision.failure_message());
            return Ok(());
        }
    };

    print_diagnosis(&diagnosis);
    if let Some(profile) = diagnosis.library_match() {
        println!("\nLibrary match:");
        print_profile(profile);
    }
    Ok(())
}
