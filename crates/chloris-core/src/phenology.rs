//! Thermal time and photoperiod assessment for a crop under a fixed climate.
//!
//! The notes produced here are the environment summary handed to the growth
//! simulation prompt, so their wording is part of the prompt contract.

use polars::prelude::*;

use crate::climate::ClimateConfig;
use crate::crops::{CropProfile, PhotoperiodType, ResponseType, SpectrumSensitivity};

const AMBIENT_CO2_PPM: f64 = 400.0;
const ENRICHED_CO2_PPM: f64 = 800.0;
/// Day lengths used when a crop carries no photoperiod config.
const SHORT_DAY_FALLBACK_LIMIT: f64 = 13.0;
const LONG_DAY_FALLBACK_LIMIT: f64 = 12.0;

/// Growing degree days for one day: mean temperature above the base, never negative.
pub fn daily_gdd(temp_max: f64, temp_min: f64, base_temp: f64) -> f64 {
    ((temp_max + temp_min) / 2.0 - base_temp).max(0.0)
}

/// Accumulated GDD over `days` at a constant day/night climate.
pub fn accumulated_gdd(climate: &ClimateConfig, base_temp: f64, days: u32) -> f64 {
    daily_gdd(climate.temperature_day, climate.temperature_night, base_temp) * f64::from(days)
}

/// Days needed to bank `target_gdd`, or `None` when the climate never accumulates heat.
pub fn days_to_gdd(climate: &ClimateConfig, base_temp: f64, target_gdd: f64) -> Option<u32> {
    let per_day = daily_gdd(climate.temperature_day, climate.temperature_night, base_temp);
    if per_day <= 0.0 {
        return None;
    }
    Some((target_gdd / per_day).ceil().max(0.0) as u32)
}

/// Per-row and running GDD over a daily temperature log.
///
/// Requires `temperature_max_c` and `temperature_min_c`. A row with a null reading
/// contributes nothing and carries the running total forward.
pub fn apply_gdd(df: &DataFrame, base_temp: f64) -> Result<DataFrame, PolarsError> {
    let len = df.height();

    let max_column = df.column("temperature_max_c")?.cast(&DataType::Float64)?;
    let min_column = df.column("temperature_min_c")?.cast(&DataType::Float64)?;
    let temp_max = max_column.f64()?;
    let temp_min = min_column.f64()?;

    let mut gdd_values = Vec::with_capacity(len);
    let mut accumulated_values = Vec::with_capacity(len);
    let mut running = 0.0;

    for idx in 0..len {
        match (temp_max.get(idx), temp_min.get(idx)) {
            (Some(high), Some(low)) => {
                let gdd = daily_gdd(high, low, base_temp);
                running += gdd;
                gdd_values.push(Some(gdd));
            }
            _ => gdd_values.push(None),
        }
        accumulated_values.push(running);
    }

    let mut output = df.clone();
    output.hstack_mut(&mut [
        Series::new("gdd".into(), gdd_values).into(),
        Series::new("accumulated_gdd".into(), accumulated_values).into(),
    ])?;

    Ok(output)
}

pub const OPTIMAL_PHOTOPERIOD_NOTE: &str = "Optimal";
pub const NO_VERNALIZATION_NOTE: &str = "N/A";
pub const STANDARD_SPECTRUM_NOTE: &str = "Standard Full Spectrum";

/// How the configured photoperiod interacts with the crop's day-length response.
pub fn photoperiod_note(crop: &CropProfile, climate: &ClimateConfig) -> String {
    let hours = climate.photoperiod;

    let Some(config) = crop.photoperiod_config.as_ref() else {
        return match crop.photoperiod_type {
            PhotoperiodType::ShortDay if hours > SHORT_DAY_FALLBACK_LIMIT => {
                "Inhibitory (Vegetative only)".to_string()
            }
            PhotoperiodType::LongDay if hours < LONG_DAY_FALLBACK_LIMIT => {
                "Slow/Inhibitory".to_string()
            }
            _ => OPTIMAL_PHOTOPERIOD_NOTE.to_string(),
        };
    };

    let critical = config.critical_day_length;
    let obligate = config.response_type == ResponseType::Obligate;
    let mut note = match crop.photoperiod_type {
        PhotoperiodType::ShortDay if hours > critical => {
            if obligate {
                format!(
                    "CRITICAL FAILURE: Photoperiod ({hours}h) exceeds Critical Day Length ({critical}h). Flowering will NOT initiate."
                )
            } else {
                format!(
                    "Inhibitory: Photoperiod ({hours}h) > {critical}h. Flowering delayed significantly (Facultative)."
                )
            }
        }
        PhotoperiodType::LongDay if hours < critical => {
            if obligate {
                format!(
                    "CRITICAL FAILURE: Photoperiod ({hours}h) below Critical Day Length ({critical}h). Plant will remain rosette/vegetative."
                )
            } else {
                format!(
                    "Sub-optimal: Photoperiod ({hours}h) < {critical}h. Flowering/Bolting delayed (Facultative)."
                )
            }
        }
        _ => OPTIMAL_PHOTOPERIOD_NOTE.to_string(),
    };

    if !config.additional_triggers.is_empty() {
        note.push_str(" [Multi-stage Constraints: ");
        for trigger in &config.additional_triggers {
            let strictness = if trigger.response_type == ResponseType::Obligate {
                "Strict"
            } else {
                "Soft"
            };
            note.push_str(&format!(
                "Stage '{}' req {} limit of {}h; ",
                trigger.stage, strictness, trigger.critical_day_length
            ));
        }
        note.push(']');
    }

    note
}

/// Whether the cold-treatment requirement is met by the night temperature and day length.
pub fn vernalization_note(crop: &CropProfile, climate: &ClimateConfig) -> String {
    let Some(vernalization) = crop
        .photoperiod_config
        .as_ref()
        .and_then(|config| config.vernalization.as_ref())
        .filter(|vernalization| vernalization.required)
    else {
        return NO_VERNALIZATION_NOTE.to_string();
    };

    let mut unmet = Vec::new();
    if climate.temperature_night > vernalization.temp_threshold {
        unmet.push(format!(
            "Night temp ({}°C) > threshold ({}°C)",
            climate.temperature_night, vernalization.temp_threshold
        ));
    }
    // The threshold is the longest day under which vernalization still progresses.
    if let Some(limit) = vernalization.photoperiod_threshold.filter(|limit| *limit != 0.0) {
        if climate.photoperiod > limit {
            unmet.push(format!(
                "Photoperiod ({}h) > vernalization limit ({limit}h)",
                climate.photoperiod
            ));
        }
    }

    if unmet.is_empty() {
        "Satisfied (Theoretical)".to_string()
    } else {
        let consequence = vernalization
            .description
            .as_deref()
            .filter(|description| !description.is_empty())
            .unwrap_or("Development may be arrested.");
        format!(
            "WARNING: Vernalization incomplete. {}. {consequence}",
            unmet.join(" AND ")
        )
    }
}

pub fn spectrum_note(crop: &CropProfile) -> String {
    let high = crop
        .photoperiod_config
        .as_ref()
        .and_then(|config| config.spectrum_sensitivity)
        == Some(SpectrumSensitivity::High);

    if high {
        "High Sensitivity: Red:Far-Red ratio is critical for phytochrome equilibrium. Ensure spectrum is tuned."
            .to_string()
    } else {
        STANDARD_SPECTRUM_NOTE.to_string()
    }
}

pub fn co2_note(crop: &CropProfile, co2: f64) -> String {
    let mut note = if co2 < AMBIENT_CO2_PPM {
        "Sub-ambient (Limiting Factor)".to_string()
    } else if co2 > ENRICHED_CO2_PPM {
        "Enriched (Enhanced Photosynthesis)".to_string()
    } else {
        "Ambient".to_string()
    };

    if let Some(range) = crop.co2_range {
        if co2 > range.max {
            note = format!("Excessive (Risk of Toxicity > {})", range.max);
        } else if co2 >= ENRICHED_CO2_PPM {
            note = "Optimized Enrichment (High Yield Potential)".to_string();
        }
    }

    note
}

/// Every derived note for one crop/climate pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct PhenologyAssessment {
    pub dli: f64,
    pub daily_gdd: f64,
    /// GDD banked over the crop's standard maturity window.
    pub maturity_gdd: f64,
    pub photoperiod: String,
    pub vernalization: String,
    pub spectrum: String,
    pub co2: String,
}

impl PhenologyAssessment {
    /// A photoperiod or vernalization failure means no reproductive transition.
    pub fn blocks_flowering(&self) -> bool {
        self.photoperiod.starts_with("CRITICAL FAILURE")
            || self.photoperiod.starts_with("Inhibitory (Vegetative only)")
            || self.vernalization.starts_with("WARNING")
    }
}

pub fn assess(crop: &CropProfile, climate: &ClimateConfig) -> PhenologyAssessment {
    PhenologyAssessment {
        dli: climate.dli(),
        daily_gdd: daily_gdd(climate.temperature_day, climate.temperature_night, crop.base_temp),
        maturity_gdd: accumulated_gdd(climate, crop.base_temp, crop.expected_maturity_days),
        photoperiod: photoperiod_note(crop, climate),
        vernalization: vernalization_note(crop, climate),
        spectrum: spectrum_note(crop),
        co2: co2_note(crop, climate.co2),
    }
}
