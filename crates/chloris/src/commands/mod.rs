pub mod breed;
pub mod climate;
pub mod crops;
pub mod diagnose;
pub mod market;
pub mod nutrients;
pub mod pathogens;
pub mod phenology;
pub mod prompt;
pub mod runs;
pub mod simulate;
pub mod sweep;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chloris_core::climate::{self as climate_core, ClimateConfig};
use chloris_core::crops::CropProfile;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Row, Table};
use serde::de::DeserializeOwned;

use crate::App;

/// Setpoint overrides layered over the configured climate. A preset or zone is applied
/// first, then any explicit value.
#[derive(Args, Debug, Default, Clone)]
pub struct ClimateOverrides {
    /// Growth-stage preset: seedling, veg or flower
    #[arg(long)]
    pub preset: Option<String>,
    /// USDA hardiness zone: 3, 5, 7 or 9
    #[arg(long)]
    pub zone: Option<String>,
    /// Day temperature, °C
    #[arg(long, allow_hyphen_values = true)]
    pub day: Option<f64>,
    /// Night temperature, °C
    #[arg(long, allow_hyphen_values = true)]
    pub night: Option<f64>,
    /// Hours of light per day
    #[arg(long)]
    pub photoperiod: Option<f64>,
    /// Canopy PPFD, µmol/m²/s
    #[arg(long)]
    pub ppfd: Option<f64>,
    /// CO2 concentration, ppm
    #[arg(long)]
    pub co2: Option<f64>,
    /// Relative humidity, %
    #[arg(long)]
    pub humidity: Option<f64>,
}

impl ClimateOverrides {
    pub fn resolve(&self, base: &ClimateConfig) -> Result<ClimateConfig> {
        let mut climate = *base;

        if let Some(code) = self.preset.as_deref() {
            let preset = climate_core::preset(code)
                .ok_or_else(|| anyhow!("unknown climate preset '{code}'"))?;
            climate.apply_preset(preset);
        }
        if let Some(code) = self.zone.as_deref() {
            let zone =
                climate_core::zone(code).ok_or_else(|| anyhow!("unknown hardiness zone '{code}'"))?;
            climate.apply_zone(zone);
        }

        if let Some(value) = self.day {
            climate.temperature_day = value;
        }
        if let Some(value) = self.night {
            climate.temperature_night = value;
        }
        if let Some(value) = self.photoperiod {
            climate.photoperiod = value;
        }
        if let Some(value) = self.ppfd {
            climate.ppfd = value;
        }
        if let Some(value) = self.co2 {
            climate.co2 = value;
        }
        if let Some(value) = self.humidity {
            climate.humidity = value;
        }

        Ok(climate)
    }
}

/// The crop named on the command line, or the configured default.
pub fn select_crop<'a>(app: &'a App, id: Option<&str>) -> Result<&'a CropProfile> {
    let id = id.unwrap_or(&app.settings.default_crop_id);
    Ok(app.crops.require(id)?)
}

pub fn new_table<T: Into<Row>>(header: T) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}
