//! User settings read from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::climate::ClimateConfig;
use crate::crops::DEFAULT_CROP_ID;
use crate::economics::FacilityConfig;
use crate::error::Result;
use crate::nutrients::NutrientMix;

pub const CONFIG_ENV_VAR: &str = "CHLORIS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilitySettings {
    pub length_ft: f64,
    pub width_ft: f64,
    pub height_ft: f64,
    pub lighting_watts: f64,
    /// Leaf temperature relative to air, usually negative under LEDs.
    pub leaf_offset_c: f64,
}

impl Default for FacilitySettings {
    fn default() -> Self {
        Self {
            length_ft: 12.0,
            width_ft: 10.0,
            height_ft: 9.0,
            lighting_watts: 1200.0,
            leaf_offset_c: -1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicsSettings {
    /// $/kWh.
    pub energy_cost: f64,
    pub market_price: Option<f64>,
}

impl Default for EconomicsSettings {
    fn default() -> Self {
        Self {
            energy_cost: 0.14,
            market_price: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientSettings {
    pub tank_gallons: f64,
    /// EC of the source water before feeding.
    pub base_ec: f64,
    pub target_ph: f64,
    pub mix: NutrientMix,
}

impl Default for NutrientSettings {
    fn default() -> Self {
        Self {
            tank_gallons: 50.0,
            base_ec: 0.2,
            target_ph: 5.8,
            mix: NutrientMix::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub climate: ClimateConfig,
    pub facility: FacilitySettings,
    pub economics: EconomicsSettings,
    pub nutrients: NutrientSettings,
    pub default_crop_id: String,
    /// Extra crop profiles merged over the built-in table.
    pub crop_table: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            climate: ClimateConfig::default(),
            facility: FacilitySettings::default(),
            economics: EconomicsSettings::default(),
            nutrients: NutrientSettings::default(),
            default_crop_id: DEFAULT_CROP_ID.to_string(),
            crop_table: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::from_toml_str(&content)?;

        // Relative crop tables are resolved against the settings file.
        if let (Some(table), Some(dir)) = (settings.crop_table.as_ref(), path.parent()) {
            if table.is_relative() {
                settings.crop_table = Some(dir.join(table));
            }
        }

        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Explicit path first, then `CHLORIS_CONFIG`, then built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(value) if !value.is_empty() => Self::from_file(Path::new(&value)),
            _ => {
                debug!("No settings file configured, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn facility_config(&self) -> FacilityConfig {
        FacilityConfig {
            length_ft: self.facility.length_ft,
            width_ft: self.facility.width_ft,
            lighting_watts: self.facility.lighting_watts,
            energy_cost: self.economics.energy_cost,
            market_price: self.economics.market_price,
        }
    }
}
