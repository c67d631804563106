use serde::{Deserialize, Serialize};

use crate::crops::{CropProfile, PhotoperiodType};

const SECONDS_PER_HOUR: f64 = 3600.0;
const MICROMOL_PER_MOL: f64 = 1_000_000.0;
/// Above this DLI leaves start to bleach regardless of crop.
pub const DLI_BURN_THRESHOLD: f64 = 65.0;
const COLD_STRESS_DAY_TEMP_C: f64 = 10.0;
const DEFAULT_CO2_CEILING_PPM: f64 = 1000.0;

/// Environmental setpoints for a grow space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    pub temperature_day: f64,
    pub temperature_night: f64,
    /// Hours of light per day.
    pub photoperiod: f64,
    /// µmol/m²/s at the canopy.
    pub ppfd: f64,
    pub co2: f64,
    pub humidity: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            temperature_day: 24.0,
            temperature_night: 18.0,
            photoperiod: 12.0,
            ppfd: 600.0,
            co2: 400.0,
            humidity: 60.0,
        }
    }
}

impl ClimateConfig {
    pub fn dli(&self) -> f64 {
        dli(self.ppfd, self.photoperiod)
    }

    pub fn mean_temperature(&self) -> f64 {
        (self.temperature_day + self.temperature_night) / 2.0
    }

    pub fn apply_preset(&mut self, preset: &ClimatePreset) {
        self.temperature_day = preset.temperature_day;
        self.temperature_night = preset.temperature_night;
        self.humidity = preset.humidity;
        self.ppfd = preset.ppfd;
        self.photoperiod = preset.photoperiod;
    }

    pub fn apply_zone(&mut self, zone: &HardinessZone) {
        self.temperature_day = zone.day;
        self.temperature_night = zone.night;
    }
}

/// Daily light integral in mol/m²/d.
pub fn dli(ppfd: f64, hours: f64) -> f64 {
    ppfd * hours * SECONDS_PER_HOUR / MICROMOL_PER_MOL
}

#[derive(Debug, Clone)]
pub struct ClimatePreset {
    pub code: &'static str,
    pub label: &'static str,
    pub temperature_day: f64,
    pub temperature_night: f64,
    pub humidity: f64,
    pub ppfd: f64,
    pub photoperiod: f64,
}

const PRESETS: [ClimatePreset; 3] = [
    ClimatePreset {
        code: "seedling",
        label: "Seedling",
        temperature_day: 22.0,
        temperature_night: 20.0,
        humidity: 70.0,
        ppfd: 250.0,
        photoperiod: 18.0,
    },
    ClimatePreset {
        code: "veg",
        label: "Vegetative",
        temperature_day: 26.0,
        temperature_night: 22.0,
        humidity: 60.0,
        ppfd: 600.0,
        photoperiod: 18.0,
    },
    ClimatePreset {
        code: "flower",
        label: "Generative",
        temperature_day: 24.0,
        temperature_night: 20.0,
        humidity: 45.0,
        ppfd: 900.0,
        photoperiod: 12.0,
    },
];

pub fn all_presets() -> &'static [ClimatePreset] {
    &PRESETS
}

pub fn preset(code: &str) -> Option<&'static ClimatePreset> {
    PRESETS.iter().find(|preset| preset.code.eq_ignore_ascii_case(code))
}

/// Simplified USDA zone: sets the average growing temperatures.
#[derive(Debug, Clone)]
pub struct HardinessZone {
    pub code: &'static str,
    pub label: &'static str,
    pub day: f64,
    pub night: f64,
}

const ZONES: [HardinessZone; 4] = [
    HardinessZone { code: "3", label: "Zone 3 (Cold)", day: 18.0, night: 10.0 },
    HardinessZone { code: "5", label: "Zone 5 (Mild)", day: 22.0, night: 14.0 },
    HardinessZone { code: "7", label: "Zone 7 (Warm)", day: 26.0, night: 18.0 },
    HardinessZone { code: "9", label: "Zone 9 (Hot)", day: 30.0, night: 22.0 },
];

pub fn all_zones() -> &'static [HardinessZone] {
    &ZONES
}

pub fn zone(code: &str) -> Option<&'static HardinessZone> {
    ZONES.iter().find(|zone| zone.code == code.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DliStatus {
    /// Above the bleaching threshold.
    BurnRisk,
    Optimal,
    SubOptimal,
    /// Below the crop's minimum.
    Low,
}

impl DliStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DliStatus::BurnRisk => "BURN RISK",
            DliStatus::Optimal => "Optimal Range",
            DliStatus::SubOptimal => "Sub-optimal",
            DliStatus::Low => "Below Minimum",
        }
    }
}

/// Classify a DLI (rounded to one decimal, as displayed) against a crop's light targets.
pub fn assess_dli(value: f64, crop: &CropProfile) -> DliStatus {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded > DLI_BURN_THRESHOLD {
        DliStatus::BurnRisk
    } else if rounded >= crop.optimal_dli {
        DliStatus::Optimal
    } else if rounded < crop.min_dli {
        DliStatus::Low
    } else {
        DliStatus::SubOptimal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningLevel {
    Danger,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClimateWarning {
    pub level: WarningLevel,
    pub message: &'static str,
}

pub fn climate_warnings(climate: &ClimateConfig) -> Vec<ClimateWarning> {
    let mut warnings = Vec::new();

    if climate.dli() > DLI_BURN_THRESHOLD {
        warnings.push(ClimateWarning {
            level: WarningLevel::Danger,
            message: "Light Stress: DLI > 65 can cause bleaching.",
        });
    }
    if climate.temperature_day < climate.temperature_night {
        warnings.push(ClimateWarning {
            level: WarningLevel::Info,
            message: "Negative DIF: May inhibit stem elongation.",
        });
    }
    if climate.temperature_day < COLD_STRESS_DAY_TEMP_C {
        warnings.push(ClimateWarning {
            level: WarningLevel::Warning,
            message: "Cold Stress: Metabolic stalls likely.",
        });
    }

    warnings
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloweringStatus {
    Triggered,
    VegetativeLock,
    Neutral,
}

impl FloweringStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FloweringStatus::Triggered => "Flowering Triggered",
            FloweringStatus::VegetativeLock => "Vegetative Lock",
            FloweringStatus::Neutral => "Neutral",
        }
    }
}

/// Whether the current photoperiod crosses the crop's critical day length.
pub fn flowering_status(crop: &CropProfile, photoperiod: f64) -> FloweringStatus {
    let critical = crop.critical_day_length().unwrap_or(0.0);
    match crop.photoperiod_type {
        PhotoperiodType::ShortDay if photoperiod < critical => FloweringStatus::Triggered,
        PhotoperiodType::LongDay if photoperiod > critical => FloweringStatus::Triggered,
        PhotoperiodType::ShortDay | PhotoperiodType::LongDay => FloweringStatus::VegetativeLock,
        PhotoperiodType::DayNeutral => FloweringStatus::Neutral,
    }
}

pub fn co2_exceeds_ceiling(crop: &CropProfile, co2: f64) -> bool {
    let ceiling = crop
        .co2_range
        .map(|range| range.max)
        .filter(|max| *max != 0.0)
        .unwrap_or(DEFAULT_CO2_CEILING_PPM);
    co2 > ceiling
}
