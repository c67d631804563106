use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhotoperiodType {
    #[serde(rename = "Short-Day")]
    ShortDay,
    #[serde(rename = "Long-Day")]
    LongDay,
    #[serde(rename = "Day-Neutral")]
    DayNeutral,
}

impl PhotoperiodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhotoperiodType::ShortDay => "Short-Day",
            PhotoperiodType::LongDay => "Long-Day",
            PhotoperiodType::DayNeutral => "Day-Neutral",
        }
    }
}

impl fmt::Display for PhotoperiodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropCategory {
    Cannabis,
    Vegetable,
    Fruit,
    Herb,
    Flower,
}

impl CropCategory {
    pub const ALL: [CropCategory; 5] = [
        CropCategory::Cannabis,
        CropCategory::Vegetable,
        CropCategory::Fruit,
        CropCategory::Herb,
        CropCategory::Flower,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropCategory::Cannabis => "Cannabis",
            CropCategory::Vegetable => "Vegetable",
            CropCategory::Fruit => "Fruit",
            CropCategory::Herb => "Herb",
            CropCategory::Flower => "Flower",
        }
    }
}

impl fmt::Display for CropCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CropCategory {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        CropCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown crop category '{value}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    Obligate,
    Facultative,
    #[serde(rename = "Day-Neutral")]
    DayNeutral,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Obligate => "Obligate",
            ResponseType::Facultative => "Facultative",
            ResponseType::DayNeutral => "Day-Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectrumSensitivity {
    High,
    Moderate,
    Low,
}

impl SpectrumSensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpectrumSensitivity::High => "High",
            SpectrumSensitivity::Moderate => "Moderate",
            SpectrumSensitivity::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    pub min: f64,
    pub max: f64,
}

impl TargetRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrigger {
    pub stage: String,
    pub critical_day_length: f64,
    pub response_type: ResponseType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vernalization {
    pub required: bool,
    pub temp_threshold: f64,
    /// Maximum day length (hours) under which the cold treatment still counts.
    #[serde(default)]
    pub photoperiod_threshold: Option<f64>,
    pub min_duration_days: u32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoperiodConfig {
    pub critical_day_length: f64,
    pub response_type: ResponseType,
    pub sensitivity_stage: String,
    #[serde(default)]
    pub spectrum_sensitivity: Option<SpectrumSensitivity>,
    #[serde(default)]
    pub additional_triggers: Vec<StageTrigger>,
    #[serde(default)]
    pub vernalization: Option<Vernalization>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlleleType {
    Dominant,
    Recessive,
    #[serde(rename = "Co-Dominant")]
    CoDominant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticTrait {
    pub id: String,
    pub name: String,
    pub locus: String,
    #[serde(rename = "type")]
    pub allele_type: AlleleType,
    pub description: String,
    pub genotype: String,
    pub phenotype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    pub mother: String,
    pub father: String,
    pub breeder: String,
    pub generation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerpeneLevel {
    pub name: String,
    /// Relative intensity on a 0-100 scale.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerpeneProfile {
    pub primary: String,
    pub secondary: String,
    #[serde(default)]
    pub terpene_list: Vec<TerpeneLevel>,
    pub aroma_description: String,
}

/// 0 = susceptible, 10 = immune.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceProfile {
    pub mold: f64,
    pub pests: f64,
    pub drought: f64,
    pub cold: f64,
}

impl ResistanceProfile {
    /// The headline score used by the cultivar browser; cold hardiness is not part of it.
    pub fn peak(&self) -> f64 {
        self.mold.max(self.pests).max(self.drought)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRequirements {
    pub n: TargetRange,
    pub p: TargetRange,
    pub k: TargetRange,
    pub ca: TargetRange,
    pub mg: TargetRange,
    pub s: TargetRange,
    pub fe: TargetRange,
    pub ec: TargetRange,
    pub ph: TargetRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub variety: String,
    #[serde(rename = "type")]
    pub photoperiod_type: PhotoperiodType,
    pub category: CropCategory,
    /// Base temperature (Tb) for growing degree days.
    pub base_temp: f64,
    pub optimal_temp: f64,
    pub min_dli: f64,
    pub optimal_dli: f64,
    pub expected_maturity_days: u32,
    #[serde(default)]
    pub flowering_trigger: Option<String>,
    #[serde(default)]
    pub photoperiod_config: Option<PhotoperiodConfig>,
    #[serde(default)]
    pub genetic_traits: Vec<GeneticTrait>,
    #[serde(default)]
    pub vpd_range: Option<TargetRange>,
    #[serde(default)]
    pub co2_range: Option<TargetRange>,
    #[serde(default)]
    pub lineage: Option<Lineage>,
    #[serde(default)]
    pub chemotype: Option<TerpeneProfile>,
    #[serde(default)]
    pub resistance: Option<ResistanceProfile>,
    #[serde(default)]
    pub nutrient_targets: Option<NutrientRequirements>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CropProfile {
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.name, self.variety)
    }

    pub fn critical_day_length(&self) -> Option<f64> {
        self.photoperiod_config
            .as_ref()
            .map(|config| config.critical_day_length)
    }
}
