//! Growth simulation results and saved-run comparison.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::climate::ClimateConfig;
use crate::crops::CropProfile;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationStage {
    pub stage: String,
    pub start_date: String,
    pub end_date: String,
    pub duration_days: f64,
    pub description: String,
    #[serde(rename = "accumulatedGDD")]
    pub accumulated_gdd: f64,
    #[serde(rename = "requiredDLI")]
    pub required_dli: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YieldDetail {
    pub summary: String,
    /// 0-100 environmental suitability.
    pub score: Option<f64>,
    pub estimated_yield: Option<String>,
}

/// Yield projection as a structured object, or the bare summary string older runs stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YieldProjection {
    Detailed(YieldDetail),
    Legacy(String),
}

impl YieldProjection {
    pub fn score(&self) -> f64 {
        match self {
            YieldProjection::Detailed(detail) => detail
                .score
                .unwrap_or_else(|| legacy_yield_score(&detail.summary)),
            YieldProjection::Legacy(text) => legacy_yield_score(text),
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            YieldProjection::Detailed(detail) => &detail.summary,
            YieldProjection::Legacy(text) => text,
        }
    }

    pub fn estimated_yield(&self) -> Option<&str> {
        match self {
            YieldProjection::Detailed(detail) => detail.estimated_yield.as_deref(),
            YieldProjection::Legacy(_) => None,
        }
    }
}

/// Keyword score for summaries written before projections carried a number.
pub fn legacy_yield_score(text: &str) -> f64 {
    let text = text.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|word| text.contains(word));

    if mentions(&["optimal", "excellent", "high", "abundant", "maximum"]) {
        85.0
    } else if mentions(&["moderate", "average", "standard", "acceptable"]) {
        55.0
    } else {
        25.0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationResult {
    pub crop_name: String,
    pub sowing_date: String,
    pub harvest_date: String,
    pub stages: Vec<SimulationStage>,
    #[serde(rename = "totalGDD")]
    pub total_gdd: f64,
    #[serde(rename = "averageDLI")]
    pub average_dli: f64,
    pub yield_projection: Option<YieldProjection>,
    pub stress_analysis: String,
    pub scientific_notes: String,
}

impl SimulationResult {
    /// 0 when the projection is missing.
    pub fn yield_score(&self) -> f64 {
        self.yield_projection
            .as_ref()
            .map_or(0.0, YieldProjection::score)
    }

    pub fn yield_summary(&self) -> &str {
        self.yield_projection
            .as_ref()
            .map_or("N/A", YieldProjection::summary)
    }

    pub fn duration_days(&self) -> i64 {
        duration_days(&self.sowing_date, &self.harvest_date)
    }
}

fn parse_timestamp_millis(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().timestamp_millis());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.timestamp_millis())
}

/// Whole days between two dates, rounded. 0 when either date does not parse.
pub fn duration_days(start: &str, end: &str) -> i64 {
    match (parse_timestamp_millis(start), parse_timestamp_millis(end)) {
        (Some(start), Some(end)) => ((end - start) as f64 / MILLIS_PER_DAY).round() as i64,
        _ => 0,
    }
}

/// A simulation kept for later comparison, with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRun {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(flatten)]
    pub result: SimulationResult,
    #[serde(default)]
    pub config: Option<ClimateConfig>,
    #[serde(default)]
    pub crop_profile: Option<CropProfile>,
}

impl SavedRun {
    pub fn new(
        result: SimulationResult,
        config: Option<ClimateConfig>,
        crop_profile: Option<CropProfile>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            result,
            config,
            crop_profile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunComparison {
    pub current_duration: i64,
    pub saved_duration: i64,
    /// Saved minus current, in days.
    pub duration_diff: i64,
    /// Saved minus current.
    pub gdd_diff: f64,
    pub score_diff: f64,
}

pub fn compare_runs(saved: &SimulationResult, current: &SimulationResult) -> RunComparison {
    let current_duration = current.duration_days();
    let saved_duration = saved.duration_days();
    RunComparison {
        current_duration,
        saved_duration,
        duration_diff: saved_duration - current_duration,
        gdd_diff: saved.total_gdd - current.total_gdd,
        score_diff: saved.yield_score() - current.yield_score(),
    }
}
