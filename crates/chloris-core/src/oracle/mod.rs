//! Contract with the external generative model that produces simulation predictions.
//!
//! Callers build an [`OracleRequest`] (instructions, prompt and a response schema), hand it
//! to a [`PredictionOracle`] and parse the JSON reply. There is no retry, backoff or
//! timeout handling; any failure surfaces once through [`OracleError`].

pub mod prompts;
pub mod replay;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::climate::ClimateConfig;
use crate::crops::CropProfile;
use crate::genetics::BreedingResult;
use crate::pathology::VisionDiagnosis;
use crate::results::SimulationResult;

pub use prompts::{breeding_request, growth_request, vision_request};
pub use replay::ReplayOracle;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const RESPONSE_MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 payload without the data-URL prefix.
    pub data: String,
}

impl InlineImage {
    /// Split a `data:<mime>;base64,<payload>` URL into its parts.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.trim().strip_prefix("data:")?;
        let (header, data) = rest.split_once(',')?;
        let mime_type = header.split(';').next()?.trim();
        if mime_type.is_empty() || data.is_empty() {
            return None;
        }
        Some(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
    pub response_mime_type: String,
    pub response_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<InlineImage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleTask {
    Growth,
    Breeding,
    Vision,
}

impl OracleTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            OracleTask::Growth => "growth simulation",
            OracleTask::Breeding => "breeding simulation",
            OracleTask::Vision => "vision analysis",
        }
    }

    /// The single message shown to a user for any failure of this task.
    pub fn failure_message(&self) -> &'static str {
        match self {
            OracleTask::Growth => {
                "Failed to generate simulation. Please check your configuration or API Key."
            }
            OracleTask::Breeding => "Failed to run breeding simulation. Please try again.",
            OracleTask::Vision => "Failed to analyze image. Please try again.",
        }
    }

    fn empty_reply_detail(&self) -> &'static str {
        match self {
            OracleTask::Growth => "No response from AI",
            OracleTask::Breeding => "AI Breeding Failed",
            OracleTask::Vision => "Vision Analysis Failed",
        }
    }
}

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("{}", .task.empty_reply_detail())]
    EmptyResponse { task: OracleTask },

    #[error("{} reply is not valid JSON for the schema: {source}", .task.as_str())]
    Malformed {
        task: OracleTask,
        #[source]
        source: serde_json::Error,
    },

    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can answer an [`OracleRequest`] with a JSON document.
pub trait PredictionOracle: Send + Sync {
    fn generate(&self, request: &OracleRequest) -> Result<String, OracleError>;
}

fn parse_reply<T: DeserializeOwned>(task: OracleTask, reply: &str) -> Result<T, OracleError> {
    if reply.trim().is_empty() {
        warn!(task = task.as_str(), "Oracle returned an empty reply");
        return Err(OracleError::EmptyResponse { task });
    }
    serde_json::from_str(reply).map_err(|source| OracleError::Malformed { task, source })
}

fn run<T, O>(oracle: &O, task: OracleTask, request: &OracleRequest) -> Result<T, OracleError>
where
    T: DeserializeOwned,
    O: PredictionOracle + ?Sized,
{
    debug!(
        task = task.as_str(),
        model = %request.model,
        prompt_len = request.prompt.len(),
        "Sending oracle request"
    );
    let reply = oracle.generate(request)?;
    parse_reply(task, &reply)
}

pub fn run_growth_simulation<O: PredictionOracle + ?Sized>(
    oracle: &O,
    crop: &CropProfile,
    climate: &ClimateConfig,
    start_date: &str,
) -> Result<SimulationResult, OracleError> {
    let request = growth_request(crop, climate, start_date);
    run(oracle, OracleTask::Growth, &request)
}

pub fn run_breeding_simulation<O: PredictionOracle + ?Sized>(
    oracle: &O,
    parent_a: &CropProfile,
    parent_b: &CropProfile,
) -> Result<BreedingResult, OracleError> {
    let request = breeding_request(parent_a, parent_b);
    run(oracle, OracleTask::Breeding, &request)
}

pub fn run_diagnosis<O: PredictionOracle + ?Sized>(
    oracle: &O,
    image: InlineImage,
) -> Result<VisionDiagnosis, OracleError> {
    let request = vision_request(image);
    run(oracle, OracleTask::Vision, &request)
}
