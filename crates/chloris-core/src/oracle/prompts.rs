use serde_json::{json, Value};

use super::{InlineImage, OracleRequest, DEFAULT_MODEL, RESPONSE_MIME_TYPE};
use crate::climate::ClimateConfig;
use crate::crops::{CropProfile, GeneticTrait};
use crate::phenology;

const GROWTH_TEMPERATURE: f64 = 0.2;

fn request(
    system_instruction: String,
    prompt: String,
    schema: Value,
    temperature: Option<f64>,
    image: Option<InlineImage>,
) -> OracleRequest {
    OracleRequest {
        model: DEFAULT_MODEL.to_string(),
        system_instruction,
        prompt,
        response_mime_type: RESPONSE_MIME_TYPE.to_string(),
        response_schema: schema,
        temperature,
        image,
    }
}

pub fn growth_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "cropName": { "type": "STRING" },
            "sowingDate": { "type": "STRING" },
            "harvestDate": { "type": "STRING" },
            "totalGDD": { "type": "NUMBER", "description": "Total Accumulated Growing Degree Days" },
            "averageDLI": { "type": "NUMBER" },
            "yieldProjection": {
                "type": "OBJECT",
                "properties": {
                    "summary": { "type": "STRING", "description": "Short textual summary of yield" },
                    "score": { "type": "NUMBER", "description": "0-100 suitability score" },
                    "estimatedYield": { "type": "STRING", "description": "Quantifiable metric or specific classification" }
                }
            },
            "stressAnalysis": { "type": "STRING", "description": "Analysis of environmental stress factors" },
            "scientificNotes": { "type": "STRING", "description": "Explanation citing physiological mechanisms" },
            "stages": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "stage": { "type": "STRING" },
                        "startDate": { "type": "STRING" },
                        "endDate": { "type": "STRING" },
                        "durationDays": { "type": "NUMBER" },
                        "description": { "type": "STRING" },
                        "accumulatedGDD": { "type": "NUMBER" },
                        "requiredDLI": { "type": "NUMBER" }
                    }
                }
            }
        }
    })
}

pub fn breeding_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "offspringName": { "type": "STRING" },
            "predictedYield": { "type": "STRING" },
            "geneticStability": {
                "type": "STRING",
                "enum": [
                    "F1 Hybrid (Unstable)",
                    "True Breeding (Stable)",
                    "Polyhybrid (Highly Unstable)"
                ]
            },
            "aiAnalysis": { "type": "STRING" },
            "traits": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "punnettSquare": {
                            "type": "ARRAY",
                            "items": { "type": "ARRAY", "items": { "type": "STRING" } }
                        },
                        "probabilities": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "phenotype": { "type": "STRING" },
                                    "probability": { "type": "NUMBER" }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

pub fn vision_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "diagnosis": { "type": "STRING" },
            "confidence": { "type": "NUMBER", "description": "0-100 score" },
            "symptoms": { "type": "ARRAY", "items": { "type": "STRING" } },
            "cause": { "type": "STRING" },
            "remedy": { "type": "STRING" },
            "isHealthy": { "type": "BOOLEAN" }
        }
    })
}

/// Phenological timeline request for one crop under a fixed climate.
pub fn growth_request(crop: &CropProfile, climate: &ClimateConfig, start_date: &str) -> OracleRequest {
    let assessment = phenology::assess(crop, climate);
    let dli = format!("{:.2}", assessment.dli);
    let config = crop.photoperiod_config.as_ref();

    let system_instruction = format!(
        r#"
You are Chloris, a highly advanced plant physiology and phenology engine backed by scientific literature (PMC10004775, HortScience, Frontiers in Plant Science).

Your task is to calculate specific growth stages based on Thermal Time (GDD), DLI, CO2 Enrichment, and Photoperiodic constraints.

RULES:
1. **Use the Database Values**: The user has provided specific Base Temp ({base}°C), Optimal Temp ({optimal}°C).
2. **Photoperiodism & Critical Day Length**:
   - STRICTLY enforce the "Photoperiod Status" provided in the environment data.
   - If status is "CRITICAL FAILURE" or "Inhibitory (Vegetative only)", the stages MUST reflect this. Do NOT show a Harvest stage if flowering never triggers. Instead, show "Prolonged Vegetative" or "Senescence".
3. **DLI Analysis**: Compare calculated DLI ({dli}) against the crop's specific requirements (Min: {min_dli}, Opt: {optimal_dli}).
4. **CO2 Fertilization Effect**: If CO2 is > 800ppm and Light/Temp are optimal, increase predicted growth rate and yield score. If CO2 is limiting (<400), reduce yield.
5. **Vernalization**: If the input data mentions unmet vernalization requirements (Temp or Photoperiod), simulate failure to transition to reproductive stages.
6. **Yield Scoring**: Calculate a 'score' (0-100) representing environmental suitability. 100 = Perfect Topt, DLI, CO2 and Photoperiod. <40 = Critical Stress.
7. **Scientific Output**: Provide citations or physiological explanations (e.g., "Phytochrome Pfr/Pr ratio", "Florigen (FT) expression", "Rubisco Carboxylase Activity").

Output must be valid JSON matching the schema.
"#,
        base = crop.base_temp,
        optimal = crop.optimal_temp,
        min_dli = crop.min_dli,
        optimal_dli = crop.optimal_dli,
    );

    let critical_day_length = config
        .map(|config| format!("{} hours", config.critical_day_length))
        .unwrap_or_else(|| "Standard".to_string());
    let response_type = config.map_or("Standard", |config| config.response_type.as_str());
    let vernalization = if config
        .and_then(|config| config.vernalization.as_ref())
        .is_some_and(|vernalization| vernalization.required)
    {
        "Required"
    } else {
        "None"
    };
    let spectral = config
        .and_then(|config| config.spectrum_sensitivity)
        .map_or("Standard", |sensitivity| sensitivity.as_str());

    let prompt = format!(
        r#"
SIMULATION PARAMETERS:
----------------------
Crop: {name}
Scientific Name: {scientific}
Variety: {variety}
Type: {photoperiod_type}
Maturity (Standard): {maturity} days

ADVANCED PHENOLOGY CONFIG:
- Critical Day Length: {critical_day_length}
- Response Type: {response_type}
- Vernalization: {vernalization}
- Spectral Sensitivity: {spectral}

ENVIRONMENT:
- Start Date: {start_date}
- Photoperiod: {photoperiod} hours
- Photoperiod Status: {photoperiod_note}
- Vernalization Status: {vernalization_note}
- Spectrum Note: {spectrum_note}
- Day/Night Temp: {day}/{night} °C
- CO2 Concentration: {co2} ppm ({co2_note})
- RH: {humidity}%
- DLI: {dli} mol/m²/d

TASK:
Generate a detailed phenological timeline.
Calculate specific Accumulated GDD for each stage using Base Temp {base}°C.
If the Photoperiod Status indicates failure, the yield projection score should be < 20.
Provide a quantifiable yield estimate (e.g., "400-500g/m²" or "High/Moderate/Low" if exact mass unavailable).
If CO2 is enriched ({co2} > 800), explicitly mention "CO2 Fertilization" in the stress analysis or scientific notes.
"#,
        name = crop.name,
        scientific = crop.scientific_name,
        variety = crop.variety,
        photoperiod_type = crop.photoperiod_type,
        maturity = crop.expected_maturity_days,
        photoperiod = climate.photoperiod,
        photoperiod_note = assessment.photoperiod,
        vernalization_note = assessment.vernalization,
        spectrum_note = assessment.spectrum,
        day = climate.temperature_day,
        night = climate.temperature_night,
        co2 = climate.co2,
        co2_note = assessment.co2,
        humidity = climate.humidity,
        base = crop.base_temp,
    );

    request(
        system_instruction,
        prompt,
        growth_schema(),
        Some(GROWTH_TEMPERATURE),
        None,
    )
}

fn traits_json(traits: &[GeneticTrait]) -> String {
    serde_json::to_string(traits).unwrap_or_else(|_| "[]".to_string())
}

/// F1 cross request; parent A donates pollen, parent B receives it.
pub fn breeding_request(parent_a: &CropProfile, parent_b: &CropProfile) -> OracleRequest {
    let system_instruction = r#"
You are Chloris-Gen, an expert plant geneticist.
Your task is to simulate the breeding outcome of two plant parents.

Rules:
1. **Taxonomy Check**: Verify they are compatible species. If not, warn in the analysis.
2. **Hybrid Vigor**: Estimate if the F1 offspring will show heterosis (better growth) or depression.
3. **Stability**: F1 hybrids are usually unstable for breeding further.
4. **Traits**: Analyze provided Mendelian traits.
"#
    .to_string();

    let prompt = format!(
        r#"
BREEDING SIMULATION
-------------------
Parent A (Male/Pollen): {a_name} ({a_variety})
- Scientific: {a_scientific}
- Known Traits: {a_traits}

Parent B (Female/Receptor): {b_name} ({b_variety})
- Scientific: {b_scientific}
- Known Traits: {b_traits}

Task:
1. Name the potential offspring (Creative but scientific).
2. Predict the Quantitative Yield (e.g. "High due to hybrid vigor").
3. Analyze genetic stability.
4. Write a professional "Breeder's Note" explaining the outcome.
"#,
        a_name = parent_a.name,
        a_variety = parent_a.variety,
        a_scientific = parent_a.scientific_name,
        a_traits = traits_json(&parent_a.genetic_traits),
        b_name = parent_b.name,
        b_variety = parent_b.variety,
        b_scientific = parent_b.scientific_name,
        b_traits = traits_json(&parent_b.genetic_traits),
    );

    request(system_instruction, prompt, breeding_schema(), None, None)
}

pub fn vision_request(image: InlineImage) -> OracleRequest {
    let system_instruction = r#"
You are an expert Plant Pathologist and Agronomist using Computer Vision.
Analyze the provided image of a plant.
Identify any nutrient deficiencies, pests, fungal diseases, or environmental stress.
Provide a confidence score.
Recommend specific organic or salt-based remedies.
If the plant looks healthy, report that.
"#
    .to_string();

    request(
        system_instruction,
        "Analyze this plant leaf/canopy. Diagnose any issues.".to_string(),
        vision_schema(),
        None,
        Some(image),
    )
}
