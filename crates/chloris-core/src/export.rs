//! CSV rendering of a simulation's stage table.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::results::{SimulationResult, SimulationStage};

pub const STAGE_TABLE_HEADER: [&str; 6] = [
    "Stage",
    "StartDate",
    "EndDate",
    "Duration(Days)",
    "GDD",
    "DLI",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StageRow {
    #[serde(rename = "Stage")]
    stage: String,
    #[serde(rename = "StartDate")]
    start_date: String,
    #[serde(rename = "EndDate")]
    end_date: String,
    #[serde(rename = "Duration(Days)")]
    duration_days: f64,
    #[serde(rename = "GDD")]
    accumulated_gdd: f64,
    #[serde(rename = "DLI")]
    required_dli: f64,
}

impl From<&SimulationStage> for StageRow {
    fn from(stage: &SimulationStage) -> Self {
        Self {
            stage: stage.stage.clone(),
            start_date: stage.start_date.clone(),
            end_date: stage.end_date.clone(),
            duration_days: stage.duration_days,
            accumulated_gdd: stage.accumulated_gdd,
            required_dli: stage.required_dli,
        }
    }
}

impl From<StageRow> for SimulationStage {
    fn from(row: StageRow) -> Self {
        Self {
            stage: row.stage,
            start_date: row.start_date,
            end_date: row.end_date,
            duration_days: row.duration_days,
            description: String::new(),
            accumulated_gdd: row.accumulated_gdd,
            required_dli: row.required_dli,
        }
    }
}

/// Write one row per stage under the fixed header. Fields containing commas or quotes
/// are quoted; floats use the shortest representation that reads back identically.
pub fn write_stage_table<W: Write>(stages: &[SimulationStage], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(STAGE_TABLE_HEADER)?;
    for stage in stages {
        csv_writer.serialize(StageRow::from(stage))?;
    }
    csv_writer.flush()?;
    debug!(rows = stages.len(), "Wrote stage table");
    Ok(())
}

pub fn stage_table_csv(result: &SimulationResult) -> Result<String> {
    let mut buffer = Vec::new();
    write_stage_table(&result.stages, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Read a stage table back. Descriptions are not part of the table and come back empty.
pub fn read_stage_table<R: Read>(reader: R) -> Result<Vec<SimulationStage>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<StageRow>()
        .map(|row| -> Result<SimulationStage> { Ok(SimulationStage::from(row?)) })
        .collect()
}

/// Download name for a crop's table, e.g. "Cannabis_(Indica)_Simulation.csv".
pub fn export_file_name(crop_name: &str) -> String {
    let stem: String = crop_name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{stem}_Simulation.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(name: &str, gdd: f64, dli: f64) -> SimulationStage {
        SimulationStage {
            stage: name.to_string(),
            start_date: "2024-03-01".to_string(),
            end_date: "2024-03-15".to_string(),
            duration_days: 14.0,
            description: "ignored".to_string(),
            accumulated_gdd: gdd,
            required_dli: dli,
        }
    }

    #[test]
    fn header_is_fixed() {
        let csv = stage_table_csv(&SimulationResult::default()).unwrap();
        assert_eq!(csv.trim_end(), "Stage,StartDate,EndDate,Duration(Days),GDD,DLI");
    }

    #[test]
    fn numeric_fields_survive_a_round_trip() {
        let stages = vec![
            stage("Germination", 0.1 + 0.2, 12.96),
            stage("Vegetative", 1234.5678901234567, 25.92),
            stage("Flowering Initiation", 1e-7, 38.880000000000003),
        ];

        let mut buffer = Vec::new();
        write_stage_table(&stages, &mut buffer).unwrap();
        let parsed = read_stage_table(buffer.as_slice()).unwrap();

        assert_eq!(parsed.len(), stages.len());
        for (original, read_back) in stages.iter().zip(&parsed) {
            assert_eq!(original.duration_days.to_bits(), read_back.duration_days.to_bits());
            assert_eq!(original.accumulated_gdd.to_bits(), read_back.accumulated_gdd.to_bits());
            assert_eq!(original.required_dli.to_bits(), read_back.required_dli.to_bits());
            assert!(read_back.description.is_empty());
        }
    }

    #[test]
    fn stage_names_with_commas_are_quoted() {
        let csv = stage_table_csv(&SimulationResult {
            stages: vec![stage("Fruit Set, early", 400.0, 20.0)],
            ..Default::default()
        })
        .unwrap();

        assert!(csv.contains("\"Fruit Set, early\""));
        let parsed = read_stage_table(csv.as_bytes()).unwrap();
        assert_eq!(parsed[0].stage, "Fruit Set, early");
    }

    #[test]
    fn file_name_replaces_whitespace() {
        assert_eq!(
            export_file_name("Cannabis (Indica)"),
            "Cannabis_(Indica)_Simulation.csv"
        );
        assert_eq!(export_file_name("Winter\tWheat"), "Winter_Wheat_Simulation.csv");
    }
}
