use chloris_core::climate::ClimateConfig;
use chloris_core::results::{
    compare_runs, duration_days, legacy_yield_score, SavedRun, SimulationResult, YieldProjection,
};

fn run(sowing: &str, harvest: &str, gdd: f64, projection: &str) -> SimulationResult {
    serde_json::from_str(&format!(
        r#"{{
            "cropName": "Tomato",
            "sowingDate": "{sowing}",
            "harvestDate": "{harvest}",
            "totalGDD": {gdd},
            "yieldProjection": {projection}
        }}"#
    ))
    .unwrap()
}

#[test]
fn legacy_string_projection_is_scored_by_keyword() {
    let result = run("2024-01-01", "2024-03-01", 900.0, r#""Excellent fruit set""#);
    assert!(matches!(result.yield_projection, Some(YieldProjection::Legacy(_))));
    assert_eq!(result.yield_score(), 85.0);
    assert_eq!(result.yield_summary(), "Excellent fruit set");

    assert_eq!(legacy_yield_score("Moderate yield"), 55.0);
    assert_eq!(legacy_yield_score("Crop failure"), 25.0);
}

#[test]
fn structured_projection_without_score_falls_back_to_summary() {
    let result = run(
        "2024-01-01",
        "2024-03-01",
        900.0,
        r#"{ "summary": "Average output", "estimatedYield": "Moderate" }"#,
    );
    let projection = result.yield_projection.as_ref().unwrap();
    assert_eq!(projection.estimated_yield(), Some("Moderate"));
    assert_eq!(result.yield_score(), 55.0);
}

#[test]
fn missing_fields_default() {
    let result: SimulationResult = serde_json::from_str("{}").unwrap();
    assert!(result.stages.is_empty());
    assert_eq!(result.yield_score(), 0.0);
    assert_eq!(result.yield_summary(), "N/A");
    assert_eq!(result.duration_days(), 0);
}

#[test]
fn durations_accept_dates_and_timestamps() {
    assert_eq!(duration_days("2024-01-01", "2024-03-01"), 60);
    assert_eq!(
        duration_days("2024-01-01T00:00:00Z", "2024-01-10T18:00:00Z"),
        10
    );
    assert_eq!(duration_days("2024-01-10", "2024-01-01"), -9);
    assert_eq!(duration_days("soon", "2024-01-01"), 0);
}

#[test]
fn comparison_reports_saved_minus_current() {
    let saved = run("2024-01-01", "2024-04-01", 1200.0, r#"{ "summary": "", "score": 70 }"#);
    let current = run("2024-01-01", "2024-03-01", 1000.0, r#"{ "summary": "", "score": 82 }"#);

    let comparison = compare_runs(&saved, &current);
    assert_eq!(comparison.saved_duration, 91);
    assert_eq!(comparison.current_duration, 60);
    assert_eq!(comparison.duration_diff, 31);
    assert_eq!(comparison.gdd_diff, 200.0);
    assert_eq!(comparison.score_diff, -12.0);
}

#[test]
fn saved_run_flattens_result_fields() {
    let result = run("2024-01-01", "2024-03-01", 900.0, r#"{ "summary": "High", "score": 90 }"#);
    let saved = SavedRun::new(result.clone(), Some(ClimateConfig::default()), None);
    assert_eq!(saved.id.len(), 36);
    assert!(saved.timestamp > 0);

    let json = serde_json::to_value(&saved).unwrap();
    assert_eq!(json["cropName"], "Tomato");
    assert_eq!(json["totalGDD"], 900.0);
    assert_eq!(json["config"]["photoperiod"], 12.0);

    let restored: SavedRun = serde_json::from_value(json).unwrap();
    assert_eq!(restored, saved);
    assert_eq!(restored.result, result);
}
