use chloris_core::climate::ClimateConfig;
use chloris_core::crops::{CropDatabase, ResponseType, StageTrigger};
use chloris_core::phenology::{
    accumulated_gdd, apply_gdd, assess, co2_note, daily_gdd, days_to_gdd, photoperiod_note,
    spectrum_note, vernalization_note,
};
use polars::prelude::*;

fn climate_with_photoperiod(hours: f64) -> ClimateConfig {
    ClimateConfig {
        photoperiod: hours,
        ..ClimateConfig::default()
    }
}

#[test]
fn gdd_never_goes_negative() {
    assert_eq!(daily_gdd(24.0, 18.0, 10.0), 11.0);
    assert_eq!(daily_gdd(8.0, 2.0, 10.0), 0.0);
    assert_eq!(accumulated_gdd(&ClimateConfig::default(), 10.0, 65), 715.0);
}

#[test]
fn days_to_gdd_rounds_up() {
    let climate = ClimateConfig::default();
    assert_eq!(days_to_gdd(&climate, 10.0, 715.0), Some(65));
    assert_eq!(days_to_gdd(&climate, 10.0, 716.0), Some(66));
    assert_eq!(days_to_gdd(&climate, 30.0, 100.0), None);
}

#[test]
fn apply_gdd_carries_running_total_over_gaps() -> PolarsResult<()> {
    let df = df!(
        "date" => &["2024-05-01", "2024-05-02", "2024-05-03"],
        "temperature_max_c" => &[Some(24.0f64), None, Some(30.0f64)],
        "temperature_min_c" => &[Some(16.0f64), Some(12.0f64), Some(20.0f64)],
    )?;

    let out = apply_gdd(&df, 10.0)?;
    let gdd = out.column("gdd")?.f64()?;
    assert_eq!(gdd.get(0), Some(10.0));
    assert_eq!(gdd.get(1), None);
    assert_eq!(gdd.get(2), Some(15.0));

    let total = out.column("accumulated_gdd")?.f64()?;
    assert_eq!(total.get(1), Some(10.0));
    assert_eq!(total.get(2), Some(25.0));

    Ok(())
}

#[test]
fn obligate_short_day_fails_under_long_days() {
    let db = CropDatabase::builtin().unwrap();
    let indica = db.by_id("can-ind-001").unwrap();

    assert_eq!(
        photoperiod_note(indica, &climate_with_photoperiod(18.0)),
        "CRITICAL FAILURE: Photoperiod (18h) exceeds Critical Day Length (13.5h). Flowering will NOT initiate."
    );
    assert_eq!(photoperiod_note(indica, &climate_with_photoperiod(12.0)), "Optimal");
}

#[test]
fn facultative_responses_are_soft() {
    let db = CropDatabase::builtin().unwrap();

    let hybrid = db.by_id("can-hyb-001").unwrap();
    assert_eq!(
        photoperiod_note(hybrid, &climate_with_photoperiod(18.0)),
        "Inhibitory: Photoperiod (18h) > 13h. Flowering delayed significantly (Facultative)."
    );

    let lettuce = db.by_id("leaf-let-001").unwrap();
    assert_eq!(
        photoperiod_note(lettuce, &climate_with_photoperiod(12.0)),
        "Sub-optimal: Photoperiod (12h) < 14h. Flowering/Bolting delayed (Facultative)."
    );

    let wheat = db.by_id("grain-wheat-001").unwrap();
    assert_eq!(
        photoperiod_note(wheat, &climate_with_photoperiod(12.0)),
        "CRITICAL FAILURE: Photoperiod (12h) below Critical Day Length (14h). Plant will remain rosette/vegetative."
    );
}

#[test]
fn crops_without_config_use_type_fallback() {
    let db = CropDatabase::builtin().unwrap();

    let tomato = db.by_id("sol-tom-001").unwrap();
    assert_eq!(photoperiod_note(tomato, &climate_with_photoperiod(18.0)), "Optimal");

    let mut onion = db.by_id("root-oni-001").unwrap().clone();
    onion.photoperiod_config = None;
    assert_eq!(
        photoperiod_note(&onion, &climate_with_photoperiod(14.0)),
        "Inhibitory (Vegetative only)"
    );
    assert_eq!(photoperiod_note(&onion, &climate_with_photoperiod(13.0)), "Optimal");

    let mut lettuce = db.by_id("leaf-let-001").unwrap().clone();
    lettuce.photoperiod_config = None;
    assert_eq!(
        photoperiod_note(&lettuce, &climate_with_photoperiod(11.5)),
        "Slow/Inhibitory"
    );
}

#[test]
fn additional_triggers_are_listed() {
    let db = CropDatabase::builtin().unwrap();
    let mut onion = db.by_id("root-oni-001").unwrap().clone();
    let config = onion.photoperiod_config.as_mut().unwrap();
    config.additional_triggers = vec![
        StageTrigger {
            stage: "Bulbing".to_string(),
            critical_day_length: 12.0,
            response_type: ResponseType::Obligate,
        },
        StageTrigger {
            stage: "Maturation".to_string(),
            critical_day_length: 11.5,
            response_type: ResponseType::Facultative,
        },
    ];

    assert_eq!(
        photoperiod_note(&onion, &climate_with_photoperiod(10.0)),
        "Optimal [Multi-stage Constraints: Stage 'Bulbing' req Strict limit of 12h; Stage 'Maturation' req Soft limit of 11.5h; ]"
    );
}

#[test]
fn vernalization_checks_night_temperature_and_day_length() {
    let db = CropDatabase::builtin().unwrap();
    let wheat = db.by_id("grain-wheat-001").unwrap();

    assert_eq!(
        vernalization_note(wheat, &ClimateConfig::default()),
        "WARNING: Vernalization incomplete. Night temp (18°C) > threshold (5°C). Requires 6 weeks of cold (<5°C) to initiate reproductive phase."
    );

    let cold = ClimateConfig {
        temperature_night: 4.0,
        ..ClimateConfig::default()
    };
    assert_eq!(vernalization_note(wheat, &cold), "Satisfied (Theoretical)");

    let mut strict = wheat.clone();
    let vernalization = strict
        .photoperiod_config
        .as_mut()
        .unwrap()
        .vernalization
        .as_mut()
        .unwrap();
    vernalization.photoperiod_threshold = Some(10.0);
    vernalization.description = None;
    assert_eq!(
        vernalization_note(&strict, &cold),
        "WARNING: Vernalization incomplete. Photoperiod (12h) > vernalization limit (10h). Development may be arrested."
    );

    let indica = db.by_id("can-ind-001").unwrap();
    assert_eq!(vernalization_note(indica, &cold), "N/A");
}

#[test]
fn spectrum_and_co2_notes() {
    let db = CropDatabase::builtin().unwrap();
    let sativa = db.by_id("can-sat-001").unwrap();
    let indica = db.by_id("can-ind-001").unwrap();

    assert!(spectrum_note(sativa).starts_with("High Sensitivity"));
    assert_eq!(spectrum_note(indica), "Standard Full Spectrum");

    assert_eq!(co2_note(indica, 350.0), "Sub-ambient (Limiting Factor)");
    assert_eq!(co2_note(indica, 600.0), "Ambient");
    assert_eq!(co2_note(indica, 800.0), "Optimized Enrichment (High Yield Potential)");
    assert_eq!(co2_note(indica, 1600.0), "Excessive (Risk of Toxicity > 1500)");

    let mut bare = indica.clone();
    bare.co2_range = None;
    assert_eq!(co2_note(&bare, 900.0), "Enriched (Enhanced Photosynthesis)");
}

#[test]
fn assessment_flags_blocked_flowering() {
    let db = CropDatabase::builtin().unwrap();
    let indica = db.by_id("can-ind-001").unwrap();

    let long_days = assess(indica, &climate_with_photoperiod(18.0));
    assert!(long_days.blocks_flowering());
    assert_eq!(long_days.maturity_gdd, 715.0);

    let flowering = assess(indica, &climate_with_photoperiod(12.0));
    assert!(!flowering.blocks_flowering());
    assert!((flowering.dli - 25.92).abs() < 1e-12);
}
