use chloris_core::climate::{
    all_presets, all_zones, assess_dli, climate_warnings, co2_exceeds_ceiling, dli,
    flowering_status, preset, zone, ClimateConfig, DliStatus, FloweringStatus, WarningLevel,
};
use chloris_core::crops::CropDatabase;

#[test]
fn dli_is_exact() {
    for (ppfd, hours) in [(0.0, 12.0), (600.0, 12.0), (250.0, 18.0), (1234.5, 13.25)] {
        assert_eq!(dli(ppfd, hours), ppfd * hours * 3600.0 / 1_000_000.0);
    }
    assert!((ClimateConfig::default().dli() - 25.92).abs() < 1e-12);
}

#[test]
fn dli_assessment_against_indica() {
    let db = CropDatabase::builtin().unwrap();
    let indica = db.by_id("can-ind-001").unwrap();

    assert_eq!(assess_dli(25.92, indica), DliStatus::SubOptimal);
    assert_eq!(assess_dli(43.2, indica), DliStatus::Optimal);
    assert_eq!(assess_dli(39.96, indica), DliStatus::Optimal);
    assert_eq!(assess_dli(20.0, indica), DliStatus::Low);
    assert_eq!(assess_dli(69.12, indica), DliStatus::BurnRisk);
    assert_eq!(DliStatus::BurnRisk.label(), "BURN RISK");
}

#[test]
fn default_climate_raises_no_warnings() {
    assert!(climate_warnings(&ClimateConfig::default()).is_empty());
}

#[test]
fn cold_inverted_bright_climate_warns_three_times() {
    let climate = ClimateConfig {
        temperature_day: 8.0,
        temperature_night: 12.0,
        ppfd: 1600.0,
        ..ClimateConfig::default()
    };

    let warnings = climate_warnings(&climate);
    let levels: Vec<WarningLevel> = warnings.iter().map(|warning| warning.level).collect();
    assert_eq!(
        levels,
        vec![WarningLevel::Danger, WarningLevel::Info, WarningLevel::Warning]
    );
    assert!(warnings[1].message.starts_with("Negative DIF"));
}

#[test]
fn flowering_follows_photoperiod_type() {
    let db = CropDatabase::builtin().unwrap();
    let indica = db.by_id("can-ind-001").unwrap();
    let lettuce = db.by_id("leaf-let-001").unwrap();
    let tomato = db.by_id("sol-tom-001").unwrap();

    assert_eq!(flowering_status(indica, 12.0), FloweringStatus::Triggered);
    assert_eq!(flowering_status(indica, 18.0), FloweringStatus::VegetativeLock);
    assert_eq!(flowering_status(lettuce, 16.0), FloweringStatus::Triggered);
    assert_eq!(flowering_status(lettuce, 10.0), FloweringStatus::VegetativeLock);
    assert_eq!(flowering_status(tomato, 18.0), FloweringStatus::Neutral);
}

#[test]
fn co2_ceiling_defaults_to_1000() {
    let db = CropDatabase::builtin().unwrap();
    let indica = db.by_id("can-ind-001").unwrap();
    assert!(co2_exceeds_ceiling(indica, 1600.0));
    assert!(!co2_exceeds_ceiling(indica, 1200.0));

    let mut bare = indica.clone();
    bare.co2_range = None;
    assert!(co2_exceeds_ceiling(&bare, 1100.0));
    assert!(!co2_exceeds_ceiling(&bare, 1000.0));
}

#[test]
fn presets_and_zones_override_setpoints() {
    assert_eq!(all_presets().len(), 3);
    assert_eq!(all_zones().len(), 4);

    let mut climate = ClimateConfig {
        co2: 900.0,
        ..ClimateConfig::default()
    };
    climate.apply_preset(preset("FLOWER").unwrap());
    assert_eq!(climate.ppfd, 900.0);
    assert_eq!(climate.photoperiod, 12.0);
    assert_eq!(climate.humidity, 45.0);
    assert_eq!(climate.co2, 900.0);

    climate.apply_zone(zone("3").unwrap());
    assert_eq!(climate.temperature_day, 18.0);
    assert_eq!(climate.temperature_night, 10.0);
    assert_eq!(climate.ppfd, 900.0);

    assert!(preset("bloom").is_none());
    assert!(zone("4").is_none());
}
