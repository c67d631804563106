use std::path::PathBuf;

use chloris_core::crops::DEFAULT_CROP_ID;
use chloris_core::settings::Settings;
use uuid::Uuid;

#[test]
fn partial_file_keeps_defaults() {
    let settings = Settings::from_toml_str(
        r#"
default_crop_id = "sol-tom-001"

[climate]
photoperiod = 18

[economics]
market_price = 3.5

[nutrients.mix]
n = 180
"#,
    )
    .unwrap();

    assert_eq!(settings.default_crop_id, "sol-tom-001");
    assert_eq!(settings.climate.photoperiod, 18.0);
    assert_eq!(settings.climate.ppfd, 600.0);
    assert_eq!(settings.economics.energy_cost, 0.14);
    assert_eq!(settings.nutrients.mix.n, 180.0);
    assert_eq!(settings.nutrients.mix.k, 200.0);
    assert_eq!(settings.facility.leaf_offset_c, -1.5);

    let facility = settings.facility_config();
    assert_eq!(facility.market_price, Some(3.5));
    assert_eq!(facility.lighting_watts, 1200.0);
}

#[test]
fn empty_file_is_all_defaults() {
    let settings = Settings::from_toml_str("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.default_crop_id, DEFAULT_CROP_ID);
}

#[test]
fn wrong_types_are_rejected() {
    assert!(Settings::from_toml_str("[climate]\nphotoperiod = \"long\"").is_err());
}

#[test]
fn relative_crop_table_resolves_against_settings_dir() {
    let dir = std::env::temp_dir().join(format!("chloris-settings-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("chloris.toml");
    std::fs::write(&path, "crop_table = \"crops/extra.toml\"\n").unwrap();

    let settings = Settings::load(Some(&path)).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(settings.crop_table, Some(dir.join(PathBuf::from("crops/extra.toml"))));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let missing = std::env::temp_dir().join(format!("chloris-missing-{}.toml", Uuid::new_v4()));
    assert!(Settings::load(Some(&missing)).is_err());
}
