use chloris_core::crops::{CropDatabase, TargetRange};
use chloris_core::psychrometrics::{
    airflow, apply_vpd, co2_potential, cooling_load, cooling_tonnage, saturation_vapor_pressure,
    vpd, vpd_heatmap, vpd_status, vpd_target, VpdStatus, DEFAULT_VPD_TARGET,
};
use polars::prelude::*;

#[test]
fn vpd_matches_tetens_formula() {
    let value = vpd(26.0, 60.0, 0.0);
    assert!((value - 1.34453).abs() < 1e-3, "got {value}");

    let svp = saturation_vapor_pressure(20.0);
    assert!((svp - 2.3383).abs() < 1e-3, "got {svp}");
}

#[test]
fn vpd_is_non_negative_and_rises_as_air_dries() {
    for temp in [5.0, 15.0, 20.0, 25.0, 30.0, 35.0] {
        for offset in [0.0, -1.5, -3.0, 2.0] {
            let mut previous = f64::NEG_INFINITY;
            for rh in (0..=20).rev().map(|step| f64::from(step) * 5.0) {
                let value = vpd(temp, rh, offset);
                assert!(value >= 0.0, "negative VPD at {temp}°C {rh}% offset {offset}");
                assert!(value >= previous, "VPD fell as RH dropped at {temp}°C {rh}%");
                if offset == 0.0 && previous.is_finite() {
                    assert!(value > previous);
                }
                previous = value;
            }
        }
    }
}

#[test]
fn vpd_status_uses_displayed_rounding() {
    let target = DEFAULT_VPD_TARGET;
    assert_eq!(vpd_status(0.7949, target), VpdStatus::MoldRisk);
    assert_eq!(vpd_status(0.8, target), VpdStatus::Optimal);
    assert_eq!(vpd_status(1.204, target), VpdStatus::Optimal);
    assert_eq!(vpd_status(1.21, target), VpdStatus::WiltingRisk);
    assert_eq!(VpdStatus::MoldRisk.label(), "Risk: Mold / PM");
}

#[test]
fn vpd_target_prefers_crop_range() {
    let db = CropDatabase::builtin().unwrap();
    let lettuce = db.by_id("leaf-let-001").unwrap();
    assert_eq!(vpd_target(lettuce), TargetRange::new(0.4, 0.8));

    let mut bare = lettuce.clone();
    bare.vpd_range = None;
    assert_eq!(vpd_target(&bare), DEFAULT_VPD_TARGET);
}

#[test]
fn heatmap_is_centred_on_the_reading() {
    let grid = vpd_heatmap(26.0, 95.0, -1.5, DEFAULT_VPD_TARGET);
    assert_eq!(grid.len(), 5);
    assert!(grid.iter().all(|row| row.len() == 5));

    let centre = grid[2][2];
    assert_eq!(centre.temp_c, 26.0);
    assert_eq!(centre.relative_humidity, 95.0);
    assert!((centre.vpd - vpd(26.0, 95.0, -1.5)).abs() < 1e-12);

    // Humid rows clamp at 99 %, warm columns sit on the right.
    assert_eq!(grid[0][0].relative_humidity, 99.0);
    assert_eq!(grid[4][0].relative_humidity, 85.0);
    assert_eq!(grid[0][0].temp_c, 22.0);
    assert_eq!(grid[0][4].temp_c, 30.0);
}

#[test]
fn cooling_tonnage_is_exact() {
    for watts in [0.0, 600.0, 1200.0, 4321.5] {
        assert_eq!(cooling_tonnage(watts), watts * 3.412 * 1.25 / 12000.0);
    }

    let load = cooling_load(1000.0);
    assert!((load.light_btu - 3412.0).abs() < 1e-9);
    assert!((load.total_btu - 4265.0).abs() < 1e-9);
}

#[test]
fn airflow_rounds_exchange_rates() {
    let flow = airflow(12.0, 10.0, 9.0);
    assert_eq!(flow.room_volume_ft3, 1080.0);
    assert_eq!(flow.standard_cfm, 360.0);
    assert_eq!(flow.aggressive_cfm, 1080.0);

    let odd = airflow(7.0, 5.0, 8.0);
    assert_eq!(odd.standard_cfm, 93.0);
}

#[test]
fn co2_potential_saturates() {
    let ambient = co2_potential(400.0);
    assert!((ambient.multiplier - 1.0).abs() < 1e-12);
    assert_eq!(ambient.percent_of_max, 0.0);

    let starved = co2_potential(100.0);
    assert!(starved.multiplier < 1.0);
    assert_eq!(starved.percent_of_max, 0.0);

    let capped = co2_potential(5000.0);
    let expected = 1.0 + 0.5 * (1.0 - (-(2000.0f64 - 400.0) / 600.0).exp());
    assert!((capped.multiplier - expected).abs() < 1e-12);
    assert!(capped.percent_of_max > 90.0 && capped.percent_of_max <= 100.0);
}

#[test]
fn apply_vpd_adds_columns_and_propagates_nulls() -> PolarsResult<()> {
    let df = df!(
        "temperature_c" => &[Some(26.0f64), None, Some(20.0f64)],
        "relative_humidity_pct" => &[Some(60.0f64), Some(50.0f64), Some(55.0f64)],
    )?;

    let out = apply_vpd(&df, 0.0)?;
    let vpd_column = out.column("vpd_kpa")?.f64()?;
    assert!((vpd_column.get(0).unwrap() - vpd(26.0, 60.0, 0.0)).abs() < 1e-12);
    assert_eq!(vpd_column.get(1), None);
    assert!((vpd_column.get(2).unwrap() - vpd(20.0, 55.0, 0.0)).abs() < 1e-12);

    let svp_air = out.column("svp_air_kpa")?.f64()?;
    assert!((svp_air.get(2).unwrap() - saturation_vapor_pressure(20.0)).abs() < 1e-12);
    assert_eq!(out.width(), 6);

    Ok(())
}

#[test]
fn apply_vpd_reads_per_row_leaf_offset() -> PolarsResult<()> {
    let df = df!(
        "temperature_c" => &[25i64, 25i64],
        "relative_humidity_pct" => &[60.0f64, 60.0f64],
        "leaf_offset_c" => &[0.0f64, -2.0f64],
    )?;

    let out = apply_vpd(&df, -1.5)?;
    let vpd_column = out.column("vpd_kpa")?.f64()?;
    assert!((vpd_column.get(0).unwrap() - vpd(25.0, 60.0, 0.0)).abs() < 1e-12);
    assert!((vpd_column.get(1).unwrap() - vpd(25.0, 60.0, -2.0)).abs() < 1e-12);

    let leaf = out.column("svp_leaf_kpa")?.f64()?;
    assert!((leaf.get(1).unwrap() - saturation_vapor_pressure(23.0)).abs() < 1e-12);

    Ok(())
}
