use anyhow::Result;
use chloris_core::climate::{
    assess_dli, climate_warnings, co2_exceeds_ceiling, flowering_status, WarningLevel,
};
use chloris_core::psychrometrics::{
    airflow, co2_potential, cooling_load, vpd, vpd_heatmap, vpd_status, vpd_target,
};
use chloris_core::units::format_temp;
use clap::Args;
use tracing::warn;

use super::{new_table, select_crop, ClimateOverrides};
use crate::App;

#[derive(Args, Debug)]
pub struct ClimateArgs {
    /// Crop id (defaults to the configured crop)
    #[arg(long)]
    pub crop: Option<String>,
    #[command(flatten)]
    pub overrides: ClimateOverrides,
    /// Leaf temperature relative to air, °C
    #[arg(long, allow_hyphen_values = true)]
    pub leaf_offset: Option<f64>,
    /// Lighting load in watts, for cooling sizing
    #[arg(long)]
    pub watts: Option<f64>,
    /// Show temperatures in °F
    #[arg(long)]
    pub imperial: bool,
    /// Print the 5x5 VPD neighbourhood around the current reading
    #[arg(long)]
    pub heatmap: bool,
}

pub fn handle(args: ClimateArgs, app: &App) -> Result<()> {
    let crop = select_crop(app, args.crop.as_deref())?;
    let climate = args.overrides.resolve(&app.settings.climate)?;
    let facility = &app.settings.facility;
    let leaf_offset = args.leaf_offset.unwrap_or(facility.leaf_offset_c);
    let watts = args.watts.unwrap_or(facility.lighting_watts);

    println!("{}", crop.display_name());
    println!(
        "  day/night: {} / {}  RH: {}%  CO2: {} ppm",
        format_temp(climate.temperature_day, args.imperial),
        format_temp(climate.temperature_night, args.imperial),
        climate.humidity,
        climate.co2
    );

    let dli = climate.dli();
    println!(
        "  DLI: {dli:.1} mol/m²/d ({}; target {}-{})",
        assess_dli(dli, crop).label(),
        crop.min_dli,
        crop.optimal_dli
    );
    println!(
        "  photoperiod: {} h -> {}",
        climate.photoperiod,
        flowering_status(crop, climate.photoperiod).label()
    );

    let target = vpd_target(crop);
    let current_vpd = vpd(climate.temperature_day, climate.humidity, leaf_offset);
    println!(
        "  VPD: {current_vpd:.2} kPa ({}; target {}-{} kPa, leaf offset {leaf_offset} °C)",
        vpd_status(current_vpd, target).label(),
        target.min,
        target.max
    );

    let load = cooling_load(watts);
    println!(
        "  cooling: {:.0} BTU/h lighting, {:.0} BTU/h with headroom, {:.2} tons",
        load.light_btu, load.total_btu, load.tonnage
    );
    let air = airflow(facility.length_ft, facility.width_ft, facility.height_ft);
    println!(
        "  airflow: {:.0} ft³ room, {:.0} CFM standard, {:.0} CFM aggressive",
        air.room_volume_ft3, air.standard_cfm, air.aggressive_cfm
    );
    let potential = co2_potential(climate.co2);
    println!(
        "  CO2 potential: {:.2}x ({:.0}% of max)",
        potential.multiplier, potential.percent_of_max
    );
    if co2_exceeds_ceiling(crop, climate.co2) {
        warn!(crop = %crop.id, co2 = climate.co2, "CO2 above crop ceiling");
        println!("  CO2 exceeds the safe ceiling for {}", crop.name);
    }

    for warning in climate_warnings(&climate) {
        let level = match warning.level {
            WarningLevel::Danger => "DANGER",
            WarningLevel::Warning => "WARNING",
            WarningLevel::Info => "INFO",
        };
        println!("  [{level}] {}", warning.message);
    }

    if args.heatmap {
        let grid = vpd_heatmap(climate.temperature_day, climate.humidity, leaf_offset, target);
        let mut header = vec!["RH \\ Temp".to_string()];
        if let Some(first_row) = grid.first() {
            header.extend(
                first_row
                    .iter()
                    .map(|cell| format_temp(cell.temp_c, args.imperial)),
            );
        }
        let mut table = new_table(header);
        for row in &grid {
            let mut cells = vec![format!(
                "{:.0}%",
                row.first().map_or(0.0, |cell| cell.relative_humidity)
            )];
            cells.extend(
                row.iter()
                    .map(|cell| format!("{:.2} ({})", cell.vpd, cell.status.label())),
            );
            table.add_row(cells);
        }
        println!("{table}");
    }

    Ok(())
}
