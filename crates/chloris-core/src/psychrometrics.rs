//! Vapor pressure deficit, HVAC sizing and airflow for a grow room.

use polars::prelude::*;

use crate::crops::{CropProfile, TargetRange};

const BTU_PER_WATT: f64 = 3.412;
/// Cooling headroom applied on top of the raw lighting load.
const COOLING_SAFETY_FACTOR: f64 = 1.25;
const BTU_PER_TON: f64 = 12_000.0;
pub const DEFAULT_VPD_TARGET: TargetRange = TargetRange::new(0.8, 1.2);

/// Tetens saturation vapor pressure in kPa.
pub fn saturation_vapor_pressure(temp_c: f64) -> f64 {
    0.61078 * ((17.27 * temp_c) / (temp_c + 237.3)).exp()
}

pub fn actual_vapor_pressure(temp_c: f64, relative_humidity: f64) -> f64 {
    saturation_vapor_pressure(temp_c) * (relative_humidity / 100.0)
}

/// Leaf-to-air VPD in kPa, clamped at zero.
pub fn vpd(temp_c: f64, relative_humidity: f64, leaf_offset_c: f64) -> f64 {
    let svp_leaf = saturation_vapor_pressure(temp_c + leaf_offset_c);
    (svp_leaf - actual_vapor_pressure(temp_c, relative_humidity)).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VpdStatus {
    MoldRisk,
    Optimal,
    WiltingRisk,
}

impl VpdStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VpdStatus::MoldRisk => "Risk: Mold / PM",
            VpdStatus::Optimal => "Optimal",
            VpdStatus::WiltingRisk => "Risk: Wilting",
        }
    }
}

pub fn vpd_target(crop: &CropProfile) -> TargetRange {
    crop.vpd_range.unwrap_or(DEFAULT_VPD_TARGET)
}

/// Classify a VPD reading, rounded to two decimals as displayed.
pub fn vpd_status(value: f64, target: TargetRange) -> VpdStatus {
    let rounded = (value * 100.0).round() / 100.0;
    classify_vpd(rounded, target)
}

fn classify_vpd(value: f64, target: TargetRange) -> VpdStatus {
    if value < target.min {
        VpdStatus::MoldRisk
    } else if value > target.max {
        VpdStatus::WiltingRisk
    } else {
        VpdStatus::Optimal
    }
}

const HEATMAP_TEMP_STEPS: [f64; 5] = [-4.0, -2.0, 0.0, 2.0, 4.0];
const HEATMAP_RH_STEPS: [f64; 5] = [10.0, 5.0, 0.0, -5.0, -10.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapCell {
    pub temp_c: f64,
    pub relative_humidity: f64,
    pub vpd: f64,
    pub status: VpdStatus,
}

/// 5×5 neighbourhood around the current reading: rows run from humid to dry, columns
/// from cool to warm. The centre cell is the reading itself.
pub fn vpd_heatmap(
    temp_c: f64,
    relative_humidity: f64,
    leaf_offset_c: f64,
    target: TargetRange,
) -> Vec<Vec<HeatmapCell>> {
    HEATMAP_RH_STEPS
        .iter()
        .map(|rh_step| {
            HEATMAP_TEMP_STEPS
                .iter()
                .map(|temp_step| {
                    let cell_temp = temp_c + temp_step;
                    let cell_rh = (relative_humidity + rh_step).clamp(10.0, 99.0);
                    let value = vpd(cell_temp, cell_rh, leaf_offset_c);
                    HeatmapCell {
                        temp_c: cell_temp,
                        relative_humidity: cell_rh,
                        vpd: value,
                        status: classify_vpd(value, target),
                    }
                })
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingLoad {
    pub light_btu: f64,
    pub total_btu: f64,
    pub tonnage: f64,
}

pub fn cooling_load(lighting_watts: f64) -> CoolingLoad {
    let light_btu = lighting_watts * BTU_PER_WATT;
    let total_btu = light_btu * COOLING_SAFETY_FACTOR;
    CoolingLoad {
        light_btu,
        total_btu,
        tonnage: total_btu / BTU_PER_TON,
    }
}

pub fn cooling_tonnage(lighting_watts: f64) -> f64 {
    cooling_load(lighting_watts).tonnage
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airflow {
    pub room_volume_ft3: f64,
    /// One full air exchange every three minutes.
    pub standard_cfm: f64,
    /// One full air exchange every minute.
    pub aggressive_cfm: f64,
}

pub fn airflow(length_ft: f64, width_ft: f64, height_ft: f64) -> Airflow {
    let volume = length_ft * width_ft * height_ft;
    Airflow {
        room_volume_ft3: volume,
        standard_cfm: (volume / 3.0).round(),
        aggressive_cfm: volume.round(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Co2Potential {
    /// Photosynthetic multiplier relative to ambient (1.0 at 400 ppm).
    pub multiplier: f64,
    /// Share of the maximum enrichment gain reached, 0-100.
    pub percent_of_max: f64,
}

/// Diminishing-returns heuristic: 400 ppm = 1.0x, approaching 1.5x asymptotically.
pub fn co2_potential(co2_ppm: f64) -> Co2Potential {
    let normalized = co2_ppm.clamp(300.0, 2000.0);
    let multiplier = 1.0 + 0.5 * (1.0 - (-(normalized - 400.0) / 600.0).exp());
    let percent_of_max = ((multiplier - 1.0) / 0.5 * 100.0).clamp(0.0, 100.0);
    Co2Potential {
        multiplier,
        percent_of_max,
    }
}

/// Evaluate VPD for every row of a readings table.
///
/// Requires `temperature_c` and `relative_humidity_pct`; `leaf_offset_c` is optional and
/// falls back to `default_leaf_offset`. Rows with a null input produce null outputs.
pub fn apply_vpd(df: &DataFrame, default_leaf_offset: f64) -> Result<DataFrame, PolarsError> {
    let len = df.height();

    let temp_column = df.column("temperature_c")?.cast(&DataType::Float64)?;
    let rh_column = df.column("relative_humidity_pct")?.cast(&DataType::Float64)?;
    let offset_column = match df.column("leaf_offset_c") {
        Ok(column) => Some(column.cast(&DataType::Float64)?),
        Err(_) => None,
    };

    let temp = temp_column.f64()?;
    let rh = rh_column.f64()?;
    let offset = offset_column.as_ref().map(|column| column.f64()).transpose()?;

    let mut svp_air = Vec::with_capacity(len);
    let mut avp_air = Vec::with_capacity(len);
    let mut svp_leaf = Vec::with_capacity(len);
    let mut vpd_values = Vec::with_capacity(len);

    for idx in 0..len {
        let leaf_offset = match offset {
            Some(chunked) => chunked.get(idx),
            None => Some(default_leaf_offset),
        };

        match (temp.get(idx), rh.get(idx), leaf_offset) {
            (Some(t), Some(humidity), Some(leaf_offset)) => {
                svp_air.push(Some(saturation_vapor_pressure(t)));
                avp_air.push(Some(actual_vapor_pressure(t, humidity)));
                svp_leaf.push(Some(saturation_vapor_pressure(t + leaf_offset)));
                vpd_values.push(Some(vpd(t, humidity, leaf_offset)));
            }
            _ => {
                svp_air.push(None);
                avp_air.push(None);
                svp_leaf.push(None);
                vpd_values.push(None);
            }
        }
    }

    let mut output = df.clone();
    output.hstack_mut(&mut [
        Series::new("svp_air_kpa".into(), svp_air).into(),
        Series::new("avp_air_kpa".into(), avp_air).into(),
        Series::new("svp_leaf_kpa".into(), svp_leaf).into(),
        Series::new("vpd_kpa".into(), vpd_values).into(),
    ])?;

    Ok(output)
}
