//! Facility-level yield, energy cost and revenue projection.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crops::{CropCategory, CropProfile};
use crate::units::{GRAMS_PER_POUND, POUNDS_PER_KG, SQFT_TO_M2};

/// Share of floor area under productive canopy.
const CANOPY_UTILIZATION: f64 = 0.8;
/// Lighting watts plus HVAC overhead.
const SYSTEM_WATTS_FACTOR: f64 = 1.3;
const DEFAULT_HOURS_PER_DAY: f64 = 12.0;
/// Veg and dry time on top of the crop's maturity.
const EXTRA_CYCLE_DAYS: u32 = 14;
const DEFAULT_FRUITING_DENSITY: f64 = 2.0;
const DEFAULT_UNIT_DENSITY: f64 = 10.0;
/// Average head mass when a unit crop is sold by weight.
const KG_PER_HEAD: f64 = 0.3;
const HYBRID_PROFILE: &str = "Cannabis (Hybrid)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YieldModel {
    /// g/m² of canopy.
    Biomass,
    /// kg per plant.
    Fruiting,
    /// Whole heads.
    Units,
}

impl YieldModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            YieldModel::Biomass => "Biomass (g/m²)",
            YieldModel::Fruiting => "Fruiting (kg/plant)",
            YieldModel::Units => "Units (heads)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketUnit {
    Pound,
    Kilogram,
    Unit,
}

impl MarketUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketUnit::Pound => "lb",
            MarketUnit::Kilogram => "kg",
            MarketUnit::Unit => "unit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EconomicsProfile {
    pub key: &'static str,
    pub model: YieldModel,
    pub base_yield: f64,
    /// Plants per m², where the model counts plants.
    pub density: Option<f64>,
    pub market_unit: MarketUnit,
    pub default_price: f64,
}

static ECONOMICS_PROFILES: Lazy<Vec<EconomicsProfile>> = Lazy::new(|| {
    vec![
        EconomicsProfile {
            key: "Cannabis (Indica)",
            model: YieldModel::Biomass,
            base_yield: 550.0,
            density: None,
            market_unit: MarketUnit::Pound,
            default_price: 1800.0,
        },
        EconomicsProfile {
            key: "Cannabis (Sativa)",
            model: YieldModel::Biomass,
            base_yield: 450.0,
            density: None,
            market_unit: MarketUnit::Pound,
            default_price: 1800.0,
        },
        EconomicsProfile {
            key: HYBRID_PROFILE,
            model: YieldModel::Biomass,
            base_yield: 600.0,
            density: None,
            market_unit: MarketUnit::Pound,
            default_price: 1600.0,
        },
        EconomicsProfile {
            key: "Cannabis (Autoflower)",
            model: YieldModel::Biomass,
            base_yield: 400.0,
            density: None,
            market_unit: MarketUnit::Pound,
            default_price: 1200.0,
        },
        EconomicsProfile {
            key: "Tomato",
            model: YieldModel::Fruiting,
            base_yield: 8.0,
            density: Some(2.5),
            market_unit: MarketUnit::Pound,
            default_price: 2.50,
        },
        EconomicsProfile {
            key: "Pepper (Bell)",
            model: YieldModel::Fruiting,
            base_yield: 3.0,
            density: Some(3.5),
            market_unit: MarketUnit::Unit,
            default_price: 1.25,
        },
        EconomicsProfile {
            key: "Lettuce",
            model: YieldModel::Units,
            base_yield: 1.0,
            density: Some(14.0),
            market_unit: MarketUnit::Unit,
            default_price: 2.50,
        },
        EconomicsProfile {
            key: "Onion",
            model: YieldModel::Units,
            base_yield: 1.0,
            density: Some(25.0),
            market_unit: MarketUnit::Pound,
            default_price: 1.50,
        },
    ]
});

static FALLBACK_PROFILE: EconomicsProfile = EconomicsProfile {
    key: "Generic",
    model: YieldModel::Biomass,
    base_yield: 100.0,
    density: None,
    market_unit: MarketUnit::Kilogram,
    default_price: 5.0,
};

pub fn all_economics_profiles() -> &'static [EconomicsProfile] {
    ECONOMICS_PROFILES.as_slice()
}

pub fn economics_profile(key: &str) -> Option<&'static EconomicsProfile> {
    ECONOMICS_PROFILES.iter().find(|profile| profile.key == key)
}

/// Pick the market profile for a crop. Cannabis resolves by exact name, other crops by
/// family keyword; anything unmatched gets the generic biomass profile.
pub fn resolve_economics(crop: &CropProfile) -> &'static EconomicsProfile {
    if crop.category == CropCategory::Cannabis {
        return economics_profile(&crop.name)
            .or_else(|| economics_profile(HYBRID_PROFILE))
            .unwrap_or(&FALLBACK_PROFILE);
    }

    ["Tomato", "Pepper", "Lettuce"]
        .iter()
        .find(|keyword| crop.name.contains(*keyword))
        .and_then(|keyword| {
            ECONOMICS_PROFILES
                .iter()
                .find(|profile| profile.key.starts_with(*keyword))
        })
        .unwrap_or(&FALLBACK_PROFILE)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacilityConfig {
    pub length_ft: f64,
    pub width_ft: f64,
    pub lighting_watts: f64,
    /// $/kWh.
    pub energy_cost: f64,
    /// Overrides the profile's default price when set.
    pub market_price: Option<f64>,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            length_ft: 12.0,
            width_ft: 10.0,
            lighting_watts: 1200.0,
            energy_cost: 0.14,
            market_price: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacilityArea {
    pub area_ft2: f64,
    pub area_m2: f64,
    pub canopy_m2: f64,
}

pub fn facility_area(length_ft: f64, width_ft: f64) -> FacilityArea {
    let area_ft2 = length_ft * width_ft;
    let area_m2 = area_ft2 * SQFT_TO_M2;
    FacilityArea {
        area_ft2,
        area_m2,
        canopy_m2: area_m2 * CANOPY_UTILIZATION,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyCost {
    pub system_watts: f64,
    pub hours_per_day: f64,
    pub cycle_days: u32,
    pub total_kwh: f64,
    pub opex: f64,
}

pub fn energy_cost(crop: &CropProfile, lighting_watts: f64, price_per_kwh: f64) -> EnergyCost {
    let system_watts = lighting_watts * SYSTEM_WATTS_FACTOR;
    let hours_per_day = crop
        .critical_day_length()
        .filter(|hours| *hours != 0.0)
        .unwrap_or(DEFAULT_HOURS_PER_DAY);
    let cycle_days = crop.expected_maturity_days + EXTRA_CYCLE_DAYS;
    let total_kwh = system_watts / 1000.0 * hours_per_day * f64::from(cycle_days);

    EnergyCost {
        system_watts,
        hours_per_day,
        cycle_days,
        total_kwh,
        opex: total_kwh * price_per_kwh,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HarvestEstimate {
    Grams(f64),
    Plants { count: u64, kilograms: f64 },
    Heads(u64),
}

impl HarvestEstimate {
    /// Grams for mass yields, head count for unit yields.
    pub fn normalized(&self) -> f64 {
        match self {
            HarvestEstimate::Grams(grams) => *grams,
            HarvestEstimate::Plants { kilograms, .. } => kilograms * 1000.0,
            HarvestEstimate::Heads(count) => *count as f64,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            HarvestEstimate::Grams(grams) => format!("{:.1} lbs", grams / GRAMS_PER_POUND),
            HarvestEstimate::Plants { count, kilograms } => {
                format!("{kilograms:.1} kg ({count} plants)")
            }
            HarvestEstimate::Heads(count) => format!("{count} heads"),
        }
    }
}

pub fn harvest_estimate(profile: &EconomicsProfile, canopy_m2: f64) -> HarvestEstimate {
    match profile.model {
        YieldModel::Biomass => HarvestEstimate::Grams(canopy_m2 * profile.base_yield),
        YieldModel::Fruiting => {
            let density = profile.density.unwrap_or(DEFAULT_FRUITING_DENSITY);
            let count = (canopy_m2 * density).floor().max(0.0) as u64;
            HarvestEstimate::Plants {
                count,
                kilograms: count as f64 * profile.base_yield,
            }
        }
        YieldModel::Units => {
            let density = profile.density.unwrap_or(DEFAULT_UNIT_DENSITY);
            HarvestEstimate::Heads((canopy_m2 * density).floor().max(0.0) as u64)
        }
    }
}

pub fn gross_revenue(profile: &EconomicsProfile, harvest: &HarvestEstimate, price: f64) -> f64 {
    let amount = harvest.normalized();
    match (profile.market_unit, profile.model) {
        (MarketUnit::Pound, YieldModel::Units) => amount * KG_PER_HEAD * POUNDS_PER_KG * price,
        (MarketUnit::Pound, _) => amount / GRAMS_PER_POUND * price,
        (MarketUnit::Unit, _) => amount * price,
        (MarketUnit::Kilogram, _) => amount / 1000.0 * price,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketProjection {
    pub profile: &'static EconomicsProfile,
    pub area: FacilityArea,
    pub energy: EnergyCost,
    pub harvest: HarvestEstimate,
    pub price: f64,
    pub gross_revenue: f64,
    pub net_profit: f64,
    /// Percent; 0 when there is no operating cost.
    pub roi: f64,
    /// Only meaningful for biomass crops.
    pub grams_per_watt: Option<f64>,
}

pub fn project_market(crop: &CropProfile, facility: &FacilityConfig) -> MarketProjection {
    let profile = resolve_economics(crop);
    let area = facility_area(facility.length_ft, facility.width_ft);
    let energy = energy_cost(crop, facility.lighting_watts, facility.energy_cost);
    let harvest = harvest_estimate(profile, area.canopy_m2);
    let price = facility.market_price.unwrap_or(profile.default_price);

    let gross = gross_revenue(profile, &harvest, price);
    let net_profit = gross - energy.opex;
    let roi = if energy.opex > 0.0 {
        net_profit / energy.opex * 100.0
    } else {
        0.0
    };
    let grams_per_watt = match (profile.model, harvest) {
        (YieldModel::Biomass, HarvestEstimate::Grams(grams)) if facility.lighting_watts > 0.0 => {
            Some(grams / facility.lighting_watts)
        }
        _ => None,
    };

    debug!(
        crop = %crop.id,
        profile = profile.key,
        gross,
        opex = energy.opex,
        "Projected market economics"
    );

    MarketProjection {
        profile,
        area,
        energy,
        harvest,
        price,
        gross_revenue: gross,
        net_profit,
        roi,
        grams_per_watt,
    }
}
