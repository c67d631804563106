//! Reservoir chemistry: EC estimation, ionic balance and Mulder's-chart antagonisms.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::crops::{CropProfile, NutrientRequirements, TargetRange};

/// ppm-per-EC conversion of the 500 scale.
const PPM_PER_EC: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    N,
    P,
    K,
    Ca,
    Mg,
    S,
    Fe,
}

impl Element {
    pub const ALL: [Element; 7] = [
        Element::N,
        Element::P,
        Element::K,
        Element::Ca,
        Element::Mg,
        Element::S,
        Element::Fe,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::N => "N",
            Element::P => "P",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Mg => "Mg",
            Element::S => "S",
            Element::Fe => "Fe",
        }
    }

    pub fn properties(&self) -> &'static ElementProperties {
        // ELEMENTS is indexed in Element::ALL order.
        &ELEMENTS[*self as usize]
    }

    pub fn is_cation(&self) -> bool {
        self.properties().charge > 0
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone)]
pub struct ElementProperties {
    pub element: Element,
    pub name: &'static str,
    /// Positive for cations, negative for anions.
    pub charge: i32,
    pub atomic_weight: f64,
}

static ELEMENTS: Lazy<Vec<ElementProperties>> = Lazy::new(|| {
    vec![
        ElementProperties {
            element: Element::N,
            name: "Nitrogen (NO3)",
            charge: -1,
            atomic_weight: 14.01,
        },
        ElementProperties {
            element: Element::P,
            name: "Phosphorus",
            charge: -3,
            atomic_weight: 30.97,
        },
        ElementProperties {
            element: Element::K,
            name: "Potassium",
            charge: 1,
            atomic_weight: 39.10,
        },
        ElementProperties {
            element: Element::Ca,
            name: "Calcium",
            charge: 2,
            atomic_weight: 40.08,
        },
        ElementProperties {
            element: Element::Mg,
            name: "Magnesium",
            charge: 2,
            atomic_weight: 24.31,
        },
        ElementProperties {
            element: Element::S,
            name: "Sulfur",
            charge: -2,
            atomic_weight: 32.06,
        },
        ElementProperties {
            element: Element::Fe,
            name: "Iron",
            charge: 2,
            atomic_weight: 55.85,
        },
    ]
});

pub fn all_elements() -> &'static [ElementProperties] {
    ELEMENTS.as_slice()
}

/// Target concentrations in ppm for each tracked element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientMix {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub ca: f64,
    pub mg: f64,
    pub s: f64,
    pub fe: f64,
}

impl Default for NutrientMix {
    /// Generic vegetative feed.
    fn default() -> Self {
        Self {
            n: 150.0,
            p: 50.0,
            k: 200.0,
            ca: 100.0,
            mg: 40.0,
            s: 60.0,
            fe: 2.0,
        }
    }
}

impl NutrientMix {
    pub fn ppm(&self, element: Element) -> f64 {
        match element {
            Element::N => self.n,
            Element::P => self.p,
            Element::K => self.k,
            Element::Ca => self.ca,
            Element::Mg => self.mg,
            Element::S => self.s,
            Element::Fe => self.fe,
        }
    }

    pub fn set_ppm(&mut self, element: Element, value: f64) {
        match element {
            Element::N => self.n = value,
            Element::P => self.p = value,
            Element::K => self.k = value,
            Element::Ca => self.ca = value,
            Element::Mg => self.mg = value,
            Element::S => self.s = value,
            Element::Fe => self.fe = value,
        }
    }

    pub fn total_ppm(&self) -> f64 {
        Element::ALL.iter().map(|element| self.ppm(*element)).sum()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        let mut scaled = *self;
        for element in Element::ALL {
            scaled.set_ppm(element, self.ppm(element) * factor);
        }
        scaled
    }
}

pub fn element_target(targets: &NutrientRequirements, element: Element) -> TargetRange {
    match element {
        Element::N => targets.n,
        Element::P => targets.p,
        Element::K => targets.k,
        Element::Ca => targets.ca,
        Element::Mg => targets.mg,
        Element::S => targets.s,
        Element::Fe => targets.fe,
    }
}

/// Total dissolved solids over the 500 scale plus the source water's EC.
pub fn estimated_ec(mix: &NutrientMix, base_ec: f64) -> f64 {
    mix.total_ppm() / PPM_PER_EC + base_ec
}

/// Charge equivalents contributed by one element: molarity × |charge|.
pub fn charge_equivalent(element: Element, ppm: f64) -> f64 {
    let props = element.properties();
    ppm / props.atomic_weight * f64::from(props.charge.abs())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IonicBalance {
    pub cations: f64,
    pub anions: f64,
    /// cations / anions, with a zero anion load treated as 1.
    pub ratio: f64,
}

pub fn ionic_balance(mix: &NutrientMix) -> IonicBalance {
    let (cations, anions) = Element::ALL.iter().fold((0.0, 0.0), |(cat, an), element| {
        let equivalent = charge_equivalent(*element, mix.ppm(*element));
        if element.is_cation() {
            (cat + equivalent, an)
        } else {
            (cat, an + equivalent)
        }
    });

    let divisor = if anions == 0.0 { 1.0 } else { anions };
    IonicBalance {
        cations,
        anions,
        ratio: cations / divisor,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Medium => "Med",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Antagonism {
    pub kind: &'static str,
    pub message: String,
    pub severity: Severity,
}

/// Competitive-uptake conflicts in the mix, followed by crop-specific osmotic and
/// deficiency warnings when the crop carries nutrient targets.
pub fn antagonisms(mix: &NutrientMix, ec: f64, crop: Option<&CropProfile>) -> Vec<Antagonism> {
    let mut issues = Vec::new();

    if mix.k > mix.mg * 4.0 {
        issues.push(Antagonism {
            kind: "High",
            message: "High Potassium (K) blocking Magnesium (Mg) uptake.".to_string(),
            severity: Severity::High,
        });
    }
    if mix.ca > mix.mg * 4.0 {
        issues.push(Antagonism {
            kind: "High",
            message: "Excess Calcium locking out Magnesium.".to_string(),
            severity: Severity::Medium,
        });
    }
    if mix.p > 60.0 && mix.fe < 2.0 {
        issues.push(Antagonism {
            kind: "Lockout",
            message: "High Phosphorus may precipitate Iron.".to_string(),
            severity: Severity::High,
        });
    }
    if mix.ca > 150.0 && mix.s > 100.0 {
        issues.push(Antagonism {
            kind: "Precip",
            message: "Calcium Sulfate (Gypsum) precipitation risk.".to_string(),
            severity: Severity::Critical,
        });
    }

    if let Some((crop, targets)) =
        crop.and_then(|crop| crop.nutrient_targets.as_ref().map(|targets| (crop, targets)))
    {
        if ec > targets.ec.max {
            issues.push(Antagonism {
                kind: "Osmotic",
                message: format!(
                    "EC ({:.1}) exceeds {} limit ({}). Root burn likely.",
                    ec, crop.name, targets.ec.max
                ),
                severity: Severity::Critical,
            });
        }
        if mix.ca < targets.ca.min {
            issues.push(Antagonism {
                kind: "Deficiency",
                message: format!(
                    "Low Calcium. {} is prone to tip burn/rot at <{}ppm.",
                    crop.name, targets.ca.min
                ),
                severity: Severity::High,
            });
        }
    }

    issues
}

/// How closely the mix matches a crop's targets, 0-100. Crops without targets score 100.
pub fn suitability_score(mix: &NutrientMix, ec: f64, crop: &CropProfile) -> u32 {
    let Some(targets) = crop.nutrient_targets.as_ref() else {
        return 100;
    };

    let mut score: i32 = 100;
    for element in Element::ALL {
        let target = element_target(targets, element);
        let current = mix.ppm(element);
        if current < target.min {
            score -= 10;
        }
        if current > target.max {
            score -= 10;
        }
    }
    if ec > targets.ec.max {
        score -= 20;
    }
    if ec < targets.ec.min {
        score -= 10;
    }

    score.max(0) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcStatus {
    TooHot,
    TooLow,
    Optimal,
}

impl EcStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EcStatus::TooHot => "Too Hot (Burn Risk)",
            EcStatus::TooLow => "Too Low",
            EcStatus::Optimal => "Optimal Range",
        }
    }
}

pub fn ec_status(ec: f64, targets: &NutrientRequirements) -> EcStatus {
    if ec > targets.ec.max {
        EcStatus::TooHot
    } else if ec < targets.ec.min {
        EcStatus::TooLow
    } else {
        EcStatus::Optimal
    }
}

/// Full reservoir evaluation for one mix against an optional crop.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservoirReport {
    pub estimated_ec: f64,
    pub balance: IonicBalance,
    pub antagonisms: Vec<Antagonism>,
    pub suitability: u32,
    pub ec_status: Option<EcStatus>,
}

pub fn evaluate_reservoir(
    mix: &NutrientMix,
    base_ec: f64,
    crop: Option<&CropProfile>,
) -> ReservoirReport {
    let ec = estimated_ec(mix, base_ec);
    ReservoirReport {
        estimated_ec: ec,
        balance: ionic_balance(mix),
        antagonisms: antagonisms(mix, ec, crop),
        suitability: crop.map_or(100, |crop| suitability_score(mix, ec, crop)),
        ec_status: crop
            .and_then(|crop| crop.nutrient_targets.as_ref())
            .map(|targets| ec_status(ec, targets)),
    }
}
