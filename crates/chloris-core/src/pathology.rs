//! Reference library of common pests, pathogens and deficiencies.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathogenType {
    Fungal,
    Pest,
    Nutrient,
    Bacterial,
    Viral,
}

impl PathogenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathogenType::Fungal => "Fungal",
            PathogenType::Pest => "Pest",
            PathogenType::Nutrient => "Nutrient",
            PathogenType::Bacterial => "Bacterial",
            PathogenType::Viral => "Viral",
        }
    }
}

impl fmt::Display for PathogenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "Low",
            ThreatLevel::Medium => "Medium",
            ThreatLevel::High => "High",
            ThreatLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PathogenProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub scientific_name: Option<&'static str>,
    pub pathogen_type: PathogenType,
    pub severity: ThreatLevel,
    pub symptoms: &'static [&'static str],
    pub conditions: &'static str,
    pub prevention: &'static str,
    pub organic_remedy: &'static str,
    pub chemical_remedy: &'static str,
}

static PATHOGENS: Lazy<Vec<PathogenProfile>> = Lazy::new(|| {
    vec![
        PathogenProfile {
            id: "pm",
            name: "Powdery Mildew",
            scientific_name: Some("Podosphaera xanthii"),
            pathogen_type: PathogenType::Fungal,
            severity: ThreatLevel::Medium,
            symptoms: &[
                "White flour-like dust on leaves",
                "Stunted growth",
                "Leaf curling",
                "Chlorotic spots",
            ],
            conditions: "High humidity spikes at night, low humidity during day, stagnation.",
            prevention: "Maintain stable RH < 50%, increase airflow, use sulfur burners.",
            organic_remedy: "Neem oil, Potassium Bicarbonate, Milk/Water spray (1:9).",
            chemical_remedy: "Myclobutanil, Propiconazole (Vegetative stage only).",
        },
        PathogenProfile {
            id: "botrytis",
            name: "Botrytis (Bud Rot)",
            scientific_name: Some("Botrytis cinerea"),
            pathogen_type: PathogenType::Fungal,
            severity: ThreatLevel::Critical,
            symptoms: &[
                "Brown/grey mushy buds",
                "Necrotic sugar leaves",
                "Fuzzy grey mold",
                "Rapid spread",
            ],
            conditions: "High humidity (>60%) in late flower, cool temperatures, dense canopy.",
            prevention: "Aggressive dehumidification, defoliation, sanitation.",
            organic_remedy: "Bacillus subtilis (Serenade), amputation of infected areas.",
            chemical_remedy: "None recommended for flowering biomass. Discard infected material.",
        },
        PathogenProfile {
            id: "mites",
            name: "Spider Mites",
            scientific_name: Some("Tetranychus urticae"),
            pathogen_type: PathogenType::Pest,
            severity: ThreatLevel::High,
            symptoms: &[
                "Stippling (white dots) on leaves",
                "Fine silk webbing",
                "Tiny moving specks under leaf",
            ],
            conditions: "Hot and dry environments promote rapid breeding.",
            prevention: "Regular scouting, maintained humidity, predator mites.",
            organic_remedy: "Beauveria bassiana, Predatory Mites (P. persimilis), Spinosad.",
            chemical_remedy: "Abamectin (Strict withdrawal periods apply).",
        },
        PathogenProfile {
            id: "aphids",
            name: "Aphids",
            scientific_name: Some("Aphidoidea"),
            pathogen_type: PathogenType::Pest,
            severity: ThreatLevel::Medium,
            symptoms: &[
                "Clusters of soft-bodied insects",
                "Honeydew residue (shiny leaves)",
                "Ants farming them",
                "Yellowing leaves",
            ],
            conditions: "High nitrogen levels, lack of predators, mild temperatures.",
            prevention: "Companion planting, ladybugs, lacewings.",
            organic_remedy: "Insecticidal soaps, Neem oil, Ladybugs.",
            chemical_remedy: "Imidacloprid (Systemic - Veg Only).",
        },
        PathogenProfile {
            id: "thrips",
            name: "Thrips",
            scientific_name: Some("Frankliniella occidentalis"),
            pathogen_type: PathogenType::Pest,
            severity: ThreatLevel::Medium,
            symptoms: &[
                "Silver/bronze scarring on leaves",
                "Tiny black fecal specks",
                "Deformed new growth",
            ],
            conditions: "Warm temperatures, low humidity.",
            prevention: "Blue sticky traps, predatory mites (A. cucumeris).",
            organic_remedy: "Spinosad (Captain Jacks), Beauveria bassiana.",
            chemical_remedy: "Spinetoram.",
        },
        PathogenProfile {
            id: "gnats",
            name: "Fungus Gnats",
            scientific_name: Some("Bradysia spp."),
            pathogen_type: PathogenType::Pest,
            severity: ThreatLevel::Low,
            symptoms: &["Flying insects near soil", "Larvae eating roots", "Slow growth"],
            conditions: "Overwatering, wet topsoil, decaying organic matter.",
            prevention: "Allow topsoil to dry, bottom water, use yellow sticky traps.",
            organic_remedy: "BTI (Mosquito Bits), Nematodes (SF), Diatomaceous Earth.",
            chemical_remedy: "Pyrethrin drenches.",
        },
        PathogenProfile {
            id: "n-def",
            name: "Nitrogen Deficiency",
            scientific_name: None,
            pathogen_type: PathogenType::Nutrient,
            severity: ThreatLevel::Medium,
            symptoms: &[
                "Yellowing of lower (old) leaves",
                "General pale green color",
                "Slow growth",
                "Leaves dropping",
            ],
            conditions: "Low EC, pH lockout, or end-of-cycle fade.",
            prevention: "Balanced feeding schedule, pH monitoring.",
            organic_remedy: "Fish Emulsion, Blood Meal, Alfalfa tea.",
            chemical_remedy: "Calcium Nitrate, Ammonium Nitrate.",
        },
        PathogenProfile {
            id: "mg-def",
            name: "Magnesium Deficiency",
            scientific_name: None,
            pathogen_type: PathogenType::Nutrient,
            severity: ThreatLevel::Medium,
            symptoms: &[
                "Interveinal chlorosis (yellowing between veins)",
                "Tiger-stripe appearance",
                "Lower leaves curl upwards (praying)",
            ],
            conditions: "Low pH (<5.8), excess Calcium or Potassium (Lockout).",
            prevention: "Use Cal-Mag supplement, check runoff pH.",
            organic_remedy: "Epsom Salts (Magnesium Sulfate) foliar spray.",
            chemical_remedy: "Magnesium Nitrate, Cal-Mag.",
        },
        PathogenProfile {
            id: "fe-def",
            name: "Iron Deficiency",
            scientific_name: None,
            pathogen_type: PathogenType::Nutrient,
            severity: ThreatLevel::Medium,
            symptoms: &[
                "Bright yellowing of NEW growth",
                "Veins remain green (interveinal chlorosis)",
                "Bleaching in severe cases",
            ],
            conditions: "High pH (> 6.5), wet root zone, cold root zone.",
            prevention: "Maintain pH < 6.2, ensure root aeration.",
            organic_remedy: "Chelated Iron, Glacial Rock Dust.",
            chemical_remedy: "DTPA or EDDHA Iron Chelates.",
        },
        PathogenProfile {
            id: "ca-def",
            name: "Calcium Deficiency",
            scientific_name: None,
            pathogen_type: PathogenType::Nutrient,
            severity: ThreatLevel::High,
            symptoms: &[
                "Brown irregular spots on new leaves",
                "Tip burn",
                "Blossom end rot",
                "Weak stems",
            ],
            conditions: "Low transpiration (High Humidity), pH < 6.0, Potassium excess.",
            prevention: "Ensure airflow, Cal-Mag supplementation.",
            organic_remedy: "Dolomite Lime (slow), Oyster Shell flour.",
            chemical_remedy: "Calcium Nitrate, Cal-Mag supplement.",
        },
        PathogenProfile {
            id: "septoria",
            name: "Septoria Leaf Spot",
            scientific_name: Some("Septoria lycopersici"),
            pathogen_type: PathogenType::Fungal,
            severity: ThreatLevel::High,
            symptoms: &[
                "Yellow spots turning brown/grey",
                "Dark borders around spots",
                "Starts on lower leaves",
            ],
            conditions: "Warm, wet, and humid conditions. Splashing water spreads spores.",
            prevention: "Mulch soil, avoid overhead watering, prune lower leaves.",
            organic_remedy: "Copper Fungicide, Serenade.",
            chemical_remedy: "Chlorothalonil.",
        },
        PathogenProfile {
            id: "root-rot",
            name: "Root Rot",
            scientific_name: Some("Pythium spp."),
            pathogen_type: PathogenType::Fungal,
            severity: ThreatLevel::Critical,
            symptoms: &["Brown slimy roots", "Foul smell", "Wilting despite wet medium"],
            conditions: "High water temp (>24°C), low dissolved oxygen, anaerobic zones.",
            prevention: "Water chillers, air stones, H2O2 flushes.",
            organic_remedy: "Beneficial Bacteria (Hydroguard), H2O2 flush.",
            chemical_remedy: "Ridomil Gold (Commercial use only).",
        },
        PathogenProfile {
            id: "russet",
            name: "Russet Mites",
            scientific_name: Some("Aceria anthocoptes"),
            pathogen_type: PathogenType::Pest,
            severity: ThreatLevel::Critical,
            symptoms: &[
                "\"Hemp Russeting\" (browning)",
                "Leaves curl upward (tacoing)",
                "Dull matte appearance",
            ],
            conditions: "Wind dispersion, contaminated clones.",
            prevention: "Quarantine new cuts, micronized sulfur.",
            organic_remedy: "Micronized Sulfur (Veg only), Citric Acid sprays.",
            chemical_remedy: "Spiromesifen (Oberon) - Strict regulation.",
        },
    ]
});

pub fn all_pathogens() -> &'static [PathogenProfile] {
    PATHOGENS.as_slice()
}

pub fn pathogen(id: &str) -> Option<&'static PathogenProfile> {
    PATHOGENS.iter().find(|profile| profile.id == id)
}

/// Case-insensitive library search over name, type and symptoms. An empty query lists all.
pub fn search(query: &str) -> Vec<&'static PathogenProfile> {
    let needle = query.trim().to_lowercase();
    PATHOGENS
        .iter()
        .filter(|profile| {
            profile.name.to_lowercase().contains(&needle)
                || profile.pathogen_type.as_str().to_lowercase().contains(&needle)
                || profile
                    .symptoms
                    .iter()
                    .any(|symptom| symptom.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Link a free-text diagnosis to a library entry: the first profile whose name appears
/// in the diagnosis, or whose name contains the whole diagnosis.
pub fn match_diagnosis(diagnosis: &str) -> Option<&'static PathogenProfile> {
    let diagnosis = diagnosis.trim().to_lowercase();
    if diagnosis.is_empty() {
        return None;
    }
    PATHOGENS.iter().find(|profile| {
        let name = profile.name.to_lowercase();
        diagnosis.contains(&name) || name.contains(&diagnosis)
    })
}

/// Image diagnosis as returned by the vision model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionDiagnosis {
    pub diagnosis: String,
    /// 0-100.
    pub confidence: f64,
    pub symptoms: Vec<String>,
    pub cause: String,
    pub remedy: String,
    pub is_healthy: bool,
}

impl VisionDiagnosis {
    pub fn library_match(&self) -> Option<&'static PathogenProfile> {
        match_diagnosis(&self.diagnosis)
    }
}
