//! Cross compatibility and single-locus Mendelian predictions.

use serde::{Deserialize, Serialize};

use crate::crops::{AlleleType, CropProfile, GeneticTrait};
use crate::error::{ChlorisError, Result};

/// Parents can only be crossed within a species.
pub fn compatible(parent_a: &CropProfile, parent_b: &CropProfile) -> bool {
    parent_a.scientific_name == parent_b.scientific_name
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeProbability {
    pub phenotype: String,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraitPrediction {
    pub name: String,
    /// 2×2 grid of offspring genotypes, rows from parent A's alleles.
    pub punnett_square: Vec<Vec<String>>,
    pub probabilities: Vec<PhenotypeProbability>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeneticStability {
    #[serde(rename = "F1 Hybrid (Unstable)")]
    F1Hybrid,
    #[serde(rename = "True Breeding (Stable)")]
    TrueBreeding,
    #[serde(rename = "Polyhybrid (Highly Unstable)")]
    Polyhybrid,
    #[default]
    #[serde(other)]
    Unknown,
}

impl GeneticStability {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneticStability::F1Hybrid => "F1 Hybrid (Unstable)",
            GeneticStability::TrueBreeding => "True Breeding (Stable)",
            GeneticStability::Polyhybrid => "Polyhybrid (Highly Unstable)",
            GeneticStability::Unknown => "Unknown",
        }
    }
}

/// Predicted cross as returned by the breeding simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreedingResult {
    pub offspring_name: String,
    pub predicted_yield: String,
    pub genetic_stability: GeneticStability,
    pub traits: Vec<TraitPrediction>,
    /// The breeder's note.
    pub ai_analysis: String,
}

/// Split a diploid genotype into its two alleles ("Aa" -> "A", "a"; "spSP" -> "sp", "SP").
pub fn split_genotype(genotype: &str) -> Result<(String, String)> {
    let chars: Vec<char> = genotype.trim().chars().collect();
    if chars.is_empty() || chars.len() % 2 != 0 {
        return Err(ChlorisError::InvalidInput(format!(
            "genotype '{genotype}' does not split into two alleles"
        )));
    }
    let (first, second) = chars.split_at(chars.len() / 2);
    Ok((first.iter().collect(), second.iter().collect()))
}

fn is_dominant_allele(allele: &str) -> bool {
    allele.chars().next().is_some_and(char::is_uppercase)
}

/// Offspring genotype with the dominant allele written first.
fn combine(a: &str, b: &str) -> String {
    if !is_dominant_allele(a) && is_dominant_allele(b) {
        format!("{b}{a}")
    } else {
        format!("{a}{b}")
    }
}

/// Allele labels from a description like "L=Broad (Indica), l=Narrow (Sativa)".
fn phenotype_labels(allele_trait: &GeneticTrait) -> (String, String) {
    let mut dominant = None;
    let mut recessive = None;
    for entry in allele_trait.description.split(',') {
        if let Some((allele, label)) = entry.split_once('=') {
            let allele = allele.trim();
            let label = label.trim().to_string();
            if is_dominant_allele(allele) {
                dominant.get_or_insert(label);
            } else {
                recessive.get_or_insert(label);
            }
        }
    }
    (
        dominant.unwrap_or_else(|| format!("{} (dominant)", allele_trait.name)),
        recessive.unwrap_or_else(|| format!("{} (recessive)", allele_trait.name)),
    )
}

/// Local Punnett square for one locus shared by both parents.
pub fn punnett_square(parent_a: &GeneticTrait, parent_b: &GeneticTrait) -> Result<TraitPrediction> {
    let (a1, a2) = split_genotype(&parent_a.genotype)?;
    let (b1, b2) = split_genotype(&parent_b.genotype)?;

    let grid: Vec<Vec<String>> = [&a1, &a2]
        .iter()
        .map(|a| [&b1, &b2].iter().map(|b| combine(a, b)).collect())
        .collect();

    let (dominant_label, recessive_label) = phenotype_labels(parent_a);
    let mut counts: Vec<(String, u32)> = Vec::new();
    for genotype in grid.iter().flatten() {
        let phenotype = match parent_a.allele_type {
            AlleleType::CoDominant => genotype.clone(),
            AlleleType::Dominant | AlleleType::Recessive => {
                if is_dominant_allele(genotype) {
                    dominant_label.clone()
                } else {
                    recessive_label.clone()
                }
            }
        };
        match counts.iter_mut().find(|(existing, _)| *existing == phenotype) {
            Some((_, count)) => *count += 1,
            None => counts.push((phenotype, 1)),
        }
    }

    let total = grid.iter().map(Vec::len).sum::<usize>() as f64;
    let probabilities = counts
        .into_iter()
        .map(|(phenotype, count)| PhenotypeProbability {
            phenotype,
            probability: f64::from(count) / total,
        })
        .collect();

    Ok(TraitPrediction {
        name: parent_a.name.clone(),
        punnett_square: grid,
        probabilities,
    })
}

/// Punnett squares for every trait both parents carry, matched by trait id.
pub fn predict_traits(parent_a: &CropProfile, parent_b: &CropProfile) -> Result<Vec<TraitPrediction>> {
    parent_a
        .genetic_traits
        .iter()
        .filter_map(|trait_a| {
            parent_b
                .genetic_traits
                .iter()
                .find(|trait_b| trait_b.id == trait_a.id)
                .map(|trait_b| punnett_square(trait_a, trait_b))
        })
        .collect()
}

/// Stability implied by the parents' genotypes: all-homozygous identical parents breed
/// true, a single heterozygous locus gives an F1, more than one a polyhybrid.
pub fn expected_stability(predictions: &[TraitPrediction]) -> GeneticStability {
    let segregating = predictions
        .iter()
        .filter(|prediction| prediction.probabilities.len() > 1)
        .count();
    match segregating {
        0 => GeneticStability::TrueBreeding,
        1 => GeneticStability::F1Hybrid,
        _ => GeneticStability::Polyhybrid,
    }
}
