use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::model::{CropCategory, CropProfile};
use crate::error::{ChlorisError, Result};

pub const DEFAULT_CROP_ID: &str = "can-ind-001";

const BUILTIN_CROPS: &str = include_str!("../../data/crops.toml");

#[derive(Debug, Deserialize)]
struct CropTable {
    #[serde(default)]
    crops: Vec<CropProfile>,
}

/// In-memory crop reference table, kept sorted by crop name.
#[derive(Debug, Clone)]
pub struct CropDatabase {
    crops: Vec<CropProfile>,
}

impl CropDatabase {
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CROPS)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: CropTable = toml::from_str(content)?;
        Ok(Self::from_profiles(table.crops))
    }

    pub fn from_profiles(mut crops: Vec<CropProfile>) -> Self {
        crops.sort_by(|a, b| a.name.cmp(&b.name));
        info!(count = crops.len(), "Loaded crop table");
        Self { crops }
    }

    /// Merge an extra crop table from disk. Entries sharing an id replace the existing profile.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)?;
        let table: CropTable = toml::from_str(&content)?;
        let added = table.crops.len();

        for profile in table.crops {
            match self.crops.iter_mut().find(|existing| existing.id == profile.id) {
                Some(existing) => {
                    debug!(id = %profile.id, "Replacing built-in crop profile");
                    *existing = profile;
                }
                None => self.crops.push(profile),
            }
        }
        self.crops.sort_by(|a, b| a.name.cmp(&b.name));

        info!(path = %path.display(), added, "Merged crop table");
        Ok(added)
    }

    pub fn all(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&CropProfile> {
        self.crops.iter().find(|crop| crop.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&CropProfile> {
        self.by_id(id)
            .ok_or_else(|| ChlorisError::UnknownCrop(id.to_string()))
    }

    pub fn by_category(&self, category: CropCategory) -> Vec<&CropProfile> {
        self.crops
            .iter()
            .filter(|crop| crop.category == category)
            .collect()
    }

    /// Case-insensitive substring search over name, variety and scientific name.
    pub fn search(&self, query: &str) -> Vec<&CropProfile> {
        let needle = query.to_lowercase();
        self.crops
            .iter()
            .filter(|crop| {
                crop.name.to_lowercase().contains(&needle)
                    || crop.variety.to_lowercase().contains(&needle)
                    || crop.scientific_name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Cultivar browser filter. Crops without a resistance profile always clear the floor.
    pub fn filter(
        &self,
        query: &str,
        category: Option<CropCategory>,
        min_resistance: f64,
    ) -> Vec<&CropProfile> {
        let needle = query.to_lowercase();
        self.crops
            .iter()
            .filter(|crop| {
                crop.name.to_lowercase().contains(&needle)
                    || crop.variety.to_lowercase().contains(&needle)
            })
            .filter(|crop| category.map_or(true, |wanted| crop.category == wanted))
            .filter(|crop| {
                crop.resistance
                    .map_or(true, |resistance| resistance.peak() >= min_resistance)
            })
            .collect()
    }

    pub fn default_crop(&self) -> Option<&CropProfile> {
        self.by_id(DEFAULT_CROP_ID).or_else(|| self.crops.first())
    }
}
