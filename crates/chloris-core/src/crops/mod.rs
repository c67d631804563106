pub mod database;
pub mod model;

pub use database::{CropDatabase, DEFAULT_CROP_ID};
pub use model::{
    AlleleType, CropCategory, CropProfile, GeneticTrait, Lineage, NutrientRequirements,
    PhotoperiodConfig, PhotoperiodType, ResistanceProfile, ResponseType, SpectrumSensitivity,
    StageTrigger, TargetRange, TerpeneLevel, TerpeneProfile, Vernalization,
};
