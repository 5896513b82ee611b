//! Baseline datasets for the advisory tables, and the loader that seeds them
//! into any [`agro_core::FarmRepository`] backend.

pub mod loader;

pub use loader::{
    BaselineLoader, BaselineLoaderError, CropBaselineRecord, CropCostCsvRecord, LoadSummary,
    SoilFactorRecord, SoilProfileRecord,
};

/// Built-in crop baselines (yield, water demand, season length).
pub const BUILTIN_CROP_BASELINES: &str = include_str!("../data/crop_baselines.csv");

/// Built-in per-hectare cost records and reference market prices.
pub const BUILTIN_CROP_COSTS: &str = include_str!("../data/crop_costs.csv");

/// Built-in soil water-retention factors.
pub const BUILTIN_SOIL_FACTORS: &str = include_str!("../data/soil_factors.csv");

/// Built-in soil reference profiles.
pub const BUILTIN_SOIL_PROFILES: &str = include_str!("../data/soil_profiles.csv");

/// Assembles [`agro_core::BaselineTables`] straight from the embedded
/// datasets, without touching a repository. Used as the first-run fallback
/// and in tests.
pub fn builtin_tables() -> Result<agro_core::BaselineTables, BaselineLoaderError> {
    let crops = BaselineLoader::parse_crop_baselines(BUILTIN_CROP_BASELINES.as_bytes())?
        .into_iter()
        .map(CropBaselineRecord::into_baseline)
        .collect();
    let costs = BaselineLoader::parse_crop_costs(BUILTIN_CROP_COSTS.as_bytes())?
        .into_iter()
        .map(CropCostCsvRecord::into_record)
        .collect();
    let soil_factors = BaselineLoader::parse_soil_factors(BUILTIN_SOIL_FACTORS.as_bytes())?
        .into_iter()
        .map(|r| (r.soil, r.factor))
        .collect();
    let soil_profiles = BaselineLoader::parse_soil_profiles(BUILTIN_SOIL_PROFILES.as_bytes())?
        .into_iter()
        .map(SoilProfileRecord::into_profile)
        .collect();

    Ok(agro_core::BaselineTables::new(
        crops,
        costs,
        soil_factors,
        soil_profiles,
    ))
}
