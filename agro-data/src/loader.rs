use std::io::Read;

use agro_core::tables::{CropBaseline, CropCostRecord, Micronutrients, SoilProfile, SoilTexture};
use agro_core::{FarmRepository, RepositoryError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading baseline data.
#[derive(Debug, Error)]
pub enum BaselineLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for BaselineLoaderError {
    fn from(err: csv::Error) -> Self {
        BaselineLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the crop baselines CSV file.
///
/// Columns: `crop`, `base_yield_t_ha`, `water_need_mm_day`, `season_days`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CropBaselineRecord {
    pub crop: String,
    pub base_yield_t_ha: Decimal,
    pub water_need_mm_day: Decimal,
    pub season_days: i32,
}

impl CropBaselineRecord {
    pub fn into_baseline(self) -> CropBaseline {
        CropBaseline {
            crop: self.crop,
            base_yield_t_ha: self.base_yield_t_ha,
            water_need_mm_day: self.water_need_mm_day,
            season_days: self.season_days,
        }
    }
}

/// A single record from the crop costs CSV file.
///
/// Columns: `crop`, the seven per-hectare cost components, `market_price`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CropCostCsvRecord {
    pub crop: String,
    pub seeds: Decimal,
    pub fertilizers: Decimal,
    pub pesticides: Decimal,
    pub irrigation: Decimal,
    pub labor: Decimal,
    pub machinery: Decimal,
    pub others: Decimal,
    pub market_price: Decimal,
}

impl CropCostCsvRecord {
    pub fn into_record(self) -> CropCostRecord {
        CropCostRecord {
            crop: self.crop,
            seeds: self.seeds,
            fertilizers: self.fertilizers,
            pesticides: self.pesticides,
            irrigation: self.irrigation,
            labor: self.labor,
            machinery: self.machinery,
            others: self.others,
            market_price: self.market_price,
        }
    }
}

/// A single record from the soil factors CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SoilFactorRecord {
    pub soil: String,
    pub factor: Decimal,
}

/// A single record from the soil profiles CSV file. The flat CSV columns map
/// onto the nested micronutrient and texture structs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SoilProfileRecord {
    pub soil: String,
    pub ph: Decimal,
    pub organic_matter_pct: Decimal,
    pub nitrogen: Decimal,
    pub phosphorus: Decimal,
    pub potassium: Decimal,
    pub zinc: Decimal,
    pub iron: Decimal,
    pub manganese: Decimal,
    pub copper: Decimal,
    pub boron: Decimal,
    pub sand: Decimal,
    pub silt: Decimal,
    pub clay: Decimal,
    pub health_score: i32,
}

impl SoilProfileRecord {
    pub fn into_profile(self) -> SoilProfile {
        SoilProfile {
            soil: self.soil,
            ph: self.ph,
            organic_matter_pct: self.organic_matter_pct,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            micronutrients: Micronutrients {
                zinc: self.zinc,
                iron: self.iron,
                manganese: self.manganese,
                copper: self.copper,
                boron: self.boron,
            },
            texture: SoilTexture {
                sand: self.sand,
                silt: self.silt,
                clay: self.clay,
            },
            health_score: self.health_score,
        }
    }
}

/// How many rows of each dataset a load pass wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub crop_baselines: usize,
    pub crop_costs: usize,
    pub soil_factors: usize,
    pub soil_profiles: usize,
}

impl LoadSummary {
    pub fn total(&self) -> usize {
        self.crop_baselines + self.crop_costs + self.soil_factors + self.soil_profiles
    }
}

/// Loader for baseline data from CSV files.
///
/// Parsing and loading are separate steps so the loader works with any
/// [`FarmRepository`] backend. Loading deletes and re-inserts each key, which
/// makes repeated loads idempotent.
pub struct BaselineLoader;

impl BaselineLoader {
    fn parse<R: Read, T: serde::de::DeserializeOwned>(
        reader: R
    ) -> Result<Vec<T>, BaselineLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            records.push(result?);
        }

        Ok(records)
    }

    pub fn parse_crop_baselines<R: Read>(
        reader: R
    ) -> Result<Vec<CropBaselineRecord>, BaselineLoaderError> {
        Self::parse(reader)
    }

    pub fn parse_crop_costs<R: Read>(
        reader: R
    ) -> Result<Vec<CropCostCsvRecord>, BaselineLoaderError> {
        Self::parse(reader)
    }

    pub fn parse_soil_factors<R: Read>(
        reader: R
    ) -> Result<Vec<SoilFactorRecord>, BaselineLoaderError> {
        Self::parse(reader)
    }

    pub fn parse_soil_profiles<R: Read>(
        reader: R
    ) -> Result<Vec<SoilProfileRecord>, BaselineLoaderError> {
        Self::parse(reader)
    }

    /// Loads crop baseline records, replacing any existing rows for the same
    /// crops.
    pub async fn load_crop_baselines<R: FarmRepository + ?Sized>(
        repo: &R,
        records: &[CropBaselineRecord],
    ) -> Result<usize, BaselineLoaderError> {
        let mut inserted = 0;
        for record in records {
            repo.delete_crop_baseline(&record.crop).await?;
            repo.insert_crop_baseline(&record.clone().into_baseline())
                .await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Loads crop cost records, replacing any existing rows for the same
    /// crops.
    pub async fn load_crop_costs<R: FarmRepository + ?Sized>(
        repo: &R,
        records: &[CropCostCsvRecord],
    ) -> Result<usize, BaselineLoaderError> {
        let mut inserted = 0;
        for record in records {
            repo.delete_crop_cost(&record.crop).await?;
            repo.insert_crop_cost(&record.clone().into_record()).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Loads soil retention factors, replacing any existing rows for the same
    /// soils.
    pub async fn load_soil_factors<R: FarmRepository + ?Sized>(
        repo: &R,
        records: &[SoilFactorRecord],
    ) -> Result<usize, BaselineLoaderError> {
        let mut inserted = 0;
        for record in records {
            repo.delete_soil_factor(&record.soil).await?;
            repo.insert_soil_factor(&record.soil, record.factor).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Loads soil profiles, replacing any existing rows for the same soils.
    pub async fn load_soil_profiles<R: FarmRepository + ?Sized>(
        repo: &R,
        records: &[SoilProfileRecord],
    ) -> Result<usize, BaselineLoaderError> {
        let mut inserted = 0;
        for record in records {
            repo.delete_soil_profile(&record.soil).await?;
            repo.insert_soil_profile(&record.clone().into_profile())
                .await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Seeds every built-in dataset into the repository.
    pub async fn load_builtin<R: FarmRepository + ?Sized>(
        repo: &R
    ) -> Result<LoadSummary, BaselineLoaderError> {
        let crops = Self::parse_crop_baselines(crate::BUILTIN_CROP_BASELINES.as_bytes())?;
        let costs = Self::parse_crop_costs(crate::BUILTIN_CROP_COSTS.as_bytes())?;
        let factors = Self::parse_soil_factors(crate::BUILTIN_SOIL_FACTORS.as_bytes())?;
        let profiles = Self::parse_soil_profiles(crate::BUILTIN_SOIL_PROFILES.as_bytes())?;

        Ok(LoadSummary {
            crop_baselines: Self::load_crop_baselines(repo, &crops).await?,
            crop_costs: Self::load_crop_costs(repo, &costs).await?,
            soil_factors: Self::load_soil_factors(repo, &factors).await?,
            soil_profiles: Self::load_soil_profiles(repo, &profiles).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_BASELINES_CSV: &str = "\
crop,base_yield_t_ha,water_need_mm_day,season_days
rice,4.5,8.5,120
wheat,3.2,4.5,140
";

    #[test]
    fn parse_crop_baselines_reads_every_row() {
        let records = BaselineLoader::parse_crop_baselines(TEST_BASELINES_CSV.as_bytes())
            .expect("Failed to parse CSV");

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            CropBaselineRecord {
                crop: "rice".to_string(),
                base_yield_t_ha: dec!(4.5),
                water_need_mm_day: dec!(8.5),
                season_days: 120,
            }
        );
    }

    #[test]
    fn parse_crop_costs_reads_all_components() {
        let csv = "crop,seeds,fertilizers,pesticides,irrigation,labor,machinery,others,market_price\n\
                   rice,2500,5000,2000,3000,8000,4000,1500,20000";

        let records =
            BaselineLoader::parse_crop_costs(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seeds, dec!(2500));
        assert_eq!(records[0].others, dec!(1500));
        assert_eq!(records[0].market_price, dec!(20000));
    }

    #[test]
    fn parse_soil_profiles_maps_nested_fields() {
        let csv = "soil,ph,organic_matter_pct,nitrogen,phosphorus,potassium,zinc,iron,manganese,copper,boron,sand,silt,clay,health_score\n\
                   alluvial,7.2,2.8,75,65,80,0.8,4.5,2.1,0.9,0.6,40,40,20,85";

        let records =
            BaselineLoader::parse_soil_profiles(csv.as_bytes()).expect("Failed to parse CSV");
        let profile = records[0].clone().into_profile();

        assert_eq!(profile.micronutrients.zinc, dec!(0.8));
        assert_eq!(profile.texture.clay, dec!(20));
        assert_eq!(profile.health_score, 85);
    }

    #[test]
    fn parse_rejects_missing_columns() {
        let csv = "crop,base_yield_t_ha\nrice,4.5";

        let result = BaselineLoader::parse_crop_baselines(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        let BaselineLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn parse_rejects_bad_decimal() {
        let csv = "soil,factor\nsandy,abc";

        let result = BaselineLoader::parse_soil_factors(csv.as_bytes());

        let err = result.expect_err("Should fail for invalid decimal");
        assert!(matches!(err, BaselineLoaderError::CsvParse(_)));
    }

    #[test]
    fn parse_empty_csv_yields_no_records() {
        let csv = "soil,factor\n";

        let records =
            BaselineLoader::parse_soil_factors(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }
}
