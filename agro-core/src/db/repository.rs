use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{FarmAssessment, NewFarmAssessment, OfflineCrop};
use crate::tables::{CropBaseline, CropCostRecord, SoilProfile};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage behind the advisory engine: the seeded baseline tables on the read
/// side, plus the small mutable state the dashboard keeps (saved assessments,
/// the offline crop list, and preferences).
#[async_trait]
pub trait FarmRepository: Send + Sync {
    // Crop baselines
    async fn insert_crop_baseline(&self, baseline: &CropBaseline) -> Result<(), RepositoryError>;
    async fn delete_crop_baseline(&self, crop: &str) -> Result<(), RepositoryError>;
    async fn list_crop_baselines(&self) -> Result<Vec<CropBaseline>, RepositoryError>;

    // Crop cost records
    async fn insert_crop_cost(&self, record: &CropCostRecord) -> Result<(), RepositoryError>;
    async fn delete_crop_cost(&self, crop: &str) -> Result<(), RepositoryError>;
    async fn list_crop_costs(&self) -> Result<Vec<CropCostRecord>, RepositoryError>;

    // Soil water-retention factors
    async fn insert_soil_factor(
        &self,
        soil: &str,
        factor: Decimal,
    ) -> Result<(), RepositoryError>;
    async fn delete_soil_factor(&self, soil: &str) -> Result<(), RepositoryError>;
    async fn list_soil_factors(&self) -> Result<Vec<(String, Decimal)>, RepositoryError>;

    // Soil profiles
    async fn insert_soil_profile(&self, profile: &SoilProfile) -> Result<(), RepositoryError>;
    async fn delete_soil_profile(&self, soil: &str) -> Result<(), RepositoryError>;
    async fn list_soil_profiles(&self) -> Result<Vec<SoilProfile>, RepositoryError>;

    // Saved assessments
    async fn create_assessment(
        &self,
        assessment: NewFarmAssessment,
    ) -> Result<FarmAssessment, RepositoryError>;
    async fn get_assessment(&self, id: i64) -> Result<FarmAssessment, RepositoryError>;
    async fn list_assessments(
        &self,
        crop: Option<&str>,
    ) -> Result<Vec<FarmAssessment>, RepositoryError>;
    async fn delete_assessment(&self, id: i64) -> Result<(), RepositoryError>;

    // Offline data
    async fn mark_crop_downloaded(
        &self,
        crop: &str,
        size_mb: Decimal,
    ) -> Result<(), RepositoryError>;
    async fn list_downloaded_crops(&self) -> Result<Vec<OfflineCrop>, RepositoryError>;
    async fn clear_offline_data(&self) -> Result<(), RepositoryError>;
    async fn set_last_synced(&self, when: DateTime<Utc>) -> Result<(), RepositoryError>;
    async fn last_synced(&self) -> Result<Option<DateTime<Utc>>, RepositoryError>;

    // Preferences
    async fn get_preference(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    async fn set_preference(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
}
