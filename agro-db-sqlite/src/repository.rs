use agro_core::tables::{CropBaseline, CropCostRecord, Micronutrients, SoilProfile, SoilTexture};
use agro_core::{FarmAssessment, FarmRepository, NewFarmAssessment, OfflineCrop, RepositoryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::debug;

use crate::decimal::{decimal_to_f64, get_decimal, get_optional_decimal};

/// Preference key holding the offline-data sync timestamp.
const LAST_SYNCED_KEY: &str = "last_synced";

pub struct SqliteRepository {
    pool: SqlitePool,
}

fn db_err(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_crop_baseline(row: &SqliteRow) -> Result<CropBaseline, RepositoryError> {
    Ok(CropBaseline {
        crop: row.try_get("crop").map_err(db_err)?,
        base_yield_t_ha: get_decimal(row, "base_yield_t_ha")?,
        water_need_mm_day: get_decimal(row, "water_need_mm_day")?,
        season_days: row.try_get("season_days").map_err(db_err)?,
    })
}

fn row_to_crop_cost(row: &SqliteRow) -> Result<CropCostRecord, RepositoryError> {
    Ok(CropCostRecord {
        crop: row.try_get("crop").map_err(db_err)?,
        seeds: get_decimal(row, "seeds")?,
        fertilizers: get_decimal(row, "fertilizers")?,
        pesticides: get_decimal(row, "pesticides")?,
        irrigation: get_decimal(row, "irrigation")?,
        labor: get_decimal(row, "labor")?,
        machinery: get_decimal(row, "machinery")?,
        others: get_decimal(row, "others")?,
        market_price: get_decimal(row, "market_price")?,
    })
}

fn row_to_soil_profile(row: &SqliteRow) -> Result<SoilProfile, RepositoryError> {
    Ok(SoilProfile {
        soil: row.try_get("soil").map_err(db_err)?,
        ph: get_decimal(row, "ph")?,
        organic_matter_pct: get_decimal(row, "organic_matter_pct")?,
        nitrogen: get_decimal(row, "nitrogen")?,
        phosphorus: get_decimal(row, "phosphorus")?,
        potassium: get_decimal(row, "potassium")?,
        micronutrients: Micronutrients {
            zinc: get_decimal(row, "zinc")?,
            iron: get_decimal(row, "iron")?,
            manganese: get_decimal(row, "manganese")?,
            copper: get_decimal(row, "copper")?,
            boron: get_decimal(row, "boron")?,
        },
        texture: SoilTexture {
            sand: get_decimal(row, "sand")?,
            silt: get_decimal(row, "silt")?,
            clay: get_decimal(row, "clay")?,
        },
        health_score: row.try_get("health_score").map_err(db_err)?,
    })
}

fn row_to_assessment(row: &SqliteRow) -> Result<FarmAssessment, RepositoryError> {
    Ok(FarmAssessment {
        id: row.try_get("id").map_err(db_err)?,
        crop: row.try_get("crop").map_err(db_err)?,
        soil: row.try_get("soil").map_err(db_err)?,
        area_ha: get_decimal(row, "area_ha")?,
        fertilizer_kg_ha: get_decimal(row, "fertilizer_kg_ha")?,
        rainfall_mm: get_decimal(row, "rainfall_mm")?,
        temperature_c: get_decimal(row, "temperature_c")?,
        humidity_pct: get_decimal(row, "humidity_pct")?,
        sunlight_hours: get_decimal(row, "sunlight_hours")?,
        estimated_yield_t: get_optional_decimal(row, "estimated_yield_t")?,
        total_cost: get_optional_decimal(row, "total_cost")?,
        net_profit: get_optional_decimal(row, "net_profit")?,
        water_daily_mm: get_optional_decimal(row, "water_daily_mm")?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| db_err(format!("Failed to get created_at: {}", e)))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| db_err(format!("Failed to get updated_at: {}", e)))?,
    })
}

fn row_to_offline_crop(row: &SqliteRow) -> Result<OfflineCrop, RepositoryError> {
    Ok(OfflineCrop {
        crop: row.try_get("crop").map_err(db_err)?,
        size_mb: get_decimal(row, "size_mb")?,
        downloaded_at: row
            .try_get::<DateTime<Utc>, _>("downloaded_at")
            .map_err(|e| db_err(format!("Failed to get downloaded_at: {}", e)))?,
    })
}

#[async_trait]
impl FarmRepository for SqliteRepository {
    async fn insert_crop_baseline(
        &self,
        baseline: &CropBaseline,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO crop_baseline (crop, base_yield_t_ha, water_need_mm_day, season_days)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&baseline.crop)
        .bind(decimal_to_f64(baseline.base_yield_t_ha))
        .bind(decimal_to_f64(baseline.water_need_mm_day))
        .bind(baseline.season_days)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_crop_baseline(&self, crop: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM crop_baseline WHERE crop = ?")
            .bind(crop)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_crop_baselines(&self) -> Result<Vec<CropBaseline>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT crop, base_yield_t_ha, water_need_mm_day, season_days
             FROM crop_baseline ORDER BY crop",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_crop_baseline).collect()
    }

    async fn insert_crop_cost(&self, record: &CropCostRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO crop_cost (crop, seeds, fertilizers, pesticides, irrigation,
                                    labor, machinery, others, market_price)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.crop)
        .bind(decimal_to_f64(record.seeds))
        .bind(decimal_to_f64(record.fertilizers))
        .bind(decimal_to_f64(record.pesticides))
        .bind(decimal_to_f64(record.irrigation))
        .bind(decimal_to_f64(record.labor))
        .bind(decimal_to_f64(record.machinery))
        .bind(decimal_to_f64(record.others))
        .bind(decimal_to_f64(record.market_price))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_crop_cost(&self, crop: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM crop_cost WHERE crop = ?")
            .bind(crop)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_crop_costs(&self) -> Result<Vec<CropCostRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT crop, seeds, fertilizers, pesticides, irrigation, labor, machinery,
                    others, market_price
             FROM crop_cost ORDER BY crop",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_crop_cost).collect()
    }

    async fn insert_soil_factor(
        &self,
        soil: &str,
        factor: Decimal,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO soil_factor (soil, factor) VALUES (?, ?)")
            .bind(soil)
            .bind(decimal_to_f64(factor))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_soil_factor(&self, soil: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM soil_factor WHERE soil = ?")
            .bind(soil)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_soil_factors(&self) -> Result<Vec<(String, Decimal)>, RepositoryError> {
        let rows = sqlx::query("SELECT soil, factor FROM soil_factor ORDER BY soil")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter()
            .map(|row| {
                let soil: String = row.try_get("soil").map_err(db_err)?;
                let factor = get_decimal(row, "factor")?;
                Ok((soil, factor))
            })
            .collect()
    }

    async fn insert_soil_profile(&self, profile: &SoilProfile) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO soil_profile (soil, ph, organic_matter_pct, nitrogen, phosphorus,
                                       potassium, zinc, iron, manganese, copper, boron,
                                       sand, silt, clay, health_score)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&profile.soil)
        .bind(decimal_to_f64(profile.ph))
        .bind(decimal_to_f64(profile.organic_matter_pct))
        .bind(decimal_to_f64(profile.nitrogen))
        .bind(decimal_to_f64(profile.phosphorus))
        .bind(decimal_to_f64(profile.potassium))
        .bind(decimal_to_f64(profile.micronutrients.zinc))
        .bind(decimal_to_f64(profile.micronutrients.iron))
        .bind(decimal_to_f64(profile.micronutrients.manganese))
        .bind(decimal_to_f64(profile.micronutrients.copper))
        .bind(decimal_to_f64(profile.micronutrients.boron))
        .bind(decimal_to_f64(profile.texture.sand))
        .bind(decimal_to_f64(profile.texture.silt))
        .bind(decimal_to_f64(profile.texture.clay))
        .bind(profile.health_score)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete_soil_profile(&self, soil: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM soil_profile WHERE soil = ?")
            .bind(soil)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_soil_profiles(&self) -> Result<Vec<SoilProfile>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT soil, ph, organic_matter_pct, nitrogen, phosphorus, potassium,
                    zinc, iron, manganese, copper, boron, sand, silt, clay, health_score
             FROM soil_profile ORDER BY soil",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_soil_profile).collect()
    }

    async fn create_assessment(
        &self,
        assessment: NewFarmAssessment,
    ) -> Result<FarmAssessment, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO farm_assessment (crop, soil, area_ha, fertilizer_kg_ha, rainfall_mm,
                                          temperature_c, humidity_pct, sunlight_hours,
                                          estimated_yield_t, total_cost, net_profit,
                                          water_daily_mm, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&assessment.crop)
        .bind(&assessment.soil)
        .bind(decimal_to_f64(assessment.area_ha))
        .bind(decimal_to_f64(assessment.fertilizer_kg_ha))
        .bind(decimal_to_f64(assessment.rainfall_mm))
        .bind(decimal_to_f64(assessment.temperature_c))
        .bind(decimal_to_f64(assessment.humidity_pct))
        .bind(decimal_to_f64(assessment.sunlight_hours))
        .bind(assessment.estimated_yield_t.map(decimal_to_f64))
        .bind(assessment.total_cost.map(decimal_to_f64))
        .bind(assessment.net_profit.map(decimal_to_f64))
        .bind(assessment.water_daily_mm.map(decimal_to_f64))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = result.last_insert_rowid();
        debug!(id, crop = %assessment.crop, "saved farm assessment");
        self.get_assessment(id).await
    }

    async fn get_assessment(&self, id: i64) -> Result<FarmAssessment, RepositoryError> {
        let row = sqlx::query("SELECT * FROM farm_assessment WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_assessment(&row)
    }

    async fn list_assessments(
        &self,
        crop: Option<&str>,
    ) -> Result<Vec<FarmAssessment>, RepositoryError> {
        let rows = match crop {
            Some(crop) => {
                sqlx::query(
                    "SELECT * FROM farm_assessment WHERE crop = ?
                     ORDER BY created_at DESC, id DESC",
                )
                .bind(crop)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query("SELECT * FROM farm_assessment ORDER BY created_at DESC, id DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(db_err)?;

        rows.iter().map(row_to_assessment).collect()
    }

    async fn delete_assessment(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM farm_assessment WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn mark_crop_downloaded(
        &self,
        crop: &str,
        size_mb: Decimal,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO offline_crop (crop, size_mb, downloaded_at) VALUES (?, ?, ?)
             ON CONFLICT(crop) DO UPDATE SET
                 size_mb = excluded.size_mb,
                 downloaded_at = excluded.downloaded_at",
        )
        .bind(crop)
        .bind(decimal_to_f64(size_mb))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn list_downloaded_crops(&self) -> Result<Vec<OfflineCrop>, RepositoryError> {
        let rows = sqlx::query("SELECT crop, size_mb, downloaded_at FROM offline_crop ORDER BY crop")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(row_to_offline_crop).collect()
    }

    async fn clear_offline_data(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM offline_crop")
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        sqlx::query("DELETE FROM preference WHERE key = ?")
            .bind(LAST_SYNCED_KEY)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn set_last_synced(&self, when: DateTime<Utc>) -> Result<(), RepositoryError> {
        self.set_preference(LAST_SYNCED_KEY, &when.to_rfc3339()).await
    }

    async fn last_synced(&self) -> Result<Option<DateTime<Utc>>, RepositoryError> {
        match self.get_preference(LAST_SYNCED_KEY).await? {
            Some(value) => DateTime::parse_from_rfc3339(&value)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| db_err(format!("Invalid last_synced timestamp '{}': {}", value, e))),
            None => Ok(None),
        }
    }

    async fn get_preference(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM preference WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.map(|r| r.try_get("value").map_err(db_err)).transpose()
    }

    async fn set_preference(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO preference (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        let repo = SqliteRepository::new_with_pool(pool);
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn rice_baseline() -> CropBaseline {
        CropBaseline {
            crop: "rice".to_string(),
            base_yield_t_ha: dec!(4.5),
            water_need_mm_day: dec!(8.5),
            season_days: 120,
        }
    }

    #[tokio::test]
    async fn crop_baseline_round_trips() {
        let repo = setup().await;

        repo.insert_crop_baseline(&rice_baseline())
            .await
            .expect("insert failed");
        let baselines = repo.list_crop_baselines().await.expect("list failed");

        assert_eq!(baselines, vec![rice_baseline()]);
    }

    #[tokio::test]
    async fn deleting_a_baseline_removes_it() {
        let repo = setup().await;
        repo.insert_crop_baseline(&rice_baseline())
            .await
            .expect("insert failed");

        repo.delete_crop_baseline("rice").await.expect("delete failed");

        assert!(repo.list_crop_baselines().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn soil_profile_round_trips_nested_fields() {
        let repo = setup().await;
        let profile = SoilProfile {
            soil: "alluvial".to_string(),
            ph: dec!(7.2),
            organic_matter_pct: dec!(2.8),
            nitrogen: dec!(75),
            phosphorus: dec!(65),
            potassium: dec!(80),
            micronutrients: Micronutrients {
                zinc: dec!(0.8),
                iron: dec!(4.5),
                manganese: dec!(2.1),
                copper: dec!(0.9),
                boron: dec!(0.6),
            },
            texture: SoilTexture {
                sand: dec!(40),
                silt: dec!(40),
                clay: dec!(20),
            },
            health_score: 85,
        };

        repo.insert_soil_profile(&profile).await.expect("insert failed");
        let profiles = repo.list_soil_profiles().await.expect("list failed");

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].micronutrients.zinc, dec!(0.8));
        assert_eq!(profiles[0].texture.clay, dec!(20));
        assert_eq!(profiles[0].health_score, 85);
    }

    #[tokio::test]
    async fn soil_factors_round_trip() {
        let repo = setup().await;

        repo.insert_soil_factor("sandy", dec!(0.7))
            .await
            .expect("insert failed");
        repo.insert_soil_factor("clayey", dec!(1.3))
            .await
            .expect("insert failed");

        let factors = repo.list_soil_factors().await.expect("list failed");
        assert_eq!(
            factors,
            vec![
                ("clayey".to_string(), dec!(1.3)),
                ("sandy".to_string(), dec!(0.7)),
            ]
        );
    }

    fn new_assessment() -> NewFarmAssessment {
        NewFarmAssessment {
            crop: "rice".to_string(),
            soil: "alluvial".to_string(),
            area_ha: dec!(2),
            fertilizer_kg_ha: dec!(100),
            rainfall_mm: dec!(50),
            temperature_c: dec!(25),
            humidity_pct: dec!(60),
            sunlight_hours: dec!(6),
            estimated_yield_t: Some(dec!(9)),
            total_cost: Some(dec!(52000)),
            net_profit: Some(dec!(128000)),
            water_daily_mm: Some(dec!(8.5)),
        }
    }

    #[tokio::test]
    async fn assessment_create_and_get() {
        let repo = setup().await;

        let created = repo
            .create_assessment(new_assessment())
            .await
            .expect("create failed");
        let fetched = repo.get_assessment(created.id).await.expect("get failed");

        assert_eq!(created, fetched);
        assert_eq!(fetched.crop, "rice");
        assert_eq!(fetched.estimated_yield_t, Some(dec!(9)));
        assert_eq!(fetched.total_cost, Some(dec!(52000)));
    }

    #[tokio::test]
    async fn assessment_list_filters_by_crop() {
        let repo = setup().await;
        repo.create_assessment(new_assessment()).await.unwrap();
        let mut wheat = new_assessment();
        wheat.crop = "wheat".to_string();
        repo.create_assessment(wheat).await.unwrap();

        let rice_only = repo.list_assessments(Some("rice")).await.unwrap();
        let all = repo.list_assessments(None).await.unwrap();

        assert_eq!(rice_only.len(), 1);
        assert_eq!(rice_only[0].crop, "rice");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn deleting_a_missing_assessment_is_not_found() {
        let repo = setup().await;

        let result = repo.delete_assessment(42).await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn assessment_delete_removes_the_row() {
        let repo = setup().await;
        let created = repo.create_assessment(new_assessment()).await.unwrap();

        repo.delete_assessment(created.id).await.expect("delete failed");

        let result = repo.get_assessment(created.id).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn offline_crops_upsert_and_clear() {
        let repo = setup().await;

        repo.mark_crop_downloaded("rice", dec!(4.2)).await.unwrap();
        repo.mark_crop_downloaded("rice", dec!(5.1)).await.unwrap();
        repo.mark_crop_downloaded("wheat", dec!(3.0)).await.unwrap();

        let crops = repo.list_downloaded_crops().await.unwrap();
        assert_eq!(crops.len(), 2);
        assert_eq!(crops[0].crop, "rice");
        assert_eq!(crops[0].size_mb, dec!(5.1));

        repo.clear_offline_data().await.unwrap();
        assert!(repo.list_downloaded_crops().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn last_synced_round_trips_and_clears() {
        let repo = setup().await;

        assert_eq!(repo.last_synced().await.unwrap(), None);

        let when = Utc::now();
        repo.set_last_synced(when).await.unwrap();
        let stored = repo.last_synced().await.unwrap().expect("timestamp missing");
        assert_eq!(stored.timestamp(), when.timestamp());

        repo.clear_offline_data().await.unwrap();
        assert_eq!(repo.last_synced().await.unwrap(), None);
    }

    #[tokio::test]
    async fn preferences_overwrite_on_set() {
        let repo = setup().await;

        assert_eq!(repo.get_preference("language").await.unwrap(), None);

        repo.set_preference("language", "en").await.unwrap();
        repo.set_preference("language", "hi").await.unwrap();

        assert_eq!(
            repo.get_preference("language").await.unwrap(),
            Some("hi".to_string())
        );
    }
}
