//! Integration tests for baseline loading using the actual SQLite backend.

use agro_core::FarmRepository;
use agro_data::{BaselineLoader, BaselineLoaderError};
use agro_db_sqlite::SqliteRepository;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;

async fn setup_test_db() -> SqliteRepository {
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

#[tokio::test]
async fn load_builtin_seeds_every_dataset() {
    let repo = setup_test_db().await;

    let summary = BaselineLoader::load_builtin(&repo)
        .await
        .expect("Failed to load built-in datasets");

    assert_eq!(summary.crop_baselines, 20);
    assert_eq!(summary.crop_costs, 5);
    assert_eq!(summary.soil_factors, 6);
    assert_eq!(summary.soil_profiles, 5);
    assert_eq!(summary.total(), 36);
}

#[tokio::test]
async fn loaded_rice_baseline_matches_the_dataset() {
    let repo = setup_test_db().await;
    BaselineLoader::load_builtin(&repo)
        .await
        .expect("Failed to load built-in datasets");

    let baselines = repo
        .list_crop_baselines()
        .await
        .expect("Failed to list baselines");
    let rice = baselines
        .iter()
        .find(|b| b.crop == "rice")
        .expect("rice baseline missing");

    assert_eq!(rice.base_yield_t_ha, dec!(4.5));
    assert_eq!(rice.water_need_mm_day, dec!(8.5));
    assert_eq!(rice.season_days, 120);
}

#[tokio::test]
async fn loaded_cost_records_keep_exact_component_values() {
    let repo = setup_test_db().await;
    BaselineLoader::load_builtin(&repo)
        .await
        .expect("Failed to load built-in datasets");

    let costs = repo.list_crop_costs().await.expect("Failed to list costs");
    let sugarcane = costs
        .iter()
        .find(|c| c.crop == "sugarcane")
        .expect("sugarcane cost record missing");

    assert_eq!(sugarcane.seeds, dec!(6000));
    assert_eq!(sugarcane.labor, dec!(10000));
    assert_eq!(sugarcane.market_price, dec!(3000));
}

#[tokio::test]
async fn load_is_idempotent() {
    let repo = setup_test_db().await;

    BaselineLoader::load_builtin(&repo)
        .await
        .expect("First load failed");
    BaselineLoader::load_builtin(&repo)
        .await
        .expect("Second load failed");

    let baselines = repo.list_crop_baselines().await.unwrap();
    let factors = repo.list_soil_factors().await.unwrap();

    assert_eq!(baselines.len(), 20);
    assert_eq!(factors.len(), 6);
}

#[tokio::test]
async fn load_replaces_existing_rows() {
    let repo = setup_test_db().await;

    // Pre-seed a stale rice baseline.
    sqlx::query(
        "INSERT INTO crop_baseline (crop, base_yield_t_ha, water_need_mm_day, season_days)
         VALUES ('rice', 1.0, 1.0, 30)",
    )
    .execute(repo.pool())
    .await
    .expect("Failed to insert stale baseline");

    BaselineLoader::load_builtin(&repo)
        .await
        .expect("Failed to load built-in datasets");

    let baselines = repo.list_crop_baselines().await.unwrap();
    let rice = baselines.iter().find(|b| b.crop == "rice").unwrap();
    assert_eq!(rice.base_yield_t_ha, dec!(4.5));
    assert_eq!(rice.season_days, 120);
}

#[tokio::test]
async fn loaded_tables_drive_the_worksheets() {
    let repo = setup_test_db().await;
    BaselineLoader::load_builtin(&repo)
        .await
        .expect("Failed to load built-in datasets");

    let tables = agro_core::BaselineTables::new(
        repo.list_crop_baselines().await.unwrap(),
        repo.list_crop_costs().await.unwrap(),
        repo.list_soil_factors().await.unwrap(),
        repo.list_soil_profiles().await.unwrap(),
    );

    let breakdown = agro_core::calculations::CostWorksheet::new(&tables)
        .calculate("rice", agro_core::Area::hectares(dec!(2)))
        .expect("cost worksheet failed");

    assert_eq!(breakdown.components.seeds, dec!(5000));
    assert_eq!(breakdown.total_cost, dec!(52000));
    assert_eq!(breakdown.profitability.break_even_yield_t, dec!(2.60));
}

#[tokio::test]
async fn parse_failure_surfaces_as_csv_error() {
    let csv = "crop,base_yield_t_ha,water_need_mm_day,season_days\nrice,abc,8.5,120";

    let result = BaselineLoader::parse_crop_baselines(csv.as_bytes());

    let err = result.expect_err("Should fail for invalid decimal");
    assert!(matches!(err, BaselineLoaderError::CsvParse(_)));
}
