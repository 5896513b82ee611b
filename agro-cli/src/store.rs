use agro_core::db::{DbConfig, RepositoryRegistry};
use agro_core::{BaselineTables, FarmRepository};
use agro_data::BaselineLoader;
use agro_db_sqlite::SqliteRepositoryFactory;
use anyhow::{Context, Result};
use tracing::info;

/// Opens the repository through the backend registry.
pub async fn open_repository(database_url: &str) -> Result<Box<dyn FarmRepository>> {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));

    let config = DbConfig {
        backend: "sqlite".to_string(),
        connection_string: database_url.to_string(),
    };

    registry
        .create(&config)
        .await
        .with_context(|| format!("cannot open database '{database_url}'"))
}

/// Loads the baseline tables, seeding the built-in datasets on first run.
pub async fn load_tables(repo: &dyn FarmRepository) -> Result<BaselineTables> {
    let mut crops = repo.list_crop_baselines().await?;

    if crops.is_empty() {
        info!("baseline tables are empty; seeding built-in datasets");
        let summary = BaselineLoader::load_builtin(repo)
            .await
            .context("cannot seed built-in baseline datasets")?;
        info!(rows = summary.total(), "seeded built-in datasets");
        crops = repo.list_crop_baselines().await?;
    }

    Ok(BaselineTables::new(
        crops,
        repo.list_crop_costs().await?,
        repo.list_soil_factors().await?,
        repo.list_soil_profiles().await?,
    ))
}
