use async_trait::async_trait;

use agro_core::db::factory::{DbConfig, RepositoryFactory};
use agro_core::db::repository::{FarmRepository, RepositoryError};

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`agro_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use agro_core::db::RepositoryRegistry;
/// use agro_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// the schema up to date.
    ///
    /// Accepted connection-string values:
    /// * A bare file path — e.g. `"farm.db"`.  Use a sqlx-style URL
    ///   (`sqlite:farm.db?mode=rwc`) to create the file if it is missing.
    /// * `":memory:"` — an ephemeral in-memory database (useful for tests).
    ///
    /// Baseline data is NOT seeded here; run the agro-data loader (or
    /// `BaselineLoader::load_builtin`) against the returned repository when
    /// the tables are empty.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn FarmRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string).await?;
        repo.run_migrations().await?;
        Ok(Box::new(repo))
    }
}

#[cfg(test)]
mod tests {
    use agro_core::FarmRepository;
    use agro_core::db::{DbConfig, RepositoryFactory, RepositoryRegistry};

    use super::SqliteRepositoryFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteRepositoryFactory.backend_name(), "sqlite");
    }

    /// Full round-trip: factory → SqliteRepository with an in-memory DB,
    /// migrations included.
    #[tokio::test]
    async fn creates_in_memory_repository() {
        let config = DbConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        };

        let result = SqliteRepositoryFactory.create(&config).await;
        assert!(
            result.is_ok(),
            "failed to create in-memory repository: {:?}",
            result.err()
        );

        let repo = result.unwrap();
        let baselines = repo
            .list_crop_baselines()
            .await
            .expect("schema should exist after create");
        assert!(baselines.is_empty());
    }

    #[tokio::test]
    async fn registry_dispatches_to_sqlite() {
        let mut registry = RepositoryRegistry::new();
        registry.register(Box::new(SqliteRepositoryFactory));

        let result = registry.create(&DbConfig::default()).await;

        assert!(result.is_ok(), "registry create failed: {:?}", result.err());
    }
}
