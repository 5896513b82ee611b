use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "agro-advisor.toml";

/// Application configuration, loaded from a TOML file with CLI overrides
/// applied on top.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Database URL passed to the sqlite backend.
    pub database: String,

    /// Default language preference written on first run.
    pub language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: "sqlite:farm.db?mode=rwc".to_string(),
            language: "en".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// An explicitly given path must exist and parse. Without one, the
    /// default file is used when present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_point_at_local_sqlite() {
        let config = AppConfig::default();

        assert_eq!(config.database, "sqlite:farm.db?mode=rwc");
        assert_eq!(config.language, "en");
    }

    #[test]
    fn partial_files_keep_defaults_for_missing_keys() {
        let config: AppConfig = toml::from_str("language = \"hi\"").unwrap();

        assert_eq!(config.language, "hi");
        assert_eq!(config.database, "sqlite:farm.db?mode=rwc");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("databse = \"typo\"");

        assert!(result.is_err());
    }
}
