//! # Configuration State
//!
//! Stores counter configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--db`, `--seed-dir`)
//! 2. Environment variables (`MADANG_*`)
//! 3. Config file (`--config FILE`, else `<config dir>/madang/counter.toml`)
//! 4. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock needed.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use madang_core::Price;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "counter.toml";

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Counter configuration.
///
/// ## Example `counter.toml`
/// ```toml
/// database_path = "/var/lib/madang/madang.db"
/// seed_dir = "/usr/share/madang/data"
/// store_name = "마당서점 본점"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// SQLite database file. Created and seeded when missing.
    pub database_path: PathBuf,

    /// Directory with `Customer_madang.csv`, `Book_madang.csv`,
    /// `Orders_madang.csv`.
    pub seed_dir: PathBuf,

    /// Store name (shown in the shell banner)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Pool size
    pub max_connections: u32,
}

impl Default for CounterConfig {
    /// ## Default Values
    /// - Database: `madang.db` in the working directory
    /// - Seed files: `data/`
    /// - Store: "마당서점"
    /// - Currency: ₩
    fn default() -> Self {
        CounterConfig {
            database_path: PathBuf::from("madang.db"),
            seed_dir: PathBuf::from("data"),
            store_name: "마당서점".to_string(),
            currency_symbol: "₩".to_string(),
            max_connections: 4,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub seed_dir: Option<PathBuf>,
}

impl CounterConfig {
    /// Builds the configuration from every source, highest priority last.
    ///
    /// ## Errors
    /// An explicit `--config` file that is missing is an error; the default
    /// location is only read when it exists.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match &overrides.config_file {
            Some(path) => CounterConfig::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => CounterConfig::from_file(&path)?,
                None => CounterConfig::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        config.validate()?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Reads a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects values the pool cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections < 1 {
            return Err(ConfigError::Invalid {
                field: "max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Applies `MADANG_*` environment variables.
    ///
    /// ## Environment Variables
    /// - `MADANG_DB_PATH`: database file
    /// - `MADANG_SEED_DIR`: seed CSV directory
    /// - `MADANG_STORE_NAME`: store name
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("MADANG_DB_PATH") {
            self.database_path = PathBuf::from(path);
        }

        if let Some(dir) = var("MADANG_SEED_DIR") {
            self.seed_dir = PathBuf::from(dir);
        }

        if let Some(store_name) = var("MADANG_STORE_NAME") {
            self.store_name = store_name;
        }
    }

    /// Applies command line flags.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.database_path {
            self.database_path = path.clone();
        }
        if let Some(dir) = &overrides.seed_dir {
            self.seed_dir = dir.clone();
        }
    }

    /// Formats a won amount with the currency symbol and thousands
    /// separators.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = CounterConfig::default();
    /// assert_eq!(config.format_price(13000), "₩13,000");
    /// ```
    pub fn format_price(&self, won: i64) -> String {
        match Price::from_won(won) {
            Some(price) => format!("{}{}", self.currency_symbol, price),
            None => format!(
                "-{}{}",
                self.currency_symbol,
                Price::from_won(won.saturating_neg()).unwrap_or_default()
            ),
        }
    }
}

/// `<platform config dir>/madang/counter.toml`, if a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "madang").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_format_price() {
        let config = CounterConfig::default();
        assert_eq!(config.format_price(13000), "₩13,000");
        assert_eq!(config.format_price(500), "₩500");
        assert_eq!(config.format_price(0), "₩0");
        assert_eq!(config.format_price(1234567), "₩1,234,567");
    }

    #[test]
    fn test_format_price_negative() {
        let config = CounterConfig::default();
        assert_eq!(config.format_price(-2500), "-₩2,500");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "store_name = \"마당서점 본점\"\nmax_connections = 2\n").unwrap();

        let config = CounterConfig::from_file(&path).unwrap();
        assert_eq!(config.store_name, "마당서점 본점");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.database_path, PathBuf::from("madang.db"));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "max_connections = \"many\"").unwrap();

        assert!(matches!(
            CounterConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_max_connections_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "max_connections = 0\n").unwrap();

        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        };
        let err = CounterConfig::load(&overrides).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "max_connections"));
        assert_eq!(
            err.to_string(),
            "Invalid config value for max_connections: must be at least 1"
        );
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let overrides = ConfigOverrides {
            config_file: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Default::default()
        };
        assert!(matches!(
            CounterConfig::load(&overrides),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_priority_flags_over_env_over_file() {
        let mut config = CounterConfig {
            database_path: PathBuf::from("from-file.db"),
            seed_dir: PathBuf::from("file-seed"),
            ..Default::default()
        };

        let env: HashMap<&str, &str> = [
            ("MADANG_DB_PATH", "from-env.db"),
            ("MADANG_SEED_DIR", "env-seed"),
            ("MADANG_STORE_NAME", "마당서점 2호점"),
        ]
        .into_iter()
        .collect();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database_path, PathBuf::from("from-env.db"));
        assert_eq!(config.store_name, "마당서점 2호점");

        config.apply_overrides(&ConfigOverrides {
            database_path: Some(PathBuf::from("from-flag.db")),
            ..Default::default()
        });
        assert_eq!(config.database_path, PathBuf::from("from-flag.db"));
        assert_eq!(config.seed_dir, PathBuf::from("env-seed"));
    }
}
