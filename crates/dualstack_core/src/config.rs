use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use dualstack_mapping::network::Network;
use dualstack_mapping::precompile::DEFAULT_ASSET_PREFIX;
use dualstack_mapping::rpc_config::RpcConfigStore;
use dualstack_mapping::ss58::{GENERIC_PREFIX, MAX_PREFIX};

use crate::error_handler::DualstackError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration stored at `~/.dualstack/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DualstackConfig {
    /// Network used when a command does not name one.
    pub network: Network,
    /// SS58 prefix for rendering native identifiers.
    pub ss58_prefix: u16,
    /// Address prefix of the assets ERC-20 precompile.
    pub asset_precompile_prefix: u16,
    pub log_level: String,
    /// Overrides `~/.dualstack/address_book.json`.
    pub address_book_path: Option<PathBuf>,
    pub endpoints: RpcConfigStore,
}

impl Default for DualstackConfig {
    fn default() -> Self {
        Self {
            network: Network::Local,
            ss58_prefix: GENERIC_PREFIX,
            asset_precompile_prefix: DEFAULT_ASSET_PREFIX,
            log_level: "warn".into(),
            address_book_path: None,
            endpoints: RpcConfigStore::with_defaults(),
        }
    }
}

impl DualstackConfig {
    /// Returns the base config directory: `~/.dualstack/`
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".dualstack"))
    }

    /// Returns the config file path: `~/.dualstack/config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.json"))
    }

    /// Returns the logs directory: `~/.dualstack/logs/`
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Address book location, honouring `address_book_path`.
    pub fn address_book_path(&self) -> Result<PathBuf> {
        match &self.address_book_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::base_dir()?.join("address_book.json")),
        }
    }

    /// Ensures all required directories exist.
    pub fn ensure_dirs() -> Result<()> {
        for dir in [Self::base_dir()?, Self::logs_dir()?] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
        }
        Ok(())
    }

    /// Loads config from disk, or creates default if missing.
    pub fn load() -> Result<Self> {
        Self::ensure_dirs()?;
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Load config from a specific file path.
    ///
    /// Unreadable, malformed or invalid files fail with
    /// [`DualstackError::Config`].
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                DualstackError::Config(format!("failed to read {}: {e}", path.display()))
            })?;
            let config: Self = serde_json::from_str(&content).map_err(|e| {
                DualstackError::Config(format!("failed to parse {}: {e}", path.display()))
            })?;
            config.validate()?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Saves config to `~/.dualstack/config.json`.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to_path(&path)
    }

    /// Save config to a specific file path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Reject values that would make later conversions fail.
    pub fn validate(&self) -> Result<(), DualstackError> {
        if self.ss58_prefix >= MAX_PREFIX {
            return Err(DualstackError::Config(format!(
                "ss58_prefix {} must be below {MAX_PREFIX}",
                self.ss58_prefix
            )));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(DualstackError::Config(format!(
                "unknown log_level `{}` (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DualstackConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ss58_prefix, 42);
        assert_eq!(config.network, Network::Local);
    }

    #[test]
    fn missing_file_creates_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");

        let config = DualstackConfig::load_from_path(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn save_and_reload_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");

        let mut config = DualstackConfig::default();
        config.network = Network::Hub;
        config.ss58_prefix = 0;
        config.address_book_path = Some(tmp.path().join("book.json"));
        config.save_to_path(&path).unwrap();

        let loaded = DualstackConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.network, Network::Hub);
        assert_eq!(loaded.ss58_prefix, 0);
        assert_eq!(loaded.address_book_path().unwrap(), tmp.path().join("book.json"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{ "network": "hub" }"#).unwrap();

        let loaded = DualstackConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.network, Network::Hub);
        assert_eq!(loaded.asset_precompile_prefix, DEFAULT_ASSET_PREFIX);
        assert!(loaded.endpoints.get(Network::Local).is_some());
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{ "ss58_prefix": 20000 }"#).unwrap();

        let err = DualstackConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("ss58_prefix"));
        assert!(matches!(
            err.downcast_ref::<DualstackError>(),
            Some(DualstackError::Config(_))
        ));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{ "network": "#).unwrap();

        let err = DualstackConfig::load_from_path(&path).unwrap_err();
        let typed = err.downcast_ref::<DualstackError>().unwrap();
        assert!(matches!(typed, DualstackError::Config(msg) if msg.contains("failed to parse")));
        assert_eq!(typed.exit_code(), 3);
    }

    #[test]
    fn unreadable_path_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::create_dir(&path).unwrap();

        let err = DualstackConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DualstackError>(),
            Some(DualstackError::Config(msg)) if msg.contains("failed to read")
        ));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a").join("b").join("config.json");

        DualstackConfig::default().save_to_path(&path).unwrap();
        let loaded = DualstackConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.ss58_prefix, GENERIC_PREFIX);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = DualstackConfig {
            log_level: "loud".into(),
            ..DualstackConfig::default()
        };
        assert!(matches!(config.validate(), Err(DualstackError::Config(_))));
    }
}
