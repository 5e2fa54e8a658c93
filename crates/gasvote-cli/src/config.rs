//! CLI configuration management

use crate::CliError;
use gasvote_evm::ProtocolConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Protocol parameters
    #[serde(default)]
    pub protocol: ProtocolConfig,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".gasvote"))
    }

    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from `path`, or from the default location, or defaults.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.protocol.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }
}
