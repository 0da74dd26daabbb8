//! Application configuration: `~/.fuelswitch/config.toml`.
//!
//! ```toml
//! [catalog]
//! path = "~/tanks.toml"
//!
//! [engine]
//! on_load = "sanitize_only"
//! ```

use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use fuelswitch_types::{EngineSettings, LoadPolicy};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "FUELSWITCH_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FuelSwitchConfig {
    pub catalog: Option<CatalogConfig>,
    pub engine: Option<EngineConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file used when none is given on the command line.
    /// A leading `~/` is expanded to the home directory.
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EngineConfig {
    /// Load policy for saved assemblies. Default: reapply.
    pub on_load: Option<LoadPolicy>,
}

impl FuelSwitchConfig {
    /// Load the config file. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: PathBuf) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        let raw = self.catalog.as_ref()?.path.as_deref()?;
        if raw.trim().is_empty() {
            return None;
        }
        Some(expand_home(raw))
    }

    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        let policy = self
            .engine
            .as_ref()
            .and_then(|engine| engine.on_load)
            .unwrap_or_default();
        EngineSettings::new(policy)
    }
}

fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(raw), |home| home.join(rest)),
        None => PathBuf::from(raw),
    }
}

/// `$FUELSWITCH_CONFIG`, else `~/.fuelswitch/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".fuelswitch").join("config.toml"))
}
