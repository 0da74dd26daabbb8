//! Catalog file loading and application configuration for fuelswitch.
//!
//! Raw TOML structs stay private here; callers receive validated
//! `fuelswitch-types` values.

mod app;
mod catalog_file;

pub use app::{CONFIG_ENV_VAR, CatalogConfig, ConfigError, EngineConfig, FuelSwitchConfig, config_path};
pub use catalog_file::{CatalogBuildError, CatalogFileError, TomlCatalogSource};
