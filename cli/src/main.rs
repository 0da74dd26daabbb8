//! fuelswitch CLI - validate, describe and simulate switchable-container catalogs.
//!
//! ```text
//! main() -> init_tracing() -> Cli::parse() -> load config + catalog -> command
//! ```
//!
//! The simulator commands build an in-memory [`fuelswitch_core::Assembly`]
//! and drive it through the same event hooks a real host would call.

mod commands;

use std::io::stderr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use fuelswitch_config::{FuelSwitchConfig, TomlCatalogSource};

#[derive(Parser, Debug)]
#[command(name = "fuelswitch")]
#[command(about = "Validate, describe and simulate switchable-container catalogs")]
#[command(version)]
struct Cli {
    /// Catalog file. Defaults to `[catalog] path` from the config file.
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build every catalog in the file and report the invalid ones
    Check,
    /// Print the selections of one container type
    Describe {
        /// Container type name
        container_type: String,
    },
    /// Spawn a container and press its switch action repeatedly
    Cycle {
        /// Container type name
        container_type: String,
        /// Number of switch presses
        #[arg(long, short = 'n', default_value_t = 1)]
        steps: usize,
        /// Parts in the symmetry group (1 = no counterparts)
        #[arg(long, short = 's', default_value_t = 1)]
        symmetry: usize,
    },
    /// Spawn a container and apply a cosmetic variant to it
    Variant {
        /// Container type name
        container_type: String,
        /// Variant name
        variant: String,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match FuelSwitchConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            tracing::warn!("Ignoring config: {err}");
            FuelSwitchConfig::default()
        }
    };

    let Some(catalog_path) = cli.catalog.clone().or_else(|| config.catalog_path()) else {
        bail!("no catalog file given; pass --catalog or set [catalog] path in the config file");
    };
    let source = TomlCatalogSource::from_path(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    let settings = config.engine_settings();

    let output = match cli.command {
        Command::Check => commands::check(&source)?,
        Command::Describe { container_type } => commands::describe(source, &container_type)?,
        Command::Cycle {
            container_type,
            steps,
            symmetry,
        } => commands::cycle(source, settings, &container_type, steps, symmetry)?,
        Command::Variant {
            container_type,
            variant,
        } => commands::variant(source, settings, &container_type, &variant)?,
    };
    print!("{output}");
    Ok(())
}
