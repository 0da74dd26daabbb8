//! TOML catalog files.
//!
//! ```toml
//! [containers.fuelTank]
//! selector_label = "Fuel"
//!
//! [[containers.fuelTank.selections]]
//! id = "LF"
//! display_name = "Liquid Fuel"
//!
//! [[containers.fuelTank.selections.items]]
//! name = "LiquidFuel"
//! amount = 100.0
//! ```
//!
//! Syntax errors fail the whole file. Semantic validation happens per
//! container type when that type's catalog is built, so one bad entry does
//! not take down every other container type.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use fuelswitch_types::{
    Catalog, CatalogLoadError, CatalogSource, CatalogValidationError, ContainerTypeName,
    ContentItem, ContentItemError, EmptyIdError, ItemName, Selection, SelectionError, SelectionId,
    VariantId,
};

#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("failed to read catalog file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl CatalogFileError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Why a single container type's entry could not become a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogBuildError {
    #[error(transparent)]
    EmptyId(#[from] EmptyIdError),
    #[error(transparent)]
    Item(#[from] ContentItemError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Catalog(#[from] CatalogValidationError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalogFile {
    #[serde(default)]
    containers: BTreeMap<String, RawCatalog>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    selector_label: Option<String>,
    #[serde(default)]
    selections: Vec<RawSelection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSelection {
    id: String,
    display_name: Option<String>,
    linked_variant: Option<String>,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawItem {
    name: String,
    amount: f64,
    /// Defaults to `amount` (a full item).
    max_amount: Option<f64>,
    #[serde(default)]
    flags: BTreeMap<String, String>,
}

impl RawItem {
    fn build(&self) -> Result<ContentItem, CatalogBuildError> {
        let name = ItemName::new(self.name.as_str())?;
        let capacity = self.max_amount.unwrap_or(self.amount);
        Ok(ContentItem::new(name, self.amount, capacity)?.with_flags(self.flags.clone()))
    }
}

impl RawSelection {
    fn build(&self) -> Result<Selection, CatalogBuildError> {
        let id = SelectionId::new(self.id.as_str())?;
        let items = self
            .items
            .iter()
            .map(RawItem::build)
            .collect::<Result<Vec<_>, _>>()?;
        let linked_variant = match self.linked_variant.as_deref() {
            Some(v) if !v.trim().is_empty() => Some(VariantId::new(v)?),
            _ => None,
        };
        Ok(Selection::new(
            id,
            self.display_name.clone().unwrap_or_default(),
            items,
            linked_variant,
        )?)
    }
}

impl RawCatalog {
    fn build(&self, container_type: &str) -> Result<Catalog, CatalogBuildError> {
        let container_type = ContainerTypeName::new(container_type)?;
        let selections = self
            .selections
            .iter()
            .map(RawSelection::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Catalog::new(
            container_type,
            self.selector_label.clone().unwrap_or_default(),
            selections,
        )?)
    }
}

/// A parsed catalog file, serving catalogs by container type name.
#[derive(Debug, Default)]
pub struct TomlCatalogSource {
    path: Option<PathBuf>,
    containers: BTreeMap<String, RawCatalog>,
}

impl TomlCatalogSource {
    /// Read and parse a catalog file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogFileError> {
        let path = path.as_ref().to_path_buf();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read catalog at {:?}: {}", path, err);
                return Err(CatalogFileError::Read { path, source: err });
            }
        };
        let raw: RawCatalogFile = match toml::from_str(&content) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("Failed to parse catalog at {:?}: {}", path, err);
                return Err(CatalogFileError::Parse { path, source: err });
            }
        };
        tracing::debug!(
            path = %path.display(),
            containers = raw.containers.len(),
            "Catalog file loaded"
        );
        Ok(Self {
            path: Some(path),
            containers: raw.containers,
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Container type names declared by the file, sorted.
    pub fn container_types(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Build one container type's catalog.
    pub fn build(&self, container_type: &str) -> Option<Result<Catalog, CatalogBuildError>> {
        self.containers
            .get(container_type)
            .map(|raw| raw.build(container_type))
    }

    /// Build every declared catalog, collecting the ones that fail.
    #[must_use]
    pub fn check(&self) -> Vec<(String, CatalogBuildError)> {
        self.containers
            .iter()
            .filter_map(|(name, raw)| raw.build(name).err().map(|err| (name.clone(), err)))
            .collect()
    }
}

impl FromStr for TomlCatalogSource {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: RawCatalogFile = toml::from_str(s)?;
        Ok(Self {
            path: None,
            containers: raw.containers,
        })
    }
}

impl CatalogSource for TomlCatalogSource {
    fn load(&self, container_type: &str) -> Result<Catalog, CatalogLoadError> {
        match self.build(container_type) {
            Some(Ok(catalog)) => Ok(catalog),
            Some(Err(err)) => Err(CatalogLoadError::invalid(container_type, err)),
            None => Err(CatalogLoadError::NotFound(container_type.to_string())),
        }
    }
}
