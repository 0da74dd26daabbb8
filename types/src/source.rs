//! The loader seam: where catalogs come from.

use std::collections::HashMap;
use std::error::Error as StdError;

use thiserror::Error;

use crate::Catalog;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("no catalog is declared for container type '{0}'")]
    NotFound(String),
    #[error("catalog for '{container_type}' is invalid: {source}")]
    Invalid {
        container_type: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl CatalogLoadError {
    pub fn invalid(
        container_type: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Invalid {
            container_type: container_type.into(),
            source: Box::new(source),
        }
    }
}

/// Produces the catalog for a container type.
///
/// Implementations are read at most once per type name by the registry, so
/// they may do IO or parsing on every call.
pub trait CatalogSource {
    fn load(&self, container_type: &str) -> Result<Catalog, CatalogLoadError>;
}

/// A fixed, in-memory set of catalogs.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    catalogs: HashMap<String, Catalog>,
}

impl StaticCatalogSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, catalog: Catalog) -> Self {
        self.insert(catalog);
        self
    }

    pub fn insert(&mut self, catalog: Catalog) {
        self.catalogs
            .insert(catalog.container_type().to_string(), catalog);
    }

    pub fn container_types(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }
}

impl FromIterator<Catalog> for StaticCatalogSource {
    fn from_iter<I: IntoIterator<Item = Catalog>>(iter: I) -> Self {
        let mut source = Self::new();
        for catalog in iter {
            source.insert(catalog);
        }
        source
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load(&self, container_type: &str) -> Result<Catalog, CatalogLoadError> {
        self.catalogs
            .get(container_type)
            .cloned()
            .ok_or_else(|| CatalogLoadError::NotFound(container_type.to_string()))
    }
}
