//! Resolved-catalog cache.
//!
//! One registry is shared by every engine in the process. Each container type
//! is loaded from the source at most once; the resulting `Arc<Catalog>` is
//! handed to every engine of that type, so two engines of the same type always
//! hold the very same catalog. Failed loads are not cached.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use fuelswitch_types::{Catalog, CatalogSource};

use crate::errors::SwitchError;

pub struct CatalogRegistry {
    source: Box<dyn CatalogSource + Send + Sync>,
    cache: Mutex<HashMap<String, Arc<Catalog>>>,
}

impl CatalogRegistry {
    pub fn new(source: impl CatalogSource + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the catalog for `container_type`, loading it on first use.
    pub fn resolve(&self, container_type: &str) -> Result<Arc<Catalog>, SwitchError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = cache.get(container_type) {
            return Ok(Arc::clone(catalog));
        }

        let catalog = self
            .source
            .load(container_type)
            .map_err(|source| SwitchError::CatalogNotFound {
                container_type: container_type.to_string(),
                source,
            })?;
        tracing::debug!(
            container_type,
            selections = catalog.selections().len(),
            "Resolved catalog"
        );
        let catalog = Arc::new(catalog);
        cache.insert(container_type.to_string(), Arc::clone(&catalog));
        Ok(catalog)
    }

    /// The cached catalog, without touching the source.
    #[must_use]
    pub fn cached(&self, container_type: &str) -> Option<Arc<Catalog>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(container_type)
            .cloned()
    }

    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl fmt::Debug for CatalogRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogRegistry")
            .field("cached", &self.cached_count())
            .finish_non_exhaustive()
    }
}
