//! Per-container switch state.
//!
//! ```text
//! Uninitialized --resolve--> Resolved --apply/sanitize--> Selected
//!                                                          ^    |
//!                                                          +----+ every later switch
//! ```
//!
//! The engine owns only the persisted [`CurrentSelection`] and, once
//! resolved, a shared handle to its type's catalog. It never owns the
//! container; every operation borrows it.

use std::sync::Arc;

use fuelswitch_types::{Catalog, ContainerTypeName, CurrentSelection, Selection, SelectionId};

use crate::apply::{SanitizeReport, apply, sanitize};
use crate::errors::SwitchError;
use crate::host::Container;
use crate::registry::CatalogRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Uninitialized,
    Resolved,
    Selected,
}

#[derive(Debug, Clone)]
enum Phase {
    Uninitialized,
    Resolved(Arc<Catalog>),
    Selected(Arc<Catalog>),
}

/// Result of bringing an engine to a usable state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Prepared {
    /// The current id was unresolved or invalid and has been replaced by the
    /// catalog default; the container must be fully re-applied.
    pub(crate) needs_apply: bool,
}

#[derive(Debug, Clone)]
pub struct SwitchEngine {
    container_type: ContainerTypeName,
    current: CurrentSelection,
    phase: Phase,
}

impl SwitchEngine {
    /// A fresh engine that will pick the catalog default.
    #[must_use]
    pub fn new(container_type: ContainerTypeName) -> Self {
        Self::with_persisted(container_type, CurrentSelection::Unresolved)
    }

    /// An engine restored from the host's persisted identifier.
    #[must_use]
    pub fn with_persisted(container_type: ContainerTypeName, current: CurrentSelection) -> Self {
        Self {
            container_type,
            current,
            phase: Phase::Uninitialized,
        }
    }

    #[must_use]
    pub fn container_type(&self) -> &ContainerTypeName {
        &self.container_type
    }

    /// The value the host persists.
    #[must_use]
    pub fn current(&self) -> &CurrentSelection {
        &self.current
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        match self.phase {
            Phase::Uninitialized => EnginePhase::Uninitialized,
            Phase::Resolved(_) => EnginePhase::Resolved,
            Phase::Selected(_) => EnginePhase::Selected,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        match &self.phase {
            Phase::Uninitialized => None,
            Phase::Resolved(catalog) | Phase::Selected(catalog) => Some(catalog),
        }
    }

    /// The selection named by the current id, once the catalog is resolved.
    #[must_use]
    pub fn active_selection(&self) -> Option<&Selection> {
        let id = self.current.id()?;
        self.catalog()?.lookup(id.as_str())
    }

    /// `"<selector label>: <display name>"` of the active selection.
    #[must_use]
    pub fn current_label(&self) -> Option<String> {
        let catalog = self.catalog()?;
        let selection = self.active_selection()?;
        Some(catalog.label_for(selection))
    }

    /// Resolve this engine's catalog. Idempotent.
    pub fn resolve(&mut self, registry: &CatalogRegistry) -> Result<Arc<Catalog>, SwitchError> {
        if let Some(catalog) = self.catalog() {
            return Ok(Arc::clone(catalog));
        }
        let catalog = registry.resolve(self.container_type.as_str())?;
        self.phase = Phase::Resolved(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Resolve, then make sure the current id names a real selection.
    ///
    /// An unresolved id becomes the catalog default. An id the catalog does
    /// not declare (stale or corrupted persisted state) is logged and also
    /// replaced by the default.
    pub(crate) fn prepare(&mut self, registry: &CatalogRegistry) -> Result<Prepared, SwitchError> {
        let catalog = self.resolve(registry)?;
        let needs_apply = match &self.current {
            CurrentSelection::Unresolved => true,
            CurrentSelection::Id(id) if catalog.lookup(id.as_str()).is_none() => {
                tracing::warn!(
                    container_type = %self.container_type,
                    selection = %id,
                    fallback = %catalog.default_id(),
                    "Persisted selection is not in the catalog, falling back to default"
                );
                true
            }
            CurrentSelection::Id(_) => false,
        };
        if needs_apply {
            self.current = CurrentSelection::Id(catalog.default_id().clone());
        }
        Ok(Prepared { needs_apply })
    }

    /// Make `id` current and apply it to `container`.
    ///
    /// The catalog must already be resolved.
    pub fn select<C: Container + ?Sized>(
        &mut self,
        id: &SelectionId,
        container: &mut C,
    ) -> Result<(), SwitchError> {
        let catalog = self.resolved_catalog()?;
        let selection = catalog
            .lookup(id.as_str())
            .ok_or_else(|| SwitchError::InvalidSelection {
                container_type: self.container_type.to_string(),
                id: id.to_string(),
            })?;
        self.current = CurrentSelection::Id(id.clone());
        apply(selection, container);
        self.phase = Phase::Selected(catalog);
        Ok(())
    }

    /// Re-apply the current selection to `container`.
    pub fn apply_current<C: Container + ?Sized>(
        &mut self,
        container: &mut C,
    ) -> Result<(), SwitchError> {
        let id = self.current_id()?;
        self.select(&id, container)
    }

    /// Strip contents that do not belong to the current selection.
    pub fn sanitize_current<C: Container + ?Sized>(
        &mut self,
        container: &mut C,
    ) -> Result<SanitizeReport, SwitchError> {
        let catalog = self.resolved_catalog()?;
        let id = self.current_id()?;
        let selection = catalog
            .lookup(id.as_str())
            .ok_or_else(|| SwitchError::InvalidSelection {
                container_type: self.container_type.to_string(),
                id: id.to_string(),
            })?;
        let report = sanitize(container, selection);
        self.phase = Phase::Selected(catalog);
        Ok(report)
    }

    fn resolved_catalog(&self) -> Result<Arc<Catalog>, SwitchError> {
        self.catalog()
            .cloned()
            .ok_or_else(|| SwitchError::InvalidSelection {
                container_type: self.container_type.to_string(),
                id: self.current.to_string(),
            })
    }

    fn current_id(&self) -> Result<SelectionId, SwitchError> {
        self.current
            .id()
            .cloned()
            .ok_or_else(|| SwitchError::InvalidSelection {
                container_type: self.container_type.to_string(),
                id: self.current.to_string(),
            })
    }
}
