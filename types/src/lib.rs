//! Core domain types for fuelswitch.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies: the content items, selections and catalogs a switchable
//! container chooses between, and the persisted identifier of the active one.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod catalog;
mod content;
mod current;
mod ids;
mod selection;
mod settings;
mod source;

pub use catalog::{Catalog, CatalogValidationError, DEFAULT_SELECTOR_LABEL};
pub use content::{ContentItem, ContentItemError};
pub use current::CurrentSelection;
pub use ids::{ContainerTypeName, EmptyIdError, ItemName, SelectionId, VariantId};
pub use selection::{Selection, SelectionError};
pub use settings::{EngineSettings, LoadPolicy, LoadPolicyParseError};
pub use source::{CatalogLoadError, CatalogSource, StaticCatalogSource};
