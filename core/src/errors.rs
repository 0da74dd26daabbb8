//! Engine error taxonomy.
//!
//! Only the conditions that cannot be fixed locally are errors. An unknown
//! persisted id is recovered by falling back to the catalog default, and stray
//! contents are recovered by sanitizing; both are logged, neither reaches the
//! operator.

use thiserror::Error;

use fuelswitch_types::CatalogLoadError;

#[derive(Debug, Error)]
pub enum SwitchError {
    /// The container type has no usable catalog. Fatal for that container:
    /// its contents are left untouched.
    #[error("no usable catalog for container type '{container_type}': {source}")]
    CatalogNotFound {
        container_type: String,
        source: CatalogLoadError,
    },
    /// An identifier that does not name any selection in the catalog.
    #[error("selection '{id}' is not declared for container type '{container_type}'")]
    InvalidSelection { container_type: String, id: String },
}

impl SwitchError {
    #[must_use]
    pub fn container_type(&self) -> &str {
        match self {
            Self::CatalogNotFound { container_type, .. }
            | Self::InvalidSelection { container_type, .. } => container_type,
        }
    }
}
