//! The one value a host persists per switchable container.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SelectionId;

/// Which selection a container has active.
///
/// `Unresolved` means "use the catalog default once the catalog is known". It
/// is a distinct state rather than a magic string so it can never collide with
/// a real selection id.
///
/// Persisted as an optional string: `None` (or an empty string) round-trips to
/// `Unresolved`, anything else to `Id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum CurrentSelection {
    #[default]
    Unresolved,
    Id(SelectionId),
}

impl CurrentSelection {
    #[must_use]
    pub fn id(&self) -> Option<&SelectionId> {
        match self {
            Self::Unresolved => None,
            Self::Id(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// True when this names exactly `id`.
    #[must_use]
    pub fn is(&self, id: &str) -> bool {
        self.id().is_some_and(|current| current == id)
    }

    /// Parse a persisted value. Blank strings are treated as unresolved.
    #[must_use]
    pub fn from_persisted(value: Option<&str>) -> Self {
        value
            .and_then(|v| SelectionId::new(v).ok())
            .map_or(Self::Unresolved, Self::Id)
    }

    #[must_use]
    pub fn to_persisted(&self) -> Option<String> {
        self.id().map(ToString::to_string)
    }
}

impl From<SelectionId> for CurrentSelection {
    fn from(id: SelectionId) -> Self {
        Self::Id(id)
    }
}

impl From<Option<String>> for CurrentSelection {
    fn from(value: Option<String>) -> Self {
        Self::from_persisted(value.as_deref())
    }
}

impl From<CurrentSelection> for Option<String> {
    fn from(value: CurrentSelection) -> Self {
        match value {
            CurrentSelection::Unresolved => None,
            CurrentSelection::Id(id) => Some(id.into_inner()),
        }
    }
}

impl fmt::Display for CurrentSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => f.write_str("<unresolved>"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}
