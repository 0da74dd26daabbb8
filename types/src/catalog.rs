//! The per-container-type set of switchable selections.
//!
//! A `Catalog` is validated once at construction and never mutated. Order of
//! the selection list is significant: it is the cycle order and its first
//! entry is the default.

use std::collections::HashSet;
use std::fmt::Write;

use thiserror::Error;

use crate::{ContainerTypeName, Selection, SelectionId};

/// Prefix shown in front of the active display name when none is configured.
pub const DEFAULT_SELECTOR_LABEL: &str = "Resources";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogValidationError {
    #[error("catalog for '{container_type}' declares no selections")]
    Empty { container_type: String },
    #[error("catalog for '{container_type}' declares selection '{selection}' more than once")]
    DuplicateSelection {
        container_type: String,
        selection: String,
    },
    #[error(
        "catalog for '{container_type}' links variant '{variant}' to both '{first}' and '{second}'"
    )]
    DuplicateLinkedVariant {
        container_type: String,
        variant: String,
        first: String,
        second: String,
    },
}

/// All selections available for one container type.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    container_type: ContainerTypeName,
    selector_label: String,
    selections: Vec<Selection>,
    default_id: SelectionId,
}

impl Catalog {
    pub fn new(
        container_type: ContainerTypeName,
        selector_label: impl Into<String>,
        selections: Vec<Selection>,
    ) -> Result<Self, CatalogValidationError> {
        let Some(first) = selections.first() else {
            return Err(CatalogValidationError::Empty {
                container_type: container_type.into_inner(),
            });
        };
        let default_id = first.id().clone();

        let mut ids = HashSet::with_capacity(selections.len());
        let mut variants: Vec<(&str, &str)> = Vec::new();
        for selection in &selections {
            if !ids.insert(selection.id().as_str()) {
                return Err(CatalogValidationError::DuplicateSelection {
                    container_type: container_type.into_inner(),
                    selection: selection.id().to_string(),
                });
            }
            if let Some(variant) = selection.linked_variant() {
                if let Some((_, owner)) = variants.iter().find(|(v, _)| *v == variant.as_str()) {
                    return Err(CatalogValidationError::DuplicateLinkedVariant {
                        container_type: container_type.into_inner(),
                        variant: variant.to_string(),
                        first: (*owner).to_string(),
                        second: selection.id().to_string(),
                    });
                }
                variants.push((variant.as_str(), selection.id().as_str()));
            }
        }

        let selector_label = selector_label.into();
        let selector_label = if selector_label.trim().is_empty() {
            DEFAULT_SELECTOR_LABEL.to_string()
        } else {
            selector_label
        };

        Ok(Self {
            container_type,
            selector_label,
            selections,
            default_id,
        })
    }

    #[must_use]
    pub fn container_type(&self) -> &ContainerTypeName {
        &self.container_type
    }

    #[must_use]
    pub fn selector_label(&self) -> &str {
        &self.selector_label
    }

    #[must_use]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Identifier of the first declared selection.
    #[must_use]
    pub fn default_id(&self) -> &SelectionId {
        &self.default_id
    }

    #[must_use]
    pub fn default_selection(&self) -> &Selection {
        // Construction guarantees at least one selection.
        &self.selections[0]
    }

    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&Selection> {
        self.selections.iter().find(|s| s.id() == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.selections.iter().position(|s| s.id() == id)
    }

    /// The identifier following `id` in declaration order, wrapping after the
    /// last. Unknown ids map to the default.
    #[must_use]
    pub fn next(&self, id: &str) -> &SelectionId {
        match self.position(id) {
            Some(index) => self.selections[(index + 1) % self.selections.len()].id(),
            None => &self.default_id,
        }
    }

    #[must_use]
    pub fn has_any_linked_variant(&self) -> bool {
        self.selections.iter().any(|s| s.linked_variant().is_some())
    }

    /// Whether the operator-facing switch action should be offered. Catalogs
    /// driven by variants are switched by picking a variant instead.
    #[must_use]
    pub fn manual_switch_enabled(&self) -> bool {
        !self.has_any_linked_variant()
    }

    #[must_use]
    pub fn find_by_linked_variant(&self, variant: &str) -> Option<&Selection> {
        self.selections
            .iter()
            .find(|s| s.linked_variant().is_some_and(|v| v == variant))
    }

    /// `"<selector label>: <display name>"`.
    #[must_use]
    pub fn label_for(&self, selection: &Selection) -> String {
        format!("{}: {}", self.selector_label, selection.display_name())
    }

    /// Human-readable summary of every selection, one block per selection.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} options:", self.selector_label);
        for selection in &self.selections {
            let _ = write!(out, "- {}", selection.display_name());
            if let Some(variant) = selection.linked_variant() {
                let _ = write!(out, " (variant: {variant})");
            }
            out.push('\n');
            if selection.is_empty() {
                out.push_str("    (empty)\n");
            }
            for item in selection.items() {
                let _ = writeln!(
                    out,
                    "    {}: {}/{}",
                    item.name(),
                    format_amount(item.initial_amount()),
                    format_amount(item.capacity())
                );
            }
        }
        out
    }
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
