//! A named, immutable configuration of contents.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::{ContentItem, SelectionId, VariantId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selection '{selection}' lists item '{item}' more than once")]
    DuplicateItem { selection: String, item: String },
}

/// One switchable configuration: an ordered list of items plus labels.
///
/// An empty item list is valid and means "nothing".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    id: SelectionId,
    display_name: String,
    items: Vec<ContentItem>,
    linked_variant: Option<VariantId>,
}

impl Selection {
    /// Build a selection. A blank display name falls back to the id.
    pub fn new(
        id: SelectionId,
        display_name: impl Into<String>,
        items: Vec<ContentItem>,
        linked_variant: Option<VariantId>,
    ) -> Result<Self, SelectionError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.name().as_str()) {
                return Err(SelectionError::DuplicateItem {
                    selection: id.to_string(),
                    item: item.name().to_string(),
                });
            }
        }

        let display_name = display_name.into();
        let display_name = if display_name.trim().is_empty() {
            id.to_string()
        } else {
            display_name
        };

        Ok(Self {
            id,
            display_name,
            items,
            linked_variant,
        })
    }

    #[must_use]
    pub fn id(&self) -> &SelectionId {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    #[must_use]
    pub fn linked_variant(&self) -> Option<&VariantId> {
        self.linked_variant.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by identity.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.name() == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Item identities in declaration order.
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.name().as_str())
    }
}
