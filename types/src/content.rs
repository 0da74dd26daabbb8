//! A single unit of content declared by a selection.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::ItemName;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentItemError {
    #[error("item '{name}': amount {value} must be a finite, non-negative number")]
    InvalidAmount { name: String, value: f64 },
    #[error("item '{name}': capacity {value} must be a finite, non-negative number")]
    InvalidCapacity { name: String, value: f64 },
    #[error("item '{name}': amount {amount} exceeds capacity {capacity}")]
    AmountExceedsCapacity {
        name: String,
        amount: f64,
        capacity: f64,
    },
}

/// Immutable description of one unit of content.
///
/// Invariant: `capacity >= initial_amount >= 0`, both finite.
/// Flags are opaque host data (e.g. `flow_state`) and are passed through
/// untouched when the item is added to a container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    name: ItemName,
    initial_amount: f64,
    capacity: f64,
    flags: BTreeMap<String, String>,
}

impl ContentItem {
    pub fn new(name: ItemName, initial_amount: f64, capacity: f64) -> Result<Self, ContentItemError> {
        if !initial_amount.is_finite() || initial_amount < 0.0 {
            return Err(ContentItemError::InvalidAmount {
                name: name.into_inner(),
                value: initial_amount,
            });
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(ContentItemError::InvalidCapacity {
                name: name.into_inner(),
                value: capacity,
            });
        }
        if initial_amount > capacity {
            return Err(ContentItemError::AmountExceedsCapacity {
                name: name.into_inner(),
                amount: initial_amount,
                capacity,
            });
        }
        Ok(Self {
            name,
            initial_amount,
            capacity,
            flags: BTreeMap::new(),
        })
    }

    /// A full item: amount equals capacity.
    pub fn full(name: ItemName, capacity: f64) -> Result<Self, ContentItemError> {
        Self::new(name, capacity, capacity)
    }

    #[must_use]
    pub fn with_flags(mut self, flags: BTreeMap<String, String>) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    #[must_use]
    pub fn initial_amount(&self) -> f64 {
        self.initial_amount
    }

    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[must_use]
    pub fn flags(&self) -> &BTreeMap<String, String> {
        &self.flags
    }

    #[must_use]
    pub fn flag(&self, key: &str) -> Option<&str> {
        self.flags.get(key).map(String::as_str)
    }
}
