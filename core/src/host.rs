//! Interfaces the engine consumes from its host.

use std::collections::BTreeMap;

use fuelswitch_types::ContentItem;

use crate::graph::PartId;

/// One entry of a container's actual contents, as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredContent {
    pub name: String,
    pub amount: f64,
    pub capacity: f64,
    pub flags: BTreeMap<String, String>,
}

impl StoredContent {
    pub fn new(name: impl Into<String>, amount: f64, capacity: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            capacity,
            flags: BTreeMap::new(),
        }
    }
}

impl From<&ContentItem> for StoredContent {
    fn from(item: &ContentItem) -> Self {
        Self {
            name: item.name().to_string(),
            amount: item.initial_amount(),
            capacity: item.capacity(),
            flags: item.flags().clone(),
        }
    }
}

/// The physical object whose contents the engine switches.
pub trait Container {
    fn list_contents(&self) -> Vec<StoredContent>;

    fn clear_contents(&mut self);

    /// Add `item` at its declared initial amount and capacity.
    fn add_content(&mut self, item: &ContentItem);

    /// Remove the entry named `name`. Returns false if there was none.
    fn remove_content(&mut self, name: &str) -> bool;

    /// Recompute any state the host derives from contents (simulation
    /// caches, mass, cost).
    fn recompute_derived_state(&mut self);
}

/// UI plumbing notified after operator-visible changes.
///
/// Only the primary container of a switch is reported; counterparts that were
/// updated by propagation are not.
pub trait SwitchObserver {
    /// The switch action's label must be redrawn.
    fn action_label_changed(&mut self, _part: PartId, _label: &str) {}

    /// Whether the operator-facing switch action should be shown.
    fn action_visibility_changed(&mut self, _part: PartId, _visible: bool) {}

    /// The container's contents changed and dependent views need a refresh.
    fn container_modified(&mut self, _part: PartId) {}
}

impl SwitchObserver for () {}

/// Observer that records every notification, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingObserver {
    events: Vec<ObservedEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Label(PartId, String),
    Visibility(PartId, bool),
    Modified(PartId),
}

impl RecordingObserver {
    #[must_use]
    pub fn events(&self) -> &[ObservedEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<ObservedEvent> {
        std::mem::take(&mut self.events)
    }
}

impl SwitchObserver for RecordingObserver {
    fn action_label_changed(&mut self, part: PartId, label: &str) {
        self.events.push(ObservedEvent::Label(part, label.to_string()));
    }

    fn action_visibility_changed(&mut self, part: PartId, visible: bool) {
        self.events.push(ObservedEvent::Visibility(part, visible));
    }

    fn container_modified(&mut self, part: PartId) {
        self.events.push(ObservedEvent::Modified(part));
    }
}
