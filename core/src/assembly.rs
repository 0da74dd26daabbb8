//! In-memory host: a construction tree of parts with resource lists.
//!
//! Backs the simulator binary and the test suites. Real hosts implement
//! [`Container`] and [`PartGraph`] over their own objects instead.

use fuelswitch_types::{ContainerTypeName, ContentItem, CurrentSelection};

use crate::engine::SwitchEngine;
use crate::graph::{PartGraph, PartId, Switchable};
use crate::host::{Container, StoredContent};

/// Ordered resource entries plus a counter of derived-state recomputes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceList {
    entries: Vec<StoredContent>,
    recomputes: usize,
}

impl ResourceList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[StoredContent] {
        &self.entries
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StoredContent> {
        self.entries.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times derived state was recomputed.
    #[must_use]
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    /// Insert an entry the engine never asked for, the way a host does when
    /// it repopulates a container behind the engine's back.
    pub fn push_raw(&mut self, content: StoredContent) {
        self.entries.push(content);
    }

    /// Overwrite the amount of an existing entry.
    pub fn set_amount(&mut self, name: &str, amount: f64) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.amount = amount;
                true
            }
            None => false,
        }
    }
}

impl From<Vec<StoredContent>> for ResourceList {
    fn from(entries: Vec<StoredContent>) -> Self {
        Self {
            entries,
            recomputes: 0,
        }
    }
}

impl Container for ResourceList {
    fn list_contents(&self) -> Vec<StoredContent> {
        self.entries.clone()
    }

    fn clear_contents(&mut self) {
        self.entries.clear();
    }

    fn add_content(&mut self, item: &ContentItem) {
        let content = StoredContent::from(item);
        match self.entries.iter_mut().find(|e| e.name == content.name) {
            Some(existing) => *existing = content,
            None => self.entries.push(content),
        }
    }

    fn remove_content(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    fn recompute_derived_state(&mut self) {
        self.recomputes += 1;
    }
}

#[derive(Debug, Clone)]
pub struct AssemblyPart {
    name: String,
    parent: Option<PartId>,
    children: Vec<PartId>,
    symmetry_group: Option<usize>,
    resources: ResourceList,
    engine: Option<SwitchEngine>,
}

impl AssemblyPart {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[PartId] {
        &self.children
    }

    #[must_use]
    pub fn resources(&self) -> &ResourceList {
        &self.resources
    }

    #[must_use]
    pub fn engine(&self) -> Option<&SwitchEngine> {
        self.engine.as_ref()
    }
}

/// Arena of parts forming one construction tree (or several, before they are
/// attached to each other).
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    parts: Vec<AssemblyPart>,
    symmetry_groups: Vec<Vec<PartId>>,
}

impl Assembly {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part without a switch.
    pub fn add_part(&mut self, name: impl Into<String>, parent: Option<PartId>) -> PartId {
        self.push(name.into(), parent, None)
    }

    /// Add a part carrying a fresh switch for `container_type`.
    pub fn add_switchable(
        &mut self,
        name: impl Into<String>,
        container_type: ContainerTypeName,
        parent: Option<PartId>,
    ) -> PartId {
        self.push(name.into(), parent, Some(SwitchEngine::new(container_type)))
    }

    /// Add a part restored from storage: persisted id plus stored contents.
    pub fn add_restored(
        &mut self,
        name: impl Into<String>,
        container_type: ContainerTypeName,
        current: CurrentSelection,
        contents: Vec<StoredContent>,
        parent: Option<PartId>,
    ) -> PartId {
        let engine = SwitchEngine::with_persisted(container_type, current);
        let id = self.push(name.into(), parent, Some(engine));
        self.parts[id.index()].resources = ResourceList::from(contents);
        id
    }

    fn push(&mut self, name: String, parent: Option<PartId>, engine: Option<SwitchEngine>) -> PartId {
        let id = PartId::new(self.parts.len());
        self.parts.push(AssemblyPart {
            name,
            parent: None,
            children: Vec::new(),
            symmetry_group: None,
            resources: ResourceList::default(),
            engine,
        });
        if let Some(parent) = parent {
            self.attach(id, parent);
        }
        id
    }

    /// Make `child` a child of `parent`, detaching it from any previous parent.
    pub fn attach(&mut self, child: PartId, parent: PartId) {
        if let Some(old) = self.parts[child.index()].parent.take() {
            self.parts[old.index()].children.retain(|c| *c != child);
        }
        self.parts[child.index()].parent = Some(parent);
        self.parts[parent.index()].children.push(child);
    }

    /// Mirror the given parts in symmetry with each other.
    pub fn link_symmetry(&mut self, parts: &[PartId]) {
        let group = self.symmetry_groups.len();
        self.symmetry_groups.push(parts.to_vec());
        for part in parts {
            self.parts[part.index()].symmetry_group = Some(group);
        }
    }

    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&AssemblyPart> {
        self.parts.get(id.index())
    }

    #[must_use]
    pub fn resources(&self, id: PartId) -> Option<&ResourceList> {
        self.part(id).map(AssemblyPart::resources)
    }

    pub fn resources_mut(&mut self, id: PartId) -> Option<&mut ResourceList> {
        self.parts.get_mut(id.index()).map(|p| &mut p.resources)
    }

    #[must_use]
    pub fn engine(&self, id: PartId) -> Option<&SwitchEngine> {
        self.part(id).and_then(AssemblyPart::engine)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl PartGraph for Assembly {
    type Container = ResourceList;

    fn parts(&self) -> Vec<PartId> {
        (0..self.parts.len()).map(PartId::new).collect()
    }

    fn children(&self, part: PartId) -> Vec<PartId> {
        self.part(part)
            .map(|p| p.children.clone())
            .unwrap_or_default()
    }

    fn counterparts(&self, part: PartId) -> Vec<PartId> {
        self.part(part)
            .and_then(|p| p.symmetry_group)
            .and_then(|group| self.symmetry_groups.get(group))
            .map(|members| members.iter().copied().filter(|m| *m != part).collect())
            .unwrap_or_default()
    }

    fn part_name(&self, part: PartId) -> String {
        self.part(part)
            .map_or_else(|| part.to_string(), |p| format!("{} {part}", p.name))
    }

    fn switchable_mut(&mut self, part: PartId) -> Option<Switchable<'_, ResourceList>> {
        let AssemblyPart {
            resources, engine, ..
        } = self.parts.get_mut(part.index())?;
        Some(Switchable {
            engine: engine.as_mut()?,
            container: resources,
        })
    }
}
