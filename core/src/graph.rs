//! The host's construction tree and symmetry links, as the engine sees them.

use std::fmt;

use crate::engine::SwitchEngine;
use crate::host::Container;

/// Handle to a part in the host's construction tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(usize);

impl PartId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A part that carries a switch: its engine and the container it drives.
pub struct Switchable<'a, C: ?Sized> {
    pub engine: &'a mut SwitchEngine,
    pub container: &'a mut C,
}

pub trait PartGraph {
    type Container: Container;

    /// Every part of the assembly, in the host's order.
    fn parts(&self) -> Vec<PartId>;

    /// Direct children of `part` in the construction tree.
    fn children(&self, part: PartId) -> Vec<PartId>;

    /// Parts mirrored in symmetry with `part`, excluding `part` itself.
    fn counterparts(&self, part: PartId) -> Vec<PartId>;

    /// Name used in log lines.
    fn part_name(&self, part: PartId) -> String;

    /// The switch on `part`, if it has one.
    fn switchable_mut(&mut self, part: PartId) -> Option<Switchable<'_, Self::Container>>;
}

/// All parts of the subtree rooted at `root`, depth-first pre-order.
///
/// Walks an explicit stack so deep assemblies cannot overflow the call stack.
pub fn subtree<G: PartGraph + ?Sized>(graph: &G, root: PartId) -> Vec<PartId> {
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(part) = stack.pop() {
        order.push(part);
        let children = graph.children(part);
        stack.extend(children.into_iter().rev());
    }
    order
}
