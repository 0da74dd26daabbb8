//! Writing a selection into a container, and stripping what does not belong.

use fuelswitch_types::Selection;

use crate::host::Container;

/// Replace the container's contents with exactly `selection`'s items, in
/// declaration order, each at its initial amount and capacity.
///
/// Idempotent. Derived host state is recomputed once, after the last item is
/// added, so callers never observe a half-applied container.
pub fn apply<C: Container + ?Sized>(selection: &Selection, container: &mut C) {
    container.clear_contents();
    for item in selection.items() {
        container.add_content(item);
    }
    container.recompute_derived_state();
}

/// Items removed by [`sanitize`], in the order the container listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    removed: Vec<String>,
}

impl SanitizeReport {
    #[must_use]
    pub fn removed(&self) -> &[String] {
        &self.removed
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Remove every entry whose identity is not part of `selection`.
///
/// Only strips; items the selection declares but the container lacks are not
/// re-added. Derived state is recomputed only if something was removed.
pub fn sanitize<C: Container + ?Sized>(container: &mut C, selection: &Selection) -> SanitizeReport {
    let removed: Vec<String> = container
        .list_contents()
        .into_iter()
        .filter(|content| !selection.contains(&content.name))
        .map(|content| content.name)
        .collect();

    if removed.is_empty() {
        return SanitizeReport::default();
    }

    for name in &removed {
        container.remove_content(name);
    }
    container.recompute_derived_state();
    SanitizeReport { removed }
}
