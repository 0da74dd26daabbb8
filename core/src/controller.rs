//! Host event hooks.
//!
//! Every path that changes contents (spawn, manual switch, variant switch,
//! attach, load) ends in [`SwitchEngine::select`] or
//! [`SwitchEngine::sanitize_current`]. Manual and variant switches share
//! [`SwitchController::switch_to`], so they cannot disagree about what a
//! switch does.
//!
//! Failures never reach the caller as errors. A container type without a
//! catalog is logged and its contents are left alone.

use fuelswitch_types::{CurrentSelection, EngineSettings, LoadPolicy, SelectionId};

use crate::engine::SwitchEngine;
use crate::errors::SwitchError;
use crate::graph::{PartGraph, PartId, subtree};
use crate::host::{Container, SwitchObserver};
use crate::registry::CatalogRegistry;

/// What an event hook did to the part it was called for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The part switched; `counterparts` were updated along with it.
    Switched {
        from: CurrentSelection,
        to: SelectionId,
        counterparts: usize,
    },
    /// The part was brought to its initial selection.
    Initialized(SelectionId),
    /// The requested selection was already active.
    AlreadyActive,
    /// The variant is not linked to any selection.
    NotLinked,
    /// The part carries no switch.
    NotSwitchable,
    /// The part's catalog could not be used; contents untouched.
    Unavailable,
}

/// Summary of [`SwitchController::on_loaded`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Switchable parts visited.
    pub visited: usize,
    /// Parts that held contents outside their selection, with what was removed.
    pub sanitized: Vec<(PartId, Vec<String>)>,
    /// Parts fully re-applied.
    pub reapplied: usize,
    /// Parts skipped because their catalog was unavailable.
    pub unavailable: usize,
}

pub struct SwitchController<'r, O = ()> {
    registry: &'r CatalogRegistry,
    settings: EngineSettings,
    observer: O,
}

impl<'r> SwitchController<'r, ()> {
    #[must_use]
    pub fn new(registry: &'r CatalogRegistry) -> Self {
        Self::with_observer(registry, ())
    }
}

impl<'r, O: SwitchObserver> SwitchController<'r, O> {
    #[must_use]
    pub fn with_observer(registry: &'r CatalogRegistry, observer: O) -> Self {
        Self {
            registry,
            settings: EngineSettings::default(),
            observer,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    #[must_use]
    pub fn registry(&self) -> &CatalogRegistry {
        self.registry
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// The part's action label, `"<selector label>: <display name>"`.
    pub fn current_label<G: PartGraph>(&self, graph: &mut G, part: PartId) -> Option<String> {
        graph.switchable_mut(part)?.engine.current_label()
    }

    /// The part is starting up. Resolves its catalog and tells the UI whether
    /// the manual switch action applies; catalogs driven by variants hide it.
    ///
    /// Returns that visibility, or `None` if the part has no usable switch.
    pub fn on_started<G: PartGraph>(&mut self, graph: &mut G, part: PartId) -> Option<bool> {
        let name = graph.part_name(part);
        let switchable = graph.switchable_mut(part)?;
        let catalog = match switchable.engine.resolve(self.registry) {
            Ok(catalog) => catalog,
            Err(err) => {
                unavailable(&name, &err);
                return None;
            }
        };
        let visible = catalog.manual_switch_enabled();
        self.observer.action_visibility_changed(part, visible);
        if let Some(label) = switchable.engine.current_label() {
            self.observer.action_label_changed(part, &label);
        }
        Some(visible)
    }

    /// The part was spawned fresh. Applies its initial selection; symmetry
    /// counterparts get their own `on_created`.
    pub fn on_created<G: PartGraph>(&mut self, graph: &mut G, part: PartId) -> SwitchOutcome {
        let name = graph.part_name(part);
        let Some(switchable) = graph.switchable_mut(part) else {
            return SwitchOutcome::NotSwitchable;
        };
        let engine = switchable.engine;
        if let Err(err) = engine.prepare(self.registry) {
            return unavailable(&name, &err);
        }
        if let Err(err) = engine.apply_current(switchable.container) {
            return unavailable(&name, &err);
        }
        let Some(id) = engine.current().id().cloned() else {
            return SwitchOutcome::Unavailable;
        };
        tracing::debug!(part = %name, selection = %id, "Initialized resources");
        if let Some(label) = engine.current_label() {
            self.observer.action_label_changed(part, &label);
        }
        SwitchOutcome::Initialized(id)
    }

    /// The operator pressed the switch action: advance to the next selection
    /// in catalog order.
    pub fn on_switch_requested<G: PartGraph>(
        &mut self,
        graph: &mut G,
        part: PartId,
    ) -> SwitchOutcome {
        let name = graph.part_name(part);
        let Some(switchable) = graph.switchable_mut(part) else {
            return SwitchOutcome::NotSwitchable;
        };
        let catalog = match switchable.engine.resolve(self.registry) {
            Ok(catalog) => catalog,
            Err(err) => return unavailable(&name, &err),
        };
        let target = match switchable.engine.current().id() {
            Some(id) => catalog.next(id.as_str()).clone(),
            None => catalog.default_id().clone(),
        };
        self.switch_to(graph, part, &target)
    }

    /// A cosmetic variant was applied to the part. Switches to the selection
    /// linked to that variant, if any and if not already active.
    pub fn on_variant_applied<G: PartGraph>(
        &mut self,
        graph: &mut G,
        part: PartId,
        variant: &str,
    ) -> SwitchOutcome {
        let name = graph.part_name(part);
        let Some(switchable) = graph.switchable_mut(part) else {
            return SwitchOutcome::NotSwitchable;
        };
        let catalog = match switchable.engine.resolve(self.registry) {
            Ok(catalog) => catalog,
            Err(err) => return unavailable(&name, &err),
        };
        let Some(selection) = catalog.find_by_linked_variant(variant) else {
            tracing::debug!(part = %name, variant, "Variant has no linked selection");
            return SwitchOutcome::NotLinked;
        };
        if switchable.engine.current().is(selection.id().as_str()) {
            return SwitchOutcome::AlreadyActive;
        }
        tracing::info!(
            part = %name,
            variant,
            selection = selection.display_name(),
            "Variant changed, switching resources"
        );
        let target = selection.id().clone();
        self.switch_to(graph, part, &target)
    }

    /// Switch `part` to `target` and propagate one level to its counterparts.
    ///
    /// Counterparts take the same id and contents but are not switched
    /// through this function, so they never propagate further and never
    /// notify the UI.
    pub fn switch_to<G: PartGraph>(
        &mut self,
        graph: &mut G,
        part: PartId,
        target: &SelectionId,
    ) -> SwitchOutcome {
        let name = graph.part_name(part);
        let Some(switchable) = graph.switchable_mut(part) else {
            return SwitchOutcome::NotSwitchable;
        };
        let engine = switchable.engine;
        if let Err(err) = engine.resolve(self.registry) {
            return unavailable(&name, &err);
        }
        let from = engine.current().clone();
        let old_label = engine.current_label();
        if let Err(err) = engine.select(target, switchable.container) {
            tracing::warn!(part = %name, error = %err, "Switch target rejected");
            return SwitchOutcome::Unavailable;
        }
        let new_label = engine.current_label().unwrap_or_else(|| target.to_string());
        tracing::info!(
            part = %name,
            from = old_label.as_deref().unwrap_or("<none>"),
            to = %new_label,
            "Switched resources"
        );
        self.observer.action_label_changed(part, &new_label);
        self.observer.container_modified(part);

        let mut counterparts = 0;
        for counterpart in graph.counterparts(part) {
            if counterpart == part {
                continue;
            }
            if self.mirror(graph, counterpart, target) {
                counterparts += 1;
            }
        }

        SwitchOutcome::Switched {
            from,
            to: target.clone(),
            counterparts,
        }
    }

    fn mirror<G: PartGraph>(&self, graph: &mut G, part: PartId, target: &SelectionId) -> bool {
        let name = graph.part_name(part);
        let Some(switchable) = graph.switchable_mut(part) else {
            return false;
        };
        match follow(self.registry, switchable.engine, switchable.container, target) {
            Ok(()) => {
                tracing::debug!(part = %name, selection = %target, "Mirrored switch to counterpart");
                true
            }
            Err(err) => {
                tracing::warn!(part = %name, error = %err, "Counterpart could not follow switch");
                false
            }
        }
    }

    /// A subtree was attached in the construction tree rooted at `part`.
    ///
    /// Sanitizes every switchable part of the subtree. If the subtree holds
    /// any switchable part, the subtrees of `part`'s symmetry counterparts are
    /// processed as well. Returns whether any switchable part was found.
    pub fn on_attached<G: PartGraph>(&mut self, graph: &mut G, part: PartId) -> bool {
        let found = self.sanitize_tree(graph, part);
        if found {
            for counterpart in graph.counterparts(part) {
                if counterpart != part {
                    self.sanitize_tree(graph, counterpart);
                }
            }
        }
        found
    }

    fn sanitize_tree<G: PartGraph>(&self, graph: &mut G, root: PartId) -> bool {
        let mut found = false;
        for part in subtree(graph, root) {
            let name = graph.part_name(part);
            let Some(switchable) = graph.switchable_mut(part) else {
                continue;
            };
            found = true;
            let engine = switchable.engine;
            let prepared = match engine.prepare(self.registry) {
                Ok(prepared) => prepared,
                Err(err) => {
                    unavailable(&name, &err);
                    continue;
                }
            };
            let result = if prepared.needs_apply {
                engine.apply_current(switchable.container)
            } else {
                engine
                    .sanitize_current(switchable.container)
                    .map(|report| log_corruption(&name, report.removed()))
            };
            if let Err(err) = result {
                tracing::warn!(part = %name, error = %err, "Attach sanitize failed");
            }
        }
        found
    }

    /// A whole saved assembly was loaded.
    ///
    /// Every switchable part is sanitized against its persisted selection.
    /// Under [`LoadPolicy::Reapply`] the selection is then re-applied so the
    /// container matches it exactly; under [`LoadPolicy::SanitizeOnly`] stored
    /// amounts survive. Parts whose persisted id is unknown fall back to the
    /// catalog default and are always re-applied.
    pub fn on_loaded<G: PartGraph>(&mut self, graph: &mut G) -> LoadReport {
        let mut report = LoadReport::default();
        let reapply = self.settings.load_policy() == LoadPolicy::Reapply;
        for part in graph.parts() {
            let name = graph.part_name(part);
            let Some(switchable) = graph.switchable_mut(part) else {
                continue;
            };
            report.visited += 1;
            let engine = switchable.engine;
            let prepared = match engine.prepare(self.registry) {
                Ok(prepared) => prepared,
                Err(err) => {
                    unavailable(&name, &err);
                    report.unavailable += 1;
                    continue;
                }
            };

            match engine.sanitize_current(switchable.container) {
                Ok(sanitized) if !sanitized.is_clean() => {
                    log_corruption(&name, sanitized.removed());
                    report
                        .sanitized
                        .push((part, sanitized.removed().to_vec()));
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(part = %name, error = %err, "Load sanitize failed");
                }
            }

            if reapply || prepared.needs_apply {
                match engine.apply_current(switchable.container) {
                    Ok(()) => report.reapplied += 1,
                    Err(err) => {
                        tracing::warn!(part = %name, error = %err, "Load re-apply failed");
                    }
                }
            }
        }
        tracing::debug!(
            visited = report.visited,
            sanitized = report.sanitized.len(),
            reapplied = report.reapplied,
            "Assembly loaded"
        );
        report
    }
}

fn follow<C: Container + ?Sized>(
    registry: &CatalogRegistry,
    engine: &mut SwitchEngine,
    container: &mut C,
    target: &SelectionId,
) -> Result<(), SwitchError> {
    engine.resolve(registry)?;
    engine.select(target, container)
}

fn unavailable(part: &str, err: &SwitchError) -> SwitchOutcome {
    tracing::error!(
        part,
        container_type = err.container_type(),
        error = %err,
        "Switchable container has no usable catalog; contents left untouched"
    );
    SwitchOutcome::Unavailable
}

fn log_corruption(part: &str, removed: &[String]) {
    if !removed.is_empty() {
        tracing::warn!(
            part,
            removed = ?removed,
            "Corrupted contents: removed items outside the active selection"
        );
    }
}
