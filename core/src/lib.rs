//! Selection engine for switchable containers.
//!
//! A switchable container exposes several mutually exclusive, named
//! configurations of contents from its type's [`Catalog`](fuelswitch_types::Catalog).
//! This crate tracks which one is active, writes it into the host container,
//! keeps symmetry counterparts in step, and strips contents the host added
//! behind the engine's back.
//!
//! Hosts plug in through three seams: [`Container`] for the object being
//! mutated, [`PartGraph`] for the construction tree and symmetry links, and
//! [`SwitchObserver`] for UI notifications. [`SwitchController`] exposes the
//! event hooks a host calls.

mod apply;
pub mod assembly;
mod controller;
mod engine;
pub mod errors;
mod graph;
mod host;
mod registry;

pub use apply::{SanitizeReport, apply, sanitize};
pub use assembly::{Assembly, AssemblyPart, ResourceList};
pub use controller::{LoadReport, SwitchController, SwitchOutcome};
pub use engine::{EnginePhase, SwitchEngine};
pub use errors::SwitchError;
pub use graph::{PartGraph, PartId, Switchable, subtree};
pub use host::{Container, ObservedEvent, RecordingObserver, StoredContent, SwitchObserver};
pub use registry::CatalogRegistry;
