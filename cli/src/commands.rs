//! Command implementations. Each returns the text to print on success.

use std::fmt::Write;

use anyhow::{Result, anyhow};

use fuelswitch_config::TomlCatalogSource;
use fuelswitch_core::{
    Assembly, CatalogRegistry, PartGraph, PartId, RecordingObserver, StoredContent,
    SwitchController, SwitchOutcome,
};
use fuelswitch_types::{ContainerTypeName, EngineSettings};

pub fn check(source: &TomlCatalogSource) -> Result<String> {
    if source.is_empty() {
        return Err(anyhow!("catalog file declares no container types"));
    }
    let failures = source.check();
    let mut out = String::new();
    for name in source.container_types() {
        match failures.iter().find(|(failed, _)| failed == name) {
            Some((_, err)) => {
                let _ = writeln!(out, "invalid {name}: {err}");
            }
            None => {
                let _ = writeln!(out, "ok      {name}");
            }
        }
    }
    if failures.is_empty() {
        Ok(out)
    } else {
        Err(anyhow!(
            "{out}{} of {} catalogs are invalid",
            failures.len(),
            source.len()
        ))
    }
}

pub fn describe(source: TomlCatalogSource, container_type: &str) -> Result<String> {
    let registry = CatalogRegistry::new(source);
    let catalog = registry.resolve(container_type)?;
    let mut out = format!("{container_type}\n");
    out.push_str(&catalog.describe());
    let switch = if catalog.manual_switch_enabled() {
        "manual"
    } else {
        "by variant"
    };
    let _ = writeln!(out, "Switching: {switch}");
    Ok(out)
}

pub fn cycle(
    source: TomlCatalogSource,
    settings: EngineSettings,
    container_type: &str,
    steps: usize,
    symmetry: usize,
) -> Result<String> {
    let registry = CatalogRegistry::new(source);
    let (mut assembly, parts) = spawn(&registry, container_type, symmetry)?;
    let mut controller =
        SwitchController::with_observer(&registry, RecordingObserver::default())
            .with_settings(settings);

    let mut out = String::new();
    for &part in &parts {
        controller.on_started(&mut assembly, part);
        controller.on_created(&mut assembly, part);
    }
    out.push_str("spawned\n");
    render(&mut out, &controller, &mut assembly, &parts);

    for step in 1..=steps {
        let outcome = controller.on_switch_requested(&mut assembly, parts[0]);
        let _ = writeln!(out, "switch {step}: {}", describe_outcome(&outcome));
        render(&mut out, &controller, &mut assembly, &parts);
    }
    Ok(out)
}

pub fn variant(
    source: TomlCatalogSource,
    settings: EngineSettings,
    container_type: &str,
    variant: &str,
) -> Result<String> {
    let registry = CatalogRegistry::new(source);
    let (mut assembly, parts) = spawn(&registry, container_type, 1)?;
    let mut controller =
        SwitchController::with_observer(&registry, RecordingObserver::default())
            .with_settings(settings);

    let mut out = String::new();
    controller.on_created(&mut assembly, parts[0]);
    out.push_str("spawned\n");
    render(&mut out, &controller, &mut assembly, &parts);

    let outcome = controller.on_variant_applied(&mut assembly, parts[0], variant);
    let _ = writeln!(out, "variant {variant}: {}", describe_outcome(&outcome));
    render(&mut out, &controller, &mut assembly, &parts);
    Ok(out)
}

fn spawn(
    registry: &CatalogRegistry,
    container_type: &str,
    symmetry: usize,
) -> Result<(Assembly, Vec<PartId>)> {
    let name = ContainerTypeName::new(container_type)?;
    // Fail fast instead of simulating a container that would only log errors.
    registry.resolve(name.as_str())?;

    let mut assembly = Assembly::new();
    let root = assembly.add_part("root", None);
    let parts: Vec<PartId> = (0..symmetry.max(1))
        .map(|i| assembly.add_switchable(format!("{container_type}.{i}"), name.clone(), Some(root)))
        .collect();
    if parts.len() > 1 {
        assembly.link_symmetry(&parts);
    }
    Ok((assembly, parts))
}

fn render(
    out: &mut String,
    controller: &SwitchController<'_, RecordingObserver>,
    assembly: &mut Assembly,
    parts: &[PartId],
) {
    for &part in parts {
        let name = assembly.part_name(part);
        let label = controller
            .current_label(assembly, part)
            .unwrap_or_else(|| "<unavailable>".to_string());
        let contents = assembly
            .resources(part)
            .map(|list| format_contents(list.entries()))
            .unwrap_or_default();
        let _ = writeln!(out, "  {name} [{label}] {contents}");
    }
}

fn format_contents(entries: &[StoredContent]) -> String {
    if entries.is_empty() {
        return "(empty)".to_string();
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} {}/{}",
                entry.name,
                format_amount(entry.amount),
                format_amount(entry.capacity)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn describe_outcome(outcome: &SwitchOutcome) -> String {
    match outcome {
        SwitchOutcome::Switched {
            from,
            to,
            counterparts,
        } => format!("{from} -> {to} ({counterparts} counterparts)"),
        SwitchOutcome::Initialized(id) => format!("initialized to {id}"),
        SwitchOutcome::AlreadyActive => "already active".to_string(),
        SwitchOutcome::NotLinked => "no linked selection".to_string(),
        SwitchOutcome::NotSwitchable => "not switchable".to_string(),
        SwitchOutcome::Unavailable => "catalog unavailable".to_string(),
    }
}
