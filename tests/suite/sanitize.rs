//! Loading saved assemblies and attaching subtrees.

use fuelswitch_core::{Assembly, PartId, SwitchController};
use fuelswitch_types::{CurrentSelection, EngineSettings, LoadPolicy};

use crate::common::{contents, container_type, entry, registry, stored};

fn restored_tank(
    assembly: &mut Assembly,
    persisted: Option<&str>,
    parent: Option<PartId>,
) -> PartId {
    assembly.add_restored(
        "tank",
        container_type("fuelTank"),
        CurrentSelection::from_persisted(persisted),
        vec![
            stored("LiquidFuel", 20.0, 50.0),
            stored("Oxidizer", 50.0, 50.0),
            stored("MonoPropellant", 10.0, 10.0),
        ],
        parent,
    )
}

#[test]
fn load_strips_strays_and_reapplies() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let mut assembly = Assembly::new();
    let tank = restored_tank(&mut assembly, Some("LFO"), None);

    let report = controller.on_loaded(&mut assembly);
    assert_eq!(report.visited, 1);
    assert_eq!(report.reapplied, 1);
    assert_eq!(
        report.sanitized,
        vec![(tank, vec!["MonoPropellant".to_string()])]
    );
    assert_eq!(
        contents(&assembly, tank),
        vec![entry("LiquidFuel", 50.0, 50.0), entry("Oxidizer", 50.0, 50.0)]
    );
    assert!(assembly.engine(tank).unwrap().current().is("LFO"));
}

#[test]
fn sanitize_only_keeps_stored_amounts() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry)
        .with_settings(EngineSettings::new(LoadPolicy::SanitizeOnly));
    let mut assembly = Assembly::new();
    let tank = restored_tank(&mut assembly, Some("LFO"), None);

    let report = controller.on_loaded(&mut assembly);
    assert_eq!(report.reapplied, 0);
    assert_eq!(report.sanitized.len(), 1);
    assert_eq!(
        contents(&assembly, tank),
        vec![entry("LiquidFuel", 20.0, 50.0), entry("Oxidizer", 50.0, 50.0)]
    );
}

#[test]
fn clean_load_under_sanitize_only_does_nothing() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry)
        .with_settings(EngineSettings::new(LoadPolicy::SanitizeOnly));
    let mut assembly = Assembly::new();
    let tank = assembly.add_restored(
        "tank",
        container_type("fuelTank"),
        CurrentSelection::from_persisted(Some("LF")),
        vec![stored("LiquidFuel", 12.5, 100.0)],
        None,
    );

    let report = controller.on_loaded(&mut assembly);
    assert!(report.sanitized.is_empty());
    assert_eq!(contents(&assembly, tank), vec![entry("LiquidFuel", 12.5, 100.0)]);
    assert_eq!(assembly.resources(tank).unwrap().recompute_count(), 0);
}

#[test]
fn unknown_persisted_id_falls_back_to_default() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry)
        .with_settings(EngineSettings::new(LoadPolicy::SanitizeOnly));
    let mut assembly = Assembly::new();
    let tank = restored_tank(&mut assembly, Some("Xenon"), None);

    let report = controller.on_loaded(&mut assembly);
    assert_eq!(report.reapplied, 1);
    assert!(assembly.engine(tank).unwrap().current().is("LF"));
    assert_eq!(contents(&assembly, tank), vec![entry("LiquidFuel", 100.0, 100.0)]);
}

#[test]
fn load_skips_parts_without_catalog() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let mut assembly = Assembly::new();
    let root = assembly.add_part("pod", None);
    let probe = assembly.add_restored(
        "probe",
        container_type("probeCore"),
        CurrentSelection::from_persisted(Some("Battery")),
        vec![stored("ElectricCharge", 5.0, 10.0)],
        Some(root),
    );
    restored_tank(&mut assembly, Some("LF"), Some(root));

    let report = controller.on_loaded(&mut assembly);
    assert_eq!(report.visited, 2);
    assert_eq!(report.unavailable, 1);
    assert_eq!(contents(&assembly, probe), vec![entry("ElectricCharge", 5.0, 10.0)]);
    assert!(assembly.engine(probe).unwrap().current().is("Battery"));
}

#[test]
fn attach_sanitizes_the_whole_subtree() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let mut assembly = Assembly::new();
    let adapter = assembly.add_part("adapter", None);
    let upper = restored_tank(&mut assembly, Some("LFO"), Some(adapter));
    let lower = restored_tank(&mut assembly, Some("LFO"), Some(upper));

    assert!(controller.on_attached(&mut assembly, adapter));
    for tank in [upper, lower] {
        assert_eq!(
            contents(&assembly, tank),
            vec![entry("LiquidFuel", 20.0, 50.0), entry("Oxidizer", 50.0, 50.0)]
        );
    }
}

#[test]
fn attach_applies_default_to_unresolved_parts() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let mut assembly = Assembly::new();
    let tank = restored_tank(&mut assembly, None, None);

    assert!(controller.on_attached(&mut assembly, tank));
    assert!(assembly.engine(tank).unwrap().current().is("LF"));
    assert_eq!(contents(&assembly, tank), vec![entry("LiquidFuel", 100.0, 100.0)]);
}

#[test]
fn attach_reaches_counterpart_subtrees() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let mut assembly = Assembly::new();
    let left = assembly.add_part("left strut", None);
    let right = assembly.add_part("right strut", None);
    assembly.link_symmetry(&[left, right]);
    let left_tank = restored_tank(&mut assembly, Some("LFO"), Some(left));
    let right_tank = restored_tank(&mut assembly, Some("LFO"), Some(right));

    assert!(controller.on_attached(&mut assembly, left));
    for tank in [left_tank, right_tank] {
        let names = assembly.resources(tank).unwrap().names();
        assert_eq!(names, vec!["LiquidFuel", "Oxidizer"]);
    }
}

#[test]
fn attach_without_switchables_reports_nothing() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let mut assembly = Assembly::new();
    let left = assembly.add_part("left strut", None);
    let right = assembly.add_part("right strut", None);
    assembly.link_symmetry(&[left, right]);
    let right_tank = restored_tank(&mut assembly, Some("LFO"), Some(right));

    assert!(!controller.on_attached(&mut assembly, left));
    // Counterparts are only visited when the attached subtree had a switch.
    assert_eq!(assembly.resources(right_tank).unwrap().len(), 3);
}
