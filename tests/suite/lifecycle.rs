//! Spawn, manual switching, labels and notifications.

use fuelswitch_core::{
    Assembly, EnginePhase, ObservedEvent, RecordingObserver, StoredContent, SwitchController,
    SwitchOutcome,
};
use fuelswitch_types::{CurrentSelection, SelectionId};

use crate::common::{contents, container_type, entry, registry, symmetric_tanks};

#[test]
fn spawn_then_switch_round_trip() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("fuelTank", 1);
    let tank = tanks[0];

    assert_eq!(
        controller.on_created(&mut assembly, tank),
        SwitchOutcome::Initialized(SelectionId::new("LF").unwrap())
    );
    assert_eq!(contents(&assembly, tank), vec![entry("LiquidFuel", 100.0, 100.0)]);

    let outcome = controller.on_switch_requested(&mut assembly, tank);
    assert!(matches!(outcome, SwitchOutcome::Switched { ref to, .. } if *to == "LFO"));
    assert_eq!(
        contents(&assembly, tank),
        vec![entry("LiquidFuel", 50.0, 50.0), entry("Oxidizer", 50.0, 50.0)]
    );

    controller.on_switch_requested(&mut assembly, tank);
    assert_eq!(contents(&assembly, tank), vec![entry("LiquidFuel", 100.0, 100.0)]);
    assert!(assembly.engine(tank).unwrap().current().is("LF"));
}

#[test]
fn three_way_cycle_follows_declaration_order() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("cargoBay", 1);
    let bay = tanks[0];
    controller.on_created(&mut assembly, bay);

    let mut seen = Vec::new();
    for _ in 0..4 {
        controller.on_switch_requested(&mut assembly, bay);
        let current = assembly.engine(bay).unwrap().current().to_string();
        seen.push(current);
    }
    assert_eq!(seen, vec!["Empty", "Xenon", "Ore", "Empty"]);
}

#[test]
fn empty_selection_clears_container() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("cargoBay", 1);
    let bay = tanks[0];
    controller.on_created(&mut assembly, bay);
    assert_eq!(contents(&assembly, bay), vec![entry("Ore", 0.0, 300.0)]);

    controller.on_switch_requested(&mut assembly, bay);
    assert!(contents(&assembly, bay).is_empty());
    assert_eq!(
        controller.current_label(&mut assembly, bay).as_deref(),
        Some("Cargo: Nothing")
    );
}

#[test]
fn flags_reach_the_container() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("cargoBay", 1);
    let bay = tanks[0];
    controller.on_created(&mut assembly, bay);
    let target = SelectionId::new("Xenon").unwrap();
    controller.switch_to(&mut assembly, bay, &target);

    let xenon = assembly.resources(bay).unwrap().get("XenonGas").unwrap();
    assert_eq!(xenon.flags.get("flow_state").map(String::as_str), Some("false"));
}

#[test]
fn switching_an_unresolved_part_selects_the_default() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("fuelTank", 1);
    let tank = tanks[0];

    let outcome = controller.on_switch_requested(&mut assembly, tank);
    assert_eq!(
        outcome,
        SwitchOutcome::Switched {
            from: CurrentSelection::Unresolved,
            to: SelectionId::new("LF").unwrap(),
            counterparts: 0,
        }
    );
    assert_eq!(contents(&assembly, tank), vec![entry("LiquidFuel", 100.0, 100.0)]);
}

#[test]
fn engine_phases_follow_events() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("fuelTank", 1);
    let tank = tanks[0];
    assert_eq!(assembly.engine(tank).unwrap().phase(), EnginePhase::Uninitialized);

    assert_eq!(controller.on_started(&mut assembly, tank), Some(true));
    assert_eq!(assembly.engine(tank).unwrap().phase(), EnginePhase::Resolved);

    controller.on_created(&mut assembly, tank);
    assert_eq!(assembly.engine(tank).unwrap().phase(), EnginePhase::Selected);
}

#[test]
fn switch_notifies_label_then_modified() {
    let registry = registry();
    let mut controller = SwitchController::with_observer(&registry, RecordingObserver::default());
    let (mut assembly, _, tanks) = symmetric_tanks("fuelTank", 1);
    let tank = tanks[0];

    controller.on_created(&mut assembly, tank);
    assert_eq!(
        controller.observer_mut().take(),
        vec![ObservedEvent::Label(tank, "Fuel: Liquid Fuel".to_string())]
    );

    controller.on_switch_requested(&mut assembly, tank);
    assert_eq!(
        controller.observer().events(),
        [
            ObservedEvent::Label(tank, "Fuel: LF + Ox".to_string()),
            ObservedEvent::Modified(tank),
        ]
    );
}

#[test]
fn variant_driven_catalog_hides_manual_switch() {
    let registry = registry();
    let mut controller = SwitchController::with_observer(&registry, RecordingObserver::default());
    let (mut assembly, _, tanks) = symmetric_tanks("paintedTank", 1);
    let tank = tanks[0];

    assert_eq!(controller.on_started(&mut assembly, tank), Some(false));
    assert_eq!(
        controller.observer().events(),
        [ObservedEvent::Visibility(tank, false)]
    );
}

#[test]
fn missing_catalog_leaves_contents_untouched() {
    let registry = registry();
    let mut controller = SwitchController::with_observer(&registry, RecordingObserver::default());
    let mut assembly = Assembly::new();
    let probe = assembly.add_restored(
        "probe",
        container_type("probeCore"),
        CurrentSelection::Unresolved,
        vec![StoredContent::new("ElectricCharge", 10.0, 10.0)],
        None,
    );

    assert_eq!(controller.on_created(&mut assembly, probe), SwitchOutcome::Unavailable);
    assert_eq!(
        controller.on_switch_requested(&mut assembly, probe),
        SwitchOutcome::Unavailable
    );
    assert_eq!(
        contents(&assembly, probe),
        vec![entry("ElectricCharge", 10.0, 10.0)]
    );
    assert!(controller.observer().events().is_empty());
    assert!(controller.current_label(&mut assembly, probe).is_none());
}

#[test]
fn plain_parts_are_ignored() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let mut assembly = Assembly::new();
    let strut = assembly.add_part("strut", None);
    assert_eq!(
        controller.on_switch_requested(&mut assembly, strut),
        SwitchOutcome::NotSwitchable
    );
    assert_eq!(controller.on_started(&mut assembly, strut), None);
}

#[test]
fn persisted_selection_survives_save_and_load() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("fuelTank", 1);
    let tank = tanks[0];
    controller.on_created(&mut assembly, tank);
    controller.on_switch_requested(&mut assembly, tank);

    let saved = serde_json::to_string(assembly.engine(tank).unwrap().current()).unwrap();
    assert_eq!(saved, "\"LFO\"");

    let current: CurrentSelection = serde_json::from_str(&saved).unwrap();
    let mut restored = Assembly::new();
    let copy = restored.add_restored(
        "tank",
        container_type("fuelTank"),
        current,
        assembly.resources(tank).unwrap().entries().to_vec(),
        None,
    );
    let report = controller.on_loaded(&mut restored);
    assert!(report.sanitized.is_empty());
    assert_eq!(contents(&restored, copy), contents(&assembly, tank));
}

#[test]
fn unresolved_selection_saves_as_null() {
    let saved = serde_json::to_string(&CurrentSelection::Unresolved).unwrap();
    assert_eq!(saved, "null");
}
