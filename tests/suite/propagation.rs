//! Symmetry counterparts follow the part that was switched.

use fuelswitch_core::{ObservedEvent, RecordingObserver, SwitchController, SwitchOutcome};
use fuelswitch_types::{CurrentSelection, SelectionId};

use crate::common::{contents, entry, registry, symmetric_tanks};

#[test]
fn counterparts_take_the_same_selection() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("fuelTank", 3);
    for &tank in &tanks {
        controller.on_created(&mut assembly, tank);
    }

    let outcome = controller.on_switch_requested(&mut assembly, tanks[1]);
    assert!(matches!(
        outcome,
        SwitchOutcome::Switched {
            counterparts: 2,
            ..
        }
    ));
    for &tank in &tanks {
        assert!(assembly.engine(tank).unwrap().current().is("LFO"));
        assert_eq!(
            contents(&assembly, tank),
            vec![entry("LiquidFuel", 50.0, 50.0), entry("Oxidizer", 50.0, 50.0)]
        );
    }
}

#[test]
fn only_the_primary_is_notified() {
    let registry = registry();
    let mut controller = SwitchController::with_observer(&registry, RecordingObserver::default());
    let (mut assembly, _, tanks) = symmetric_tanks("fuelTank", 2);
    for &tank in &tanks {
        controller.on_created(&mut assembly, tank);
    }
    controller.observer_mut().take();

    controller.on_switch_requested(&mut assembly, tanks[0]);
    assert_eq!(
        controller.observer().events(),
        [
            ObservedEvent::Label(tanks[0], "Fuel: LF + Ox".to_string()),
            ObservedEvent::Modified(tanks[0]),
        ]
    );
    // The counterpart's label still reflects the new selection.
    assert_eq!(
        controller.current_label(&mut assembly, tanks[1]).as_deref(),
        Some("Fuel: LF + Ox")
    );
}

#[test]
fn counterparts_never_created_are_brought_along() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("fuelTank", 2);
    controller.on_created(&mut assembly, tanks[0]);

    controller.on_switch_requested(&mut assembly, tanks[0]);
    let follower = assembly.engine(tanks[1]).unwrap();
    assert!(follower.current().is("LFO"));
    assert_eq!(
        contents(&assembly, tanks[1]),
        vec![entry("LiquidFuel", 50.0, 50.0), entry("Oxidizer", 50.0, 50.0)]
    );
}

#[test]
fn propagation_does_not_bounce_back() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("cargoBay", 4);
    for &tank in &tanks {
        controller.on_created(&mut assembly, tank);
    }

    // A single press advances every part exactly one step.
    let outcome = controller.on_switch_requested(&mut assembly, tanks[2]);
    assert_eq!(
        outcome,
        SwitchOutcome::Switched {
            from: CurrentSelection::from_persisted(Some("Ore")),
            to: SelectionId::new("Empty").unwrap(),
            counterparts: 3,
        }
    );
    for &tank in &tanks {
        assert!(assembly.engine(tank).unwrap().current().is("Empty"));
        assert!(contents(&assembly, tank).is_empty());
    }
}

#[test]
fn variant_switch_propagates_too() {
    let registry = registry();
    let mut controller = SwitchController::new(&registry);
    let (mut assembly, _, tanks) = symmetric_tanks("paintedTank", 2);
    for &tank in &tanks {
        controller.on_created(&mut assembly, tank);
    }

    let outcome = controller.on_variant_applied(&mut assembly, tanks[0], "Orange");
    assert!(matches!(
        outcome,
        SwitchOutcome::Switched {
            counterparts: 1,
            ..
        }
    ));
    assert_eq!(
        contents(&assembly, tanks[1]),
        vec![entry("LiquidFuel", 45.0, 45.0), entry("Oxidizer", 55.0, 55.0)]
    );
}
