mod common;

use airframe_builder::*;
use common::{Call, ScriptedEngine};
use engine_bridge::reference::{DESIGN, WING_GEOM, XFORM};
use engine_bridge::*;
use proptest::prelude::*;

fn applier() -> ConfigApplier {
    ConfigApplier::from_config(&BuildConfig::default())
}

#[test]
fn unknown_parameter_returns_failure_and_records_it() {
    let mut engine = ReferenceEngine::new();
    let wing = engine.create_entity(PrimitiveKind::Wing).unwrap();
    let mut applier = applier();

    let result = applier.apply_value(&mut engine, "main_wing", wing, "Wingspan", WING_GEOM, 35.8);

    assert!(matches!(result, Err(AssignmentError::ParameterNotFound { .. })));
    let report = applier.report();
    assert_eq!(report.assignments().len(), 1);
    assert_eq!(report.failed_count(), 1);
    let failed = report.failures().next().unwrap();
    assert_eq!(failed.assignment.parameter_name(), "Wingspan");
    assert_eq!(failed.component, "main_wing");
}

#[test]
fn failure_does_not_stop_the_next_assignment() {
    let mut engine = ReferenceEngine::new();
    let fuse = engine.create_entity(PrimitiveKind::Fuselage).unwrap();
    let mut applier = applier();

    assert!(applier
        .apply_value(&mut engine, "fuselage", fuse, "Max_Diameter", DESIGN, 5.2)
        .is_err());
    assert!(applier
        .apply_value(&mut engine, "fuselage", fuse, "Length", DESIGN, 39.5)
        .is_ok());

    assert_eq!(engine.get_parameter(fuse, "Length", DESIGN).unwrap(), 39.5);
    assert_eq!(applier.report().succeeded_count(), 1);
    assert_eq!(applier.report().failed_count(), 1);
}

#[test]
fn repeated_assignment_keeps_the_last_value() {
    let mut engine = ReferenceEngine::new();
    let pod = engine.create_entity(PrimitiveKind::Pod).unwrap();
    let mut applier = applier();

    let first = ParameterAssignment::new(pod, "Length", DESIGN, 3.4);
    assert!(applier.apply(&mut engine, "pod", first.clone()).is_ok());
    assert!(applier.apply(&mut engine, "pod", first).is_ok());
    assert_eq!(engine.get_parameter(pod, "Length", DESIGN).unwrap(), 3.4);

    assert!(applier.apply_value(&mut engine, "pod", pod, "Length", DESIGN, 4.0).is_ok());
    assert_eq!(engine.get_parameter(pod, "Length", DESIGN).unwrap(), 4.0);
    assert_eq!(applier.report().succeeded_count(), 3);
}

#[test]
fn wrong_group_hints_at_the_right_one() {
    let mut engine = ReferenceEngine::new();
    let fuse = engine.create_entity(PrimitiveKind::Fuselage).unwrap();
    let mut applier = applier();

    let err = applier
        .apply_value(&mut engine, "fuselage", fuse, "Length", XFORM, 39.5)
        .unwrap_err();

    assert!(matches!(err, AssignmentError::ParameterNotFound { .. }));
    assert_eq!(err.hints(), ["Design".to_string()]);
}

#[test]
fn unknown_group_is_classified() {
    let mut engine = ReferenceEngine::new();
    let wing = engine.create_entity(PrimitiveKind::Wing).unwrap();
    let mut applier = applier();

    let err = applier
        .apply_value(&mut engine, "main_wing", wing, "Root_Chord", "XSec_0", 6.5)
        .unwrap_err();
    assert!(matches!(err, AssignmentError::GroupNotFound { .. }));
    assert_eq!(err.hints(), ["XSec_1".to_string()]);
}

#[test]
fn out_of_range_value_is_an_engine_rejection() {
    let mut engine = ReferenceEngine::new();
    let wing = engine.create_entity(PrimitiveKind::Wing).unwrap();
    let mut applier = applier();

    let err = applier
        .apply_value(&mut engine, "main_wing", wing, "Dihedral", WING_GEOM, 400.0)
        .unwrap_err();
    assert!(matches!(err, AssignmentError::EngineRejected { .. }));
    assert!(err.hints().is_empty());
}

#[test]
fn stale_handle_is_an_engine_rejection() {
    let mut engine = ReferenceEngine::new();
    let wing = engine.create_entity(PrimitiveKind::Wing).unwrap();
    engine.clear_model().unwrap();
    let mut applier = applier();

    let err = applier
        .apply_value(&mut engine, "main_wing", wing, "TotalSpan", WING_GEOM, 10.0)
        .unwrap_err();
    assert!(matches!(err, AssignmentError::EngineRejected { .. }));
}

#[test]
fn unavailable_engine_skips_the_group_lookup() {
    let mut engine = ScriptedEngine::new();
    let wing = engine.create_entity(PrimitiveKind::Wing).unwrap();
    engine.drop_connection_on.insert("TotalSpan".into());
    let mut applier = applier();

    let err = applier
        .apply_value(&mut engine, "main_wing", wing, "TotalSpan", WING_GEOM, 35.8)
        .unwrap_err();

    assert!(matches!(err, AssignmentError::EngineUnavailable { .. }));
    assert!(!engine.calls().iter().any(|c| matches!(c, Call::Find { .. })));
}

#[test]
fn lookup_errors_are_suppressed() {
    let mut engine = ScriptedEngine::new();
    let fuse = engine.create_entity(PrimitiveKind::Fuselage).unwrap();
    let mut applier = ConfigApplier::new(false, vec!["Design".into(), "Nonexistent".into()]);

    let err = applier
        .apply_value(&mut engine, "fuselage", fuse, "Radius", DESIGN, 2.6)
        .unwrap_err();

    assert!(err.hints().is_empty());
    let finds: Vec<_> = engine
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Find { .. }))
        .collect();
    // The group that already failed is not searched again.
    assert_eq!(
        finds,
        vec![Call::Find {
            name: "Radius".into(),
            group: "Nonexistent".into(),
        }]
    );
}

proptest! {
    #[test]
    fn every_assignment_is_attempted(valid in prop::collection::vec(any::<bool>(), 1..30)) {
        let mut engine = ScriptedEngine::new();
        let pod = engine.create_entity(PrimitiveKind::Pod).unwrap();
        let mut applier = ConfigApplier::new(false, Vec::new());

        for (i, ok) in valid.iter().enumerate() {
            let name = if *ok { "Length" } else { "Not_A_Parameter" };
            let value = 1.0 + i as f64;
            let result = applier.apply_value(&mut engine, "pod", pod, name, DESIGN, value);
            prop_assert_eq!(result.is_ok(), *ok);
        }

        let sets = engine
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Set { .. }))
            .count();
        prop_assert_eq!(sets, valid.len());
        prop_assert_eq!(applier.report().assignments().len(), valid.len());
        prop_assert_eq!(
            applier.report().failed_count(),
            valid.iter().filter(|ok| !**ok).count()
        );

        if let Some(last_ok) = valid.iter().rposition(|ok| *ok) {
            let stored = engine.get_parameter(pod, "Length", DESIGN).unwrap();
            prop_assert_eq!(stored, 1.0 + last_ok as f64);
        }
    }
}
