use approx::assert_relative_eq;
use engine_bridge::model_file::{ModelFile, MODEL_FORMAT};
use engine_bridge::reference::{DESIGN, SYM, WING_GEOM, XFORM, XSEC_1};
use engine_bridge::*;

fn engine_with_wing() -> (ReferenceEngine, EntityHandle) {
    let mut engine = ReferenceEngine::new();
    let wing = engine.create_entity(PrimitiveKind::Wing).unwrap();
    (engine, wing)
}

#[test]
fn new_entity_starts_with_catalog_defaults() {
    let (engine, wing) = engine_with_wing();
    assert_eq!(engine.get_parameter(wing, "TotalSpan", WING_GEOM).unwrap(), 10.0);
    assert_eq!(engine.get_parameter(wing, "Sym_Planar_Flag", SYM).unwrap(), 1.0);
    assert_eq!(engine.get_parameter(wing, "X_Rel_Location", XFORM).unwrap(), 0.0);
}

#[test]
fn set_parameter_updates_value() {
    let (mut engine, wing) = engine_with_wing();
    engine.set_parameter(wing, "TotalSpan", WING_GEOM, 35.8).unwrap();
    assert_eq!(engine.get_parameter(wing, "TotalSpan", WING_GEOM).unwrap(), 35.8);
    assert!(engine.is_dirty());
}

#[test]
fn unknown_parameter_is_reported_by_name() {
    let (mut engine, wing) = engine_with_wing();
    let err = engine.set_parameter(wing, "Wingspan", WING_GEOM, 1.0).unwrap_err();
    match err {
        EngineError::ParameterNotFound { name, group, .. } => {
            assert_eq!(name, "Wingspan");
            assert_eq!(group, WING_GEOM);
        }
        other => panic!("expected ParameterNotFound, got {other:?}"),
    }
}

#[test]
fn unknown_group_is_reported() {
    let (mut engine, wing) = engine_with_wing();
    let err = engine.set_parameter(wing, "TotalSpan", "Planform", 1.0).unwrap_err();
    assert!(matches!(err, EngineError::GroupNotFound { ref group, .. } if group == "Planform"));
}

#[test]
fn out_of_range_value_is_rejected_and_not_stored() {
    let (mut engine, wing) = engine_with_wing();
    let err = engine.set_parameter(wing, "Sweep_LE", WING_GEOM, 120.0).unwrap_err();
    assert!(matches!(err, EngineError::ValueOutOfRange { max, .. } if max == 85.0));
    assert_eq!(engine.get_parameter(wing, "Sweep_LE", WING_GEOM).unwrap(), 0.0);

    let err = engine.set_parameter(wing, "Sweep_LE", WING_GEOM, f64::NAN).unwrap_err();
    assert!(matches!(err, EngineError::ValueOutOfRange { .. }));
}

#[test]
fn parameters_are_scoped_to_their_primitive() {
    let mut engine = ReferenceEngine::new();
    let pod = engine.create_entity(PrimitiveKind::Pod).unwrap();
    assert!(engine.find_parameter(pod, "Radius", DESIGN).is_ok());
    assert!(matches!(
        engine.find_parameter(pod, "Root_Chord", XSEC_1),
        Err(EngineError::GroupNotFound { .. })
    ));
}

#[test]
fn clear_model_invalidates_handles() {
    let (mut engine, wing) = engine_with_wing();
    engine.clear_model().unwrap();
    assert_eq!(engine.entity_count(), 0);
    assert!(matches!(
        engine.set_parameter(wing, "TotalSpan", WING_GEOM, 5.0),
        Err(EngineError::EntityNotFound { .. })
    ));

    let fresh = engine.create_entity(PrimitiveKind::Wing).unwrap();
    assert_ne!(fresh, wing);
    engine.clear_model().unwrap();
    engine.clear_model().unwrap();
}

#[test]
fn mesh_export_requires_recompute() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wing.stl");
    let (mut engine, _wing) = engine_with_wing();

    let err = engine
        .export_mesh(&path, &ExportSelection::All, MeshFormat::AsciiStl)
        .unwrap_err();
    assert!(matches!(err, EngineError::ExportFailed { .. }));
    assert!(!path.exists());

    engine.recompute().unwrap();
    engine
        .export_mesh(&path, &ExportSelection::All, MeshFormat::AsciiStl)
        .unwrap();
    let mesh = mesh_io::load_mesh(&path).unwrap();
    // Symmetric wing: two slabs of 12 triangles.
    assert_eq!(mesh.len(), 24);
}

#[test]
fn recompute_applies_placement() {
    let mut engine = ReferenceEngine::new();
    let pod = engine.create_entity(PrimitiveKind::Pod).unwrap();
    engine.set_parameter(pod, "Length", DESIGN, 3.0).unwrap();
    engine.set_parameter(pod, "Radius", DESIGN, 1.0).unwrap();
    engine.set_parameter(pod, "X_Rel_Location", XFORM, 12.0).unwrap();
    engine.set_parameter(pod, "Y_Rel_Location", XFORM, -8.0).unwrap();
    engine.recompute().unwrap();

    let (lo, hi) = engine.surface(pod).unwrap().bounds().unwrap();
    assert_relative_eq!(lo.x, 12.0, epsilon = 1e-9);
    assert_relative_eq!(hi.x, 15.0, epsilon = 1e-9);
    assert_relative_eq!(lo.y, -9.0, epsilon = 1e-9);
    assert_relative_eq!(hi.y, -7.0, epsilon = 1e-9);
}

#[test]
fn rotation_about_x_stands_a_wing_up() {
    let (mut engine, wing) = engine_with_wing();
    engine.set_parameter(wing, "TotalSpan", WING_GEOM, 7.7).unwrap();
    engine.set_parameter(wing, "Sym_Planar_Flag", SYM, 0.0).unwrap();
    engine.set_parameter(wing, "X_Rel_Rotation", XFORM, 90.0).unwrap();
    engine.recompute().unwrap();

    let (lo, hi) = engine.surface(wing).unwrap().bounds().unwrap();
    assert_relative_eq!(hi.z, 7.7, epsilon = 1e-9);
    assert!(lo.z > -0.5, "single panel should not extend below the root");
    assert!(hi.y - lo.y < 0.5, "rotated panel should be thin in Y");
}

#[test]
fn selection_with_stale_handle_fails_export() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, wing) = engine_with_wing();
    engine.clear_model().unwrap();
    engine.recompute().unwrap();
    let err = engine
        .write_model_file(&dir.path().join("m.json"), &ExportSelection::Entities(vec![wing]))
        .unwrap_err();
    assert!(matches!(err, EngineError::ExportFailed { .. }));
}

#[test]
fn model_file_round_trips_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plane.vsp3");
    let mut engine = ReferenceEngine::new();
    let fuse = engine.create_entity(PrimitiveKind::Fuselage).unwrap();
    engine.set_parameter(fuse, "Length", DESIGN, 39.5).unwrap();
    engine.create_entity(PrimitiveKind::Pod).unwrap();

    engine.write_model_file(&path, &ExportSelection::All).unwrap();

    let file = ModelFile::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(file.format, MODEL_FORMAT);
    assert_eq!(file.metadata.name, "plane");
    assert_eq!(file.entities.len(), 2);
    assert_eq!(file.entities[0].kind, PrimitiveKind::Fuselage);
    assert_eq!(file.entities[0].parameters[DESIGN]["Length"], 39.5);
    assert_eq!(file.entities[1].kind, PrimitiveKind::Pod);
}

#[test]
fn custom_catalog_can_drop_a_parameter() {
    let catalog =
        ParameterCatalog::reference().without_parameter(PrimitiveKind::Fuselage, DESIGN, "Max_Radius");
    let mut engine = ReferenceEngine::with_catalog(catalog);
    let fuse = engine.create_entity(PrimitiveKind::Fuselage).unwrap();
    assert!(matches!(
        engine.set_parameter(fuse, "Max_Radius", DESIGN, 2.6),
        Err(EngineError::ParameterNotFound { .. })
    ));
    assert!(engine.set_parameter(fuse, "Length", DESIGN, 39.5).is_ok());
}
