use std::path::Path;

use crate::types::*;

/// Parametric geometry engine. Holds one mutable model per instance.
///
/// Implemented by `ReferenceEngine` (in-process, deterministic) and by any
/// binding to an external engine. Calls are blocking round-trips; the model
/// has no transaction isolation, so parameter writes land one at a time and
/// stay applied even if a later write fails.
pub trait GeometryEngine {
    /// Engine name and version. Fails with `Unavailable` when the engine
    /// cannot be reached.
    fn version(&self) -> Result<String, EngineError>;

    /// Remove every entity from the model. Idempotent.
    fn clear_model(&mut self) -> Result<(), EngineError>;

    /// Create a new entity of the given primitive kind with default parameters.
    fn create_entity(&mut self, kind: PrimitiveKind) -> Result<EntityHandle, EngineError>;

    /// Set one named parameter in one group of an entity.
    fn set_parameter(
        &mut self,
        entity: EntityHandle,
        name: &str,
        group: &str,
        value: f64,
    ) -> Result<(), EngineError>;

    /// Read back one named parameter.
    fn get_parameter(&self, entity: EntityHandle, name: &str, group: &str)
        -> Result<f64, EngineError>;

    /// Look up a parameter without touching it.
    fn find_parameter(
        &self,
        entity: EntityHandle,
        name: &str,
        group: &str,
    ) -> Result<ParameterHandle, EngineError>;

    /// Solve the whole model against its current parameters.
    fn recompute(&mut self) -> Result<(), EngineError>;

    /// Persist the model in the engine's native format.
    fn write_model_file(&mut self, path: &Path, selection: &ExportSelection)
        -> Result<(), EngineError>;

    /// Write the solved surfaces as a triangulated mesh.
    fn export_mesh(
        &mut self,
        path: &Path,
        selection: &ExportSelection,
        format: MeshFormat,
    ) -> Result<(), EngineError>;
}
