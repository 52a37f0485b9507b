use std::fmt;
use std::path::{Path, PathBuf};

use airframe_types::EntityKind;
use engine_bridge::{EngineError, EntityHandle};
use tracing::{info, warn};

use crate::applier::{AssignmentError, AssignmentResult, ParameterAssignment};

/// One attempted parameter assignment and how it went.
#[derive(Debug, Clone)]
pub struct AssignmentRecord {
    /// Name of the component the assignment belongs to.
    pub component: String,
    pub assignment: ParameterAssignment,
    pub outcome: AssignmentResult,
}

impl AssignmentRecord {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&AssignmentError> {
        self.outcome.as_ref().err()
    }
}

/// An entity created during the build.
#[derive(Debug, Clone)]
pub struct CreatedEntity {
    pub component: String,
    pub kind: EntityKind,
    pub handle: EntityHandle,
}

/// The two artifacts a build exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportArtifact {
    /// Native persisted model.
    Model,
    /// Triangulated surface mesh.
    Mesh,
}

impl fmt::Display for ExportArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportArtifact::Model => f.write_str("model file"),
            ExportArtifact::Mesh => f.write_str("surface mesh"),
        }
    }
}

/// One export request and how it went.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    pub artifact: ExportArtifact,
    pub path: PathBuf,
    pub outcome: Result<(), EngineError>,
}

/// Accumulated outcome of a build run. Failures are data here, never
/// control flow.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub engine_version: String,
    entities: Vec<CreatedEntity>,
    assignments: Vec<AssignmentRecord>,
    exports: Vec<ExportRecord>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_entity(&mut self, entity: CreatedEntity) {
        self.entities.push(entity);
    }

    pub fn record_assignment(&mut self, record: AssignmentRecord) {
        self.assignments.push(record);
    }

    pub fn record_export(&mut self, record: ExportRecord) {
        self.exports.push(record);
    }

    pub fn entities(&self) -> &[CreatedEntity] {
        &self.entities
    }

    /// Handle of the entity created for a component.
    pub fn entity(&self, component: &str) -> Option<EntityHandle> {
        self.entities
            .iter()
            .find(|e| e.component == component)
            .map(|e| e.handle)
    }

    pub fn assignments(&self) -> &[AssignmentRecord] {
        &self.assignments
    }

    pub fn exports(&self) -> &[ExportRecord] {
        &self.exports
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssignmentRecord> {
        self.assignments.iter().filter(|r| !r.succeeded())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn succeeded_count(&self) -> usize {
        self.assignments.len() - self.failed_count()
    }

    /// No failed assignment and no failed export.
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0 && self.exports.iter().all(|e| e.outcome.is_ok())
    }

    /// Path of an artifact that was exported successfully.
    pub fn exported(&self, artifact: ExportArtifact) -> Option<&Path> {
        self.exports
            .iter()
            .find(|e| e.artifact == artifact && e.outcome.is_ok())
            .map(|e| e.path.as_path())
    }

    /// Log a one-line summary plus one warning per failure.
    pub fn log_summary(&self) {
        info!(
            entities = self.entities.len(),
            applied = self.succeeded_count(),
            failed = self.failed_count(),
            "build finished"
        );
        for record in self.failures() {
            if let Some(err) = record.error() {
                warn!(
                    component = %record.component,
                    group = %record.assignment.group_name(),
                    parameter = %record.assignment.parameter_name(),
                    "{err}"
                );
            }
        }
        for export in self.exports.iter().filter(|e| e.outcome.is_err()) {
            if let Err(err) = &export.outcome {
                warn!(artifact = %export.artifact, path = %export.path.display(), "{err}");
            }
        }
        if !self.is_clean() {
            warn!("check the geometry in the engine and compare parameter names against its parameter tree");
        }
    }
}
