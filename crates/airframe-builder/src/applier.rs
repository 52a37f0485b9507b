use engine_bridge::{EngineError, EntityHandle, GeometryEngine};
use tracing::{info, warn};

use crate::config::BuildConfig;
use crate::report::{AssignmentRecord, BuildReport};

/// One value destined for one named parameter of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterAssignment {
    entity: EntityHandle,
    parameter_name: String,
    group_name: String,
    value: f64,
}

impl ParameterAssignment {
    pub fn new(
        entity: EntityHandle,
        parameter_name: impl Into<String>,
        group_name: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            entity,
            parameter_name: parameter_name.into(),
            group_name: group_name.into(),
            value,
        }
    }

    pub fn entity(&self) -> EntityHandle {
        self.entity
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Why an assignment did not land. `hints` lists other groups where the
/// engine reported a parameter of the same name.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssignmentError {
    #[error("parameter not found: {detail}")]
    ParameterNotFound { detail: String, hints: Vec<String> },

    #[error("group not found: {detail}")]
    GroupNotFound { detail: String, hints: Vec<String> },

    #[error("rejected by engine: {detail}")]
    EngineRejected { detail: String, hints: Vec<String> },

    #[error("engine unavailable: {detail}")]
    EngineUnavailable { detail: String },
}

impl AssignmentError {
    fn from_engine(err: &EngineError) -> Self {
        let detail = err.to_string();
        match err {
            EngineError::ParameterNotFound { .. } => AssignmentError::ParameterNotFound {
                detail,
                hints: Vec::new(),
            },
            EngineError::GroupNotFound { .. } => AssignmentError::GroupNotFound {
                detail,
                hints: Vec::new(),
            },
            EngineError::Unavailable { .. } => AssignmentError::EngineUnavailable { detail },
            _ => AssignmentError::EngineRejected {
                detail,
                hints: Vec::new(),
            },
        }
    }

    pub fn hints(&self) -> &[String] {
        match self {
            AssignmentError::ParameterNotFound { hints, .. }
            | AssignmentError::GroupNotFound { hints, .. }
            | AssignmentError::EngineRejected { hints, .. } => hints,
            AssignmentError::EngineUnavailable { .. } => &[],
        }
    }

    fn set_hints(&mut self, found: Vec<String>) {
        match self {
            AssignmentError::ParameterNotFound { hints, .. }
            | AssignmentError::GroupNotFound { hints, .. }
            | AssignmentError::EngineRejected { hints, .. } => *hints = found,
            AssignmentError::EngineUnavailable { .. } => {}
        }
    }
}

pub type AssignmentResult = Result<(), AssignmentError>;

/// Applies parameter assignments one at a time, converting every engine
/// failure into a report entry instead of stopping.
#[derive(Debug, Clone)]
pub struct ConfigApplier {
    verbose: bool,
    hint_groups: Vec<String>,
    report: BuildReport,
}

impl ConfigApplier {
    pub fn new(verbose: bool, hint_groups: Vec<String>) -> Self {
        Self {
            verbose,
            hint_groups,
            report: BuildReport::new(),
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.verbose, config.hint_groups.clone())
    }

    /// Apply one assignment. The outcome is returned and also recorded in
    /// the report; a failure never escapes as anything but this value.
    pub fn apply(
        &mut self,
        engine: &mut dyn GeometryEngine,
        component: &str,
        assignment: ParameterAssignment,
    ) -> AssignmentResult {
        let outcome = match engine.set_parameter(
            assignment.entity,
            &assignment.parameter_name,
            &assignment.group_name,
            assignment.value,
        ) {
            Ok(()) => {
                if self.verbose {
                    info!(
                        entity = %assignment.entity,
                        component,
                        group = %assignment.group_name,
                        parameter = %assignment.parameter_name,
                        value = assignment.value,
                        "parameter set"
                    );
                }
                Ok(())
            }
            Err(err) => Err(self.diagnose(&*engine, component, &assignment, &err)),
        };

        self.report.record_assignment(AssignmentRecord {
            component: component.to_string(),
            assignment,
            outcome: outcome.clone(),
        });
        outcome
    }

    /// Build the assignment value in place and apply it.
    pub fn apply_value(
        &mut self,
        engine: &mut dyn GeometryEngine,
        component: &str,
        entity: EntityHandle,
        parameter_name: &str,
        group_name: &str,
        value: f64,
    ) -> AssignmentResult {
        let assignment = ParameterAssignment::new(entity, parameter_name, group_name, value);
        self.apply(engine, component, assignment)
    }

    fn diagnose(
        &self,
        engine: &dyn GeometryEngine,
        component: &str,
        assignment: &ParameterAssignment,
        err: &EngineError,
    ) -> AssignmentError {
        warn!(
            entity = %assignment.entity,
            component,
            group = %assignment.group_name,
            parameter = %assignment.parameter_name,
            "could not set parameter: {err}"
        );

        let mut failure = AssignmentError::from_engine(err);
        if matches!(failure, AssignmentError::EngineUnavailable { .. }) {
            return failure;
        }

        let found = self.candidate_groups(engine, assignment);
        if found.is_empty() {
            info!(
                parameter = %assignment.parameter_name,
                "no candidate group holds this parameter; inspect the entity's parameter tree in the engine for the exact name"
            );
        } else {
            warn!(
                parameter = %assignment.parameter_name,
                candidates = ?found,
                "parameter exists under a different group"
            );
        }
        failure.set_hints(found);
        failure
    }

    /// Best-effort lookup of the parameter under each candidate group.
    /// Lookup errors are ignored: this only feeds the diagnostic.
    fn candidate_groups(&self, engine: &dyn GeometryEngine, assignment: &ParameterAssignment) -> Vec<String> {
        self.hint_groups
            .iter()
            .filter(|g| **g != assignment.group_name)
            .filter(|g| {
                engine
                    .find_parameter(assignment.entity, &assignment.parameter_name, g)
                    .is_ok()
            })
            .cloned()
            .collect()
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub(crate) fn report_mut(&mut self) -> &mut BuildReport {
        &mut self.report
    }

    pub fn into_report(self) -> BuildReport {
        self.report
    }
}
