use std::path::PathBuf;

use engine_bridge::{EngineError, GeometryEngine};
use tracing::{info, instrument, warn};

use crate::applier::{ConfigApplier, ParameterAssignment};
use crate::config::{BuildConfig, MESH_FORMAT};
use crate::layout::AirframeLayout;
use crate::report::{BuildReport, CreatedEntity, ExportArtifact, ExportRecord};

/// Failures that stop a build. Parameter and export failures never do;
/// they end up in the `BuildReport`.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("geometry engine unavailable: {source}")]
    EngineUnavailable {
        #[source]
        source: EngineError,
    },

    #[error("could not create {component}: {source}")]
    EntityCreation {
        component: String,
        #[source]
        source: EngineError,
    },

    #[error("model recompute failed: {source}")]
    Recompute {
        #[source]
        source: EngineError,
    },
}

/// Declares the airframe in the engine and exports it.
#[derive(Debug, Clone)]
pub struct GeometryBuilder {
    layout: AirframeLayout,
    config: BuildConfig,
}

impl GeometryBuilder {
    /// Builder for the reference airframe.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_layout(AirframeLayout::reference(), config)
    }

    pub fn with_layout(layout: AirframeLayout, config: BuildConfig) -> Self {
        Self { layout, config }
    }

    pub fn layout(&self) -> &AirframeLayout {
        &self.layout
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the whole build: clear, create and parameterize every component,
    /// recompute once, then export the model and the mesh.
    #[instrument(skip_all)]
    pub fn build(&self, engine: &mut dyn GeometryEngine) -> Result<BuildReport, BuildError> {
        let version = engine
            .version()
            .map_err(|source| BuildError::EngineUnavailable { source })?;
        info!(%version, "engine ready");
        engine
            .clear_model()
            .map_err(|source| BuildError::EngineUnavailable { source })?;

        let mut applier = ConfigApplier::from_config(&self.config);
        applier.report_mut().engine_version = version;

        for component in &self.layout.components {
            let handle = engine
                .create_entity(component.kind.primitive())
                .map_err(|source| BuildError::EntityCreation {
                    component: component.name.clone(),
                    source,
                })?;
            info!(component = %component.name, %handle, kind = %component.kind, "entity created");
            applier.report_mut().record_entity(CreatedEntity {
                component: component.name.clone(),
                kind: component.kind,
                handle,
            });

            for &(key, value) in &component.parameters {
                let target = self.config.vocabulary.resolve(key);
                let assignment = ParameterAssignment::new(handle, target.name, target.group, value);
                let _ = applier.apply(engine, &component.name, assignment);
            }
        }

        engine
            .recompute()
            .map_err(|source| BuildError::Recompute { source })?;

        let mut report = applier.into_report();
        report.record_export(self.export(engine, ExportArtifact::Model));
        report.record_export(self.export(engine, ExportArtifact::Mesh));
        Ok(report)
    }

    fn export(&self, engine: &mut dyn GeometryEngine, artifact: ExportArtifact) -> ExportRecord {
        let (path, outcome): (PathBuf, _) = match artifact {
            ExportArtifact::Model => {
                let path = self.config.model_path();
                let outcome = engine.write_model_file(&path, &self.config.selection);
                (path, outcome)
            }
            ExportArtifact::Mesh => {
                let path = self.config.mesh_path();
                let outcome = engine.export_mesh(&path, &self.config.selection, MESH_FORMAT);
                (path, outcome)
            }
        };

        match &outcome {
            Ok(()) => info!(%artifact, path = %path.display(), "export written"),
            Err(err) => warn!(%artifact, path = %path.display(), "export failed: {err}"),
        }
        ExportRecord {
            artifact,
            path,
            outcome,
        }
    }
}
