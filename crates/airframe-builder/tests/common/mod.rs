//! Engine test doubles shared by the builder tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;

use engine_bridge::*;

/// One call seen by `ScriptedEngine`.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Version,
    Clear,
    Create(PrimitiveKind),
    Set {
        entity: EntityHandle,
        name: String,
        group: String,
        value: f64,
    },
    Find {
        name: String,
        group: String,
    },
    Recompute,
    WriteModel,
    ExportMesh(MeshFormat),
}

/// Wraps a `ReferenceEngine`, records every call and injects failures.
pub struct ScriptedEngine {
    pub inner: ReferenceEngine,
    pub calls: RefCell<Vec<Call>>,
    pub unavailable: bool,
    /// Parameter names whose `set_parameter` is refused as unavailable.
    pub drop_connection_on: HashSet<String>,
    pub fail_model_export: bool,
    pub fail_mesh_export: bool,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::wrapping(ReferenceEngine::new())
    }

    pub fn wrapping(inner: ReferenceEngine) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
            unavailable: false,
            drop_connection_on: HashSet::new(),
            fail_model_export: false,
            fail_mesh_export: false,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn log(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self) -> Result<(), EngineError> {
        if self.unavailable {
            Err(EngineError::Unavailable {
                reason: "engine not initialized".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl GeometryEngine for ScriptedEngine {
    fn version(&self) -> Result<String, EngineError> {
        self.log(Call::Version);
        self.check()?;
        self.inner.version()
    }

    fn clear_model(&mut self) -> Result<(), EngineError> {
        self.log(Call::Clear);
        self.check()?;
        self.inner.clear_model()
    }

    fn create_entity(&mut self, kind: PrimitiveKind) -> Result<EntityHandle, EngineError> {
        self.log(Call::Create(kind));
        self.check()?;
        self.inner.create_entity(kind)
    }

    fn set_parameter(
        &mut self,
        entity: EntityHandle,
        name: &str,
        group: &str,
        value: f64,
    ) -> Result<(), EngineError> {
        self.log(Call::Set {
            entity,
            name: name.to_string(),
            group: group.to_string(),
            value,
        });
        self.check()?;
        if self.drop_connection_on.contains(name) {
            return Err(EngineError::Unavailable {
                reason: "connection dropped".into(),
            });
        }
        self.inner.set_parameter(entity, name, group, value)
    }

    fn get_parameter(&self, entity: EntityHandle, name: &str, group: &str) -> Result<f64, EngineError> {
        self.inner.get_parameter(entity, name, group)
    }

    fn find_parameter(
        &self,
        entity: EntityHandle,
        name: &str,
        group: &str,
    ) -> Result<ParameterHandle, EngineError> {
        self.log(Call::Find {
            name: name.to_string(),
            group: group.to_string(),
        });
        self.check()?;
        self.inner.find_parameter(entity, name, group)
    }

    fn recompute(&mut self) -> Result<(), EngineError> {
        self.log(Call::Recompute);
        self.check()?;
        self.inner.recompute()
    }

    fn write_model_file(&mut self, path: &Path, selection: &ExportSelection) -> Result<(), EngineError> {
        self.log(Call::WriteModel);
        if self.fail_model_export {
            return Err(EngineError::ExportFailed {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            });
        }
        self.inner.write_model_file(path, selection)
    }

    fn export_mesh(
        &mut self,
        path: &Path,
        selection: &ExportSelection,
        format: MeshFormat,
    ) -> Result<(), EngineError> {
        self.log(Call::ExportMesh(format));
        if self.fail_mesh_export {
            return Err(EngineError::ExportFailed {
                path: path.to_path_buf(),
                reason: "format not supported by this build".into(),
            });
        }
        self.inner.export_mesh(path, selection, format)
    }
}
