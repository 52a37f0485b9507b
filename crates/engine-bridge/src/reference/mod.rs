//! In-process, deterministic implementation of `GeometryEngine`.
//!
//! Entities live in a slot map so handles from before a `clear_model` stop
//! resolving. Every entity starts with the catalog defaults for its
//! primitive. `recompute` tessellates each entity into a coarse surface;
//! mesh exports read those surfaces and refuse to run on a dirty model.

mod catalog;
mod tessellate;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use airframe_types::Mesh;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use tracing::{debug, info, instrument};

pub use catalog::{ParameterCatalog, ParameterSpec, DESIGN, SYM, WING_GEOM, XFORM, XSEC_1, XSEC_2};

use crate::model_file::{EntityRecord, ModelFile, ParameterTable};
use crate::traits::GeometryEngine;
use crate::types::*;
use catalog::Lookup;

new_key_type! {
    struct EntityKey;
}

#[derive(Debug, Clone)]
struct StoredParameter {
    id: u64,
    value: f64,
}

/// An entity in the reference model.
#[derive(Debug, Clone)]
pub(crate) struct ModelEntity {
    pub(crate) kind: PrimitiveKind,
    parameters: BTreeMap<String, BTreeMap<String, StoredParameter>>,
}

impl ModelEntity {
    pub(crate) fn value_or(&self, group: &str, name: &str, fallback: f64) -> f64 {
        self.parameters
            .get(group)
            .and_then(|g| g.get(name))
            .map_or(fallback, |p| p.value)
    }

    fn table(&self) -> ParameterTable {
        self.parameters
            .iter()
            .map(|(group, params)| {
                let values = params
                    .iter()
                    .map(|(name, p)| (name.clone(), p.value))
                    .collect();
                (group.clone(), values)
            })
            .collect()
    }
}

/// In-process parametric engine.
pub struct ReferenceEngine {
    catalog: ParameterCatalog,
    entities: SlotMap<EntityKey, ModelEntity>,
    /// Creation order; slot map iteration order is not stable across clears.
    order: Vec<EntityKey>,
    next_parameter_id: u64,
    surfaces: BTreeMap<u64, Mesh>,
    dirty: bool,
}

impl ReferenceEngine {
    pub fn new() -> Self {
        Self::with_catalog(ParameterCatalog::reference())
    }

    pub fn with_catalog(catalog: ParameterCatalog) -> Self {
        Self {
            catalog,
            entities: SlotMap::with_key(),
            order: Vec::new(),
            next_parameter_id: 1,
            surfaces: BTreeMap::new(),
            dirty: false,
        }
    }

    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Whether parameters changed since the last recompute.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The solved surface of one entity, if the model has been recomputed
    /// since the entity was created.
    pub fn surface(&self, entity: EntityHandle) -> Option<&Mesh> {
        self.surfaces.get(&entity.raw())
    }

    fn key(entity: EntityHandle) -> EntityKey {
        KeyData::from_ffi(entity.raw()).into()
    }

    fn handle(key: EntityKey) -> EntityHandle {
        EntityHandle(key.data().as_ffi())
    }

    fn entity(&self, entity: EntityHandle) -> Result<&ModelEntity, EngineError> {
        self.entities
            .get(Self::key(entity))
            .ok_or(EngineError::EntityNotFound { entity })
    }

    fn stored(
        &self,
        entity: EntityHandle,
        name: &str,
        group: &str,
    ) -> Result<&StoredParameter, EngineError> {
        let model = self.entity(entity)?;
        let params = model
            .parameters
            .get(group)
            .ok_or_else(|| EngineError::GroupNotFound {
                entity,
                group: group.to_string(),
            })?;
        params.get(name).ok_or_else(|| EngineError::ParameterNotFound {
            entity,
            group: group.to_string(),
            name: name.to_string(),
        })
    }

    /// Resolve a selection to keys in export order.
    fn select(&self, path: &Path, selection: &ExportSelection) -> Result<Vec<EntityKey>, EngineError> {
        match selection {
            ExportSelection::All => Ok(self.order.clone()),
            ExportSelection::Entities(handles) => handles
                .iter()
                .map(|&h| {
                    let key = Self::key(h);
                    if self.entities.contains_key(key) {
                        Ok(key)
                    } else {
                        Err(export_failed(path, format!("unknown entity {h}")))
                    }
                })
                .collect(),
        }
    }

    fn model_name(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string())
    }
}

impl Default for ReferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn export_failed(path: &Path, reason: impl Into<String>) -> EngineError {
    EngineError::ExportFailed {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

impl GeometryEngine for ReferenceEngine {
    fn version(&self) -> Result<String, EngineError> {
        Ok(format!("reference-engine {}", env!("CARGO_PKG_VERSION")))
    }

    fn clear_model(&mut self) -> Result<(), EngineError> {
        self.entities.clear();
        self.order.clear();
        self.surfaces.clear();
        self.dirty = false;
        debug!("model cleared");
        Ok(())
    }

    fn create_entity(&mut self, kind: PrimitiveKind) -> Result<EntityHandle, EngineError> {
        let mut parameters: BTreeMap<String, BTreeMap<String, StoredParameter>> = BTreeMap::new();
        for spec in self.catalog.parameters(kind) {
            let id = self.next_parameter_id;
            self.next_parameter_id += 1;
            parameters.entry(spec.group.clone()).or_default().insert(
                spec.name.clone(),
                StoredParameter {
                    id,
                    value: spec.default,
                },
            );
        }

        let key = self.entities.insert(ModelEntity { kind, parameters });
        self.order.push(key);
        self.dirty = true;
        let handle = Self::handle(key);
        debug!(%handle, %kind, "entity created");
        Ok(handle)
    }

    fn set_parameter(
        &mut self,
        entity: EntityHandle,
        name: &str,
        group: &str,
        value: f64,
    ) -> Result<(), EngineError> {
        let kind = self.entity(entity)?.kind;
        let spec = match self.catalog.lookup(kind, group, name) {
            Lookup::Found(spec) => spec,
            Lookup::MissingGroup => {
                return Err(EngineError::GroupNotFound {
                    entity,
                    group: group.to_string(),
                })
            }
            Lookup::MissingName => {
                return Err(EngineError::ParameterNotFound {
                    entity,
                    group: group.to_string(),
                    name: name.to_string(),
                })
            }
        };
        if !spec.accepts(value) {
            return Err(EngineError::ValueOutOfRange {
                name: name.to_string(),
                value,
                min: spec.min,
                max: spec.max,
            });
        }

        let key = Self::key(entity);
        let stored = self
            .entities
            .get_mut(key)
            .and_then(|e| e.parameters.get_mut(group))
            .and_then(|g| g.get_mut(name))
            .ok_or_else(|| EngineError::Other {
                message: format!("catalog entry {group}/{name} missing from {entity}"),
            })?;
        stored.value = value;
        self.dirty = true;
        Ok(())
    }

    fn get_parameter(&self, entity: EntityHandle, name: &str, group: &str) -> Result<f64, EngineError> {
        self.stored(entity, name, group).map(|p| p.value)
    }

    fn find_parameter(
        &self,
        entity: EntityHandle,
        name: &str,
        group: &str,
    ) -> Result<ParameterHandle, EngineError> {
        self.stored(entity, name, group).map(|p| ParameterHandle(p.id))
    }

    #[instrument(skip(self))]
    fn recompute(&mut self) -> Result<(), EngineError> {
        self.surfaces = self
            .order
            .iter()
            .filter_map(|&key| {
                let entity = self.entities.get(key)?;
                Some((Self::handle(key).raw(), tessellate::tessellate(entity)))
            })
            .collect();
        self.dirty = false;
        info!(
            entities = self.surfaces.len(),
            triangles = self.surfaces.values().map(Mesh::len).sum::<usize>(),
            "model recomputed"
        );
        Ok(())
    }

    fn write_model_file(&mut self, path: &Path, selection: &ExportSelection) -> Result<(), EngineError> {
        let keys = self.select(path, selection)?;
        let records = keys
            .iter()
            .filter_map(|&key| self.entities.get(key))
            .map(|e| EntityRecord {
                kind: e.kind,
                parameters: e.table(),
            })
            .collect();

        let file = ModelFile::new(Self::model_name(path), self.version()?, records);
        let json = file.to_json().map_err(|e| export_failed(path, e.to_string()))?;
        fs::write(path, json).map_err(|e| export_failed(path, e.to_string()))?;
        debug!(path = %path.display(), entities = keys.len(), "model file written");
        Ok(())
    }

    fn export_mesh(
        &mut self,
        path: &Path,
        selection: &ExportSelection,
        format: MeshFormat,
    ) -> Result<(), EngineError> {
        if self.dirty {
            return Err(export_failed(path, EngineError::NotRecomputed.to_string()));
        }
        let keys = self.select(path, selection)?;

        let mut mesh = Mesh::new();
        for key in keys {
            if let Some(surface) = self.surfaces.get(&Self::handle(key).raw()) {
                mesh.merge(surface);
            }
        }

        let name = Self::model_name(path);
        let bytes = match format {
            MeshFormat::AsciiStl => mesh_io::export_ascii_stl(&mesh, &name).map(String::into_bytes),
            MeshFormat::BinaryStl => mesh_io::export_binary_stl(&mesh, &name),
        }
        .map_err(|e| export_failed(path, e.to_string()))?;

        fs::write(path, bytes).map_err(|e| export_failed(path, e.to_string()))?;
        debug!(path = %path.display(), triangles = mesh.len(), ?format, "mesh exported");
        Ok(())
    }
}
