use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// Re-export shared types from airframe-types
pub use airframe_types::PrimitiveKind;

/// Opaque handle to a geometry entity in the engine.
/// NEVER persisted. Valid only for the engine session that issued it;
/// `clear_model` invalidates every outstanding handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub(crate) u64);

impl EntityHandle {
    /// Wrap an engine-native identifier. Only engine implementations
    /// should call this; callers treat handles as opaque tokens.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub(crate) fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geom#{:x}", self.0)
    }
}

/// Opaque handle to a single parameter of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterHandle(pub(crate) u64);

impl ParameterHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Which entities an export covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExportSelection {
    /// Every entity in the model.
    #[default]
    All,
    /// Only the listed entities, in the given order.
    Entities(Vec<EntityHandle>),
}

/// Triangulated-surface export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshFormat {
    AsciiStl,
    BinaryStl,
}

impl MeshFormat {
    pub fn extension(self) -> &'static str {
        match self {
            MeshFormat::AsciiStl | MeshFormat::BinaryStl => "stl",
        }
    }
}

/// Errors from engine operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("engine unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("entity not found: {entity}")]
    EntityNotFound { entity: EntityHandle },

    #[error("group '{group}' not found on {entity}")]
    GroupNotFound { entity: EntityHandle, group: String },

    #[error("parameter '{name}' not found in group '{group}' on {entity}")]
    ParameterNotFound {
        entity: EntityHandle,
        group: String,
        name: String,
    },

    #[error("parameter {name} = {value} is out of range [{min}, {max}]")]
    ValueOutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("model changed since the last recompute")]
    NotRecomputed,

    #[error("export to {path} failed: {reason}")]
    ExportFailed { path: PathBuf, reason: String },

    #[error("engine error: {message}")]
    Other { message: String },
}
