//! Native model file: a pretty-printed JSON snapshot of every entity and its
//! parameter values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::PrimitiveKind;

/// Format identifier written into every model file.
pub const MODEL_FORMAT: &str = "airframe-model";

/// Current model file version.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Parameter values keyed by group, then by parameter name.
pub type ParameterTable = BTreeMap<String, BTreeMap<String, f64>>;

/// The top-level file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    pub metadata: ModelMetadata,
    /// Entities in creation order.
    pub entities: Vec<EntityRecord>,
}

/// Metadata stored alongside the entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Name of the model, taken from the file stem.
    pub name: String,
    /// Engine that wrote the file.
    pub generator: String,
    pub created: DateTime<Utc>,
}

/// One entity and its parameter values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    pub kind: PrimitiveKind,
    pub parameters: ParameterTable,
}

/// Errors while reading a model file back.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelFileError {
    #[error("failed to parse model file: {0}")]
    ParseError(String),

    #[error("unknown model format: {0}")]
    UnknownFormat(String),

    #[error("model version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },
}

impl ModelFile {
    pub fn new(name: impl Into<String>, generator: impl Into<String>, entities: Vec<EntityRecord>) -> Self {
        Self {
            format: MODEL_FORMAT.to_string(),
            version: MODEL_FORMAT_VERSION,
            metadata: ModelMetadata {
                name: name.into(),
                generator: generator.into(),
                created: Utc::now(),
            },
            entities,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, ModelFileError> {
        let file: ModelFile =
            serde_json::from_str(text).map_err(|e| ModelFileError::ParseError(e.to_string()))?;
        if file.format != MODEL_FORMAT {
            return Err(ModelFileError::UnknownFormat(file.format));
        }
        if file.version > MODEL_FORMAT_VERSION {
            return Err(ModelFileError::FutureVersion {
                file_version: file.version,
                supported_version: MODEL_FORMAT_VERSION,
            });
        }
        Ok(file)
    }
}
