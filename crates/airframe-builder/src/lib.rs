//! Parametric airframe construction against a `GeometryEngine`.
//!
//! `ConfigApplier` pushes one value at a time into the engine and records
//! every outcome; `GeometryBuilder` drives it over the declared layout,
//! solves the model once and requests both exports.

pub mod applier;
pub mod builder;
pub mod config;
pub mod layout;
pub mod report;
pub mod vocabulary;

pub use applier::{AssignmentError, AssignmentResult, ConfigApplier, ParameterAssignment};
pub use builder::{BuildError, GeometryBuilder};
pub use config::{BuildConfig, MESH_FORMAT};
pub use layout::{AirframeLayout, ComponentSpec, ReferenceAirframe};
pub use report::{AssignmentRecord, BuildReport, CreatedEntity, ExportArtifact, ExportRecord};
pub use vocabulary::{ParameterKey, ParameterName, ParameterVocabulary, VocabularyError};
