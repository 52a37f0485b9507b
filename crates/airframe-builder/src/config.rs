use std::path::PathBuf;

use engine_bridge::{ExportSelection, MeshFormat};

use crate::vocabulary::ParameterVocabulary;

/// Format of the exported mesh. It is read back by the text loader.
pub const MESH_FORMAT: MeshFormat = MeshFormat::AsciiStl;

/// Groups searched when a parameter is rejected, to hint where it might live.
pub const DEFAULT_HINT_GROUPS: [&str; 8] = [
    "Design", "XForm", "WingGeom", "XSec_1", "XSec_2", "XSec_3", "Airfoil", "Geometry",
];

/// Settings for one build run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory both exports are written to.
    pub output_dir: PathBuf,
    /// File stem shared by the exports.
    pub artifact_stem: String,
    /// Extension of the native model file.
    pub model_extension: String,
    pub selection: ExportSelection,
    /// Emit a trace line for every successful assignment.
    pub verbose: bool,
    pub hint_groups: Vec<String>,
    pub vocabulary: ParameterVocabulary,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            artifact_stem: "737_like".to_string(),
            model_extension: "json".to_string(),
            selection: ExportSelection::All,
            verbose: true,
            hint_groups: DEFAULT_HINT_GROUPS.iter().map(|g| g.to_string()).collect(),
            vocabulary: ParameterVocabulary::default(),
        }
    }
}

impl BuildConfig {
    pub fn model_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.artifact_stem, self.model_extension))
    }

    pub fn mesh_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.artifact_stem, MESH_FORMAT.extension()))
    }
}
