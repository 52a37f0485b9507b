//! Mapping from abstract airframe parameters to the engine's own
//! (group, name) vocabulary.
//!
//! Engine builds disagree on parameter names (the fuselage radius in
//! particular), so the mapping is data: defaults match the reference engine
//! and any entry can be overridden from TOML.

use std::collections::BTreeMap;

use serde::de::value::Error as ValueError;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};

/// An airframe parameter, independent of what the engine calls it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKey {
    Length,
    MaxRadius,
    PodRadius,
    TotalSpan,
    RootChord,
    TipChord,
    SweepLe,
    Dihedral,
    PlanarSymmetry,
    XLocation,
    YLocation,
    ZLocation,
    XRotation,
    YRotation,
    ZRotation,
}

impl ParameterKey {
    /// Whether this key is the spanwise (lateral) placement.
    pub fn is_lateral(self) -> bool {
        self == ParameterKey::YLocation
    }

    fn default_name(self) -> ParameterName {
        let (group, name) = match self {
            ParameterKey::Length => ("Design", "Length"),
            ParameterKey::MaxRadius => ("Design", "Max_Radius"),
            ParameterKey::PodRadius => ("Design", "Radius"),
            ParameterKey::TotalSpan => ("WingGeom", "TotalSpan"),
            ParameterKey::RootChord => ("XSec_1", "Root_Chord"),
            ParameterKey::TipChord => ("XSec_2", "Tip_Chord"),
            ParameterKey::SweepLe => ("WingGeom", "Sweep_LE"),
            ParameterKey::Dihedral => ("WingGeom", "Dihedral"),
            ParameterKey::PlanarSymmetry => ("Sym", "Sym_Planar_Flag"),
            ParameterKey::XLocation => ("XForm", "X_Rel_Location"),
            ParameterKey::YLocation => ("XForm", "Y_Rel_Location"),
            ParameterKey::ZLocation => ("XForm", "Z_Rel_Location"),
            ParameterKey::XRotation => ("XForm", "X_Rel_Rotation"),
            ParameterKey::YRotation => ("XForm", "Y_Rel_Rotation"),
            ParameterKey::ZRotation => ("XForm", "Z_Rel_Rotation"),
        };
        ParameterName::new(group, name)
    }
}

/// A parameter as the engine names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterName {
    pub group: String,
    pub name: String,
}

impl ParameterName {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("invalid vocabulary override: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown parameter key '{key}'")]
    UnknownKey { key: String },
}

/// Engine vocabulary: built-in defaults plus overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterVocabulary {
    overrides: BTreeMap<ParameterKey, ParameterName>,
}

impl ParameterVocabulary {
    /// Parse overrides, e.g.
    ///
    /// ```toml
    /// [max_radius]
    /// group = "Design"
    /// name = "Diameter"
    /// ```
    ///
    /// Keys not mentioned keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, VocabularyError> {
        let raw: BTreeMap<String, ParameterName> = toml::from_str(text)?;
        let overrides = raw
            .into_iter()
            .map(|(key, name)| {
                let deserializer: serde::de::value::StrDeserializer<'_, ValueError> =
                    key.as_str().into_deserializer();
                ParameterKey::deserialize(deserializer)
                    .map(|k| (k, name))
                    .map_err(|_| VocabularyError::UnknownKey { key: key.clone() })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { overrides })
    }

    pub fn with_override(mut self, key: ParameterKey, name: ParameterName) -> Self {
        self.overrides.insert(key, name);
        self
    }

    pub fn resolve(&self, key: ParameterKey) -> ParameterName {
        self.overrides
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.default_name())
    }
}
