use std::fmt;

use serde::{Deserialize, Serialize};

/// The role a component plays in the airframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntityKind {
    Fuselage,
    Wing,
    HorizontalTail,
    VerticalTail,
    EnginePod,
}

impl EntityKind {
    /// The engine primitive this component is built from.
    /// Both tail surfaces are wings positioned and rotated into place.
    pub fn primitive(self) -> PrimitiveKind {
        match self {
            EntityKind::Fuselage => PrimitiveKind::Fuselage,
            EntityKind::Wing | EntityKind::HorizontalTail | EntityKind::VerticalTail => {
                PrimitiveKind::Wing
            }
            EntityKind::EnginePod => PrimitiveKind::Pod,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Fuselage => "fuselage",
            EntityKind::Wing => "wing",
            EntityKind::HorizontalTail => "horizontal tail",
            EntityKind::VerticalTail => "vertical tail",
            EntityKind::EnginePod => "engine pod",
        };
        f.write_str(name)
    }
}

/// Geometry primitive understood by the parametric engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Fuselage,
    Wing,
    Pod,
}

impl PrimitiveKind {
    /// Type name used by the engine when creating a geometry of this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            PrimitiveKind::Fuselage => "FUSELAGE",
            PrimitiveKind::Wing => "WING",
            PrimitiveKind::Pod => "POD",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
