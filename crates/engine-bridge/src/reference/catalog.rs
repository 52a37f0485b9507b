//! Parameter catalog: which groups and parameters each primitive exposes,
//! with their accepted ranges and defaults.

use std::collections::HashMap;

use crate::types::PrimitiveKind;

pub const DESIGN: &str = "Design";
pub const XFORM: &str = "XForm";
pub const WING_GEOM: &str = "WingGeom";
pub const XSEC_1: &str = "XSec_1";
pub const XSEC_2: &str = "XSec_2";
pub const SYM: &str = "Sym";

/// One parameter the engine accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub group: String,
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ParameterSpec {
    pub fn new(group: &str, name: &str, min: f64, max: f64, default: f64) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
            min,
            max,
            default,
        }
    }

    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Result of looking a (group, name) pair up in the catalog.
#[derive(Debug)]
pub(crate) enum Lookup<'a> {
    Found(&'a ParameterSpec),
    MissingGroup,
    MissingName,
}

/// Per-primitive parameter definitions.
#[derive(Debug, Clone, Default)]
pub struct ParameterCatalog {
    specs: HashMap<PrimitiveKind, Vec<ParameterSpec>>,
}

impl ParameterCatalog {
    /// An empty catalog: every primitive exposes no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// The parameter set of the reference engine.
    pub fn reference() -> Self {
        let mut catalog = Self::new();
        for kind in [PrimitiveKind::Fuselage, PrimitiveKind::Wing, PrimitiveKind::Pod] {
            for axis in ["X", "Y", "Z"] {
                catalog = catalog
                    .with_parameter(
                        kind,
                        ParameterSpec::new(XFORM, &format!("{axis}_Rel_Location"), -1.0e4, 1.0e4, 0.0),
                    )
                    .with_parameter(
                        kind,
                        ParameterSpec::new(XFORM, &format!("{axis}_Rel_Rotation"), -360.0, 360.0, 0.0),
                    );
            }
        }

        catalog
            .with_parameter(
                PrimitiveKind::Fuselage,
                ParameterSpec::new(DESIGN, "Length", 0.1, 500.0, 10.0),
            )
            .with_parameter(
                PrimitiveKind::Fuselage,
                ParameterSpec::new(DESIGN, "Max_Radius", 0.01, 50.0, 1.0),
            )
            .with_parameter(
                PrimitiveKind::Wing,
                ParameterSpec::new(WING_GEOM, "TotalSpan", 0.1, 500.0, 10.0),
            )
            .with_parameter(
                PrimitiveKind::Wing,
                ParameterSpec::new(WING_GEOM, "Sweep_LE", -85.0, 85.0, 0.0),
            )
            .with_parameter(
                PrimitiveKind::Wing,
                ParameterSpec::new(WING_GEOM, "Dihedral", -90.0, 90.0, 0.0),
            )
            .with_parameter(
                PrimitiveKind::Wing,
                ParameterSpec::new(XSEC_1, "Root_Chord", 0.01, 100.0, 2.0),
            )
            .with_parameter(
                PrimitiveKind::Wing,
                ParameterSpec::new(XSEC_2, "Tip_Chord", 0.01, 100.0, 1.0),
            )
            .with_parameter(
                PrimitiveKind::Wing,
                ParameterSpec::new(SYM, "Sym_Planar_Flag", 0.0, 1.0, 1.0),
            )
            .with_parameter(
                PrimitiveKind::Pod,
                ParameterSpec::new(DESIGN, "Length", 0.1, 100.0, 4.0),
            )
            .with_parameter(
                PrimitiveKind::Pod,
                ParameterSpec::new(DESIGN, "Radius", 0.01, 20.0, 0.5),
            )
    }

    /// Add or replace a parameter definition.
    pub fn with_parameter(mut self, kind: PrimitiveKind, spec: ParameterSpec) -> Self {
        let specs = self.specs.entry(kind).or_default();
        match specs
            .iter_mut()
            .find(|s| s.group == spec.group && s.name == spec.name)
        {
            Some(existing) => *existing = spec,
            None => specs.push(spec),
        }
        self
    }

    /// Remove a parameter definition, e.g. to model an engine build that
    /// names a parameter differently.
    pub fn without_parameter(mut self, kind: PrimitiveKind, group: &str, name: &str) -> Self {
        if let Some(specs) = self.specs.get_mut(&kind) {
            specs.retain(|s| !(s.group == group && s.name == name));
        }
        self
    }

    /// Parameters of a primitive in definition order.
    pub fn parameters(&self, kind: PrimitiveKind) -> &[ParameterSpec] {
        self.specs.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn lookup(&self, kind: PrimitiveKind, group: &str, name: &str) -> Lookup<'_> {
        let specs = self.parameters(kind);
        if !specs.iter().any(|s| s.group == group) {
            return Lookup::MissingGroup;
        }
        specs
            .iter()
            .find(|s| s.group == group && s.name == name)
            .map_or(Lookup::MissingName, Lookup::Found)
    }
}
