//! The declared airframe: which components exist, in which order, and the
//! literal values each one receives.

use airframe_types::EntityKind;

use crate::vocabulary::ParameterKey;

/// One component and its ordered parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub name: String,
    pub kind: EntityKind,
    pub parameters: Vec<(ParameterKey, f64)>,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parameters: Vec::new(),
        }
    }

    pub fn with(mut self, key: ParameterKey, value: f64) -> Self {
        self.parameters.push((key, value));
        self
    }

    pub fn value(&self, key: ParameterKey) -> Option<f64> {
        self.parameters
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Mirror image across the vertical symmetry plane: identical except the
    /// lateral location, which is negated.
    pub fn mirrored(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: self.kind,
            parameters: self
                .parameters
                .iter()
                .map(|&(k, v)| if k.is_lateral() { (k, -v) } else { (k, v) })
                .collect(),
        }
    }
}

/// Planform of a lifting surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDims {
    pub span: f64,
    pub root_chord: f64,
    pub tip_chord: f64,
    /// Leading-edge sweep in degrees.
    pub sweep_le: f64,
    /// Degrees; `None` leaves the engine default.
    pub dihedral: Option<f64>,
    pub x: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuselageDims {
    pub length: f64,
    pub max_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PodDims {
    pub length: f64,
    pub radius: f64,
    pub x: f64,
    pub z: f64,
    /// Lateral offset as a fraction of the main wing span.
    pub span_fraction: f64,
    /// Degrees about the vertical axis.
    pub z_rotation: f64,
}

/// Reference narrow-body airliner, roughly a 737-800. Lengths in metres,
/// angles in degrees, x measured aft of the nose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceAirframe {
    pub fuselage: FuselageDims,
    pub wing: SurfaceDims,
    pub horizontal_tail: SurfaceDims,
    /// `span` is the fin height once stood up.
    pub vertical_tail: SurfaceDims,
    pub pod: PodDims,
}

impl Default for ReferenceAirframe {
    fn default() -> Self {
        Self {
            fuselage: FuselageDims {
                length: 39.5,
                max_radius: 2.6,
            },
            wing: SurfaceDims {
                span: 35.8,
                root_chord: 6.5,
                tip_chord: 2.6,
                sweep_le: 25.0,
                dihedral: Some(3.25),
                x: 12.0,
                z: 0.0,
            },
            horizontal_tail: SurfaceDims {
                span: 13.3,
                root_chord: 3.5,
                tip_chord: 1.8,
                sweep_le: 15.0,
                dihedral: Some(2.0),
                x: 31.8,
                z: 1.0,
            },
            vertical_tail: SurfaceDims {
                span: 7.7,
                root_chord: 4.2,
                tip_chord: 1.6,
                sweep_le: 10.0,
                dihedral: None,
                x: 31.0,
                z: 0.0,
            },
            pod: PodDims {
                length: 3.4,
                radius: 1.1,
                x: 12.0,
                z: -1.9,
                span_fraction: 0.25,
                z_rotation: 0.0,
            },
        }
    }
}

pub const FUSELAGE: &str = "fuselage";
pub const MAIN_WING: &str = "main_wing";
pub const HORIZONTAL_TAIL: &str = "horizontal_tail";
pub const VERTICAL_TAIL: &str = "vertical_tail";
pub const LEFT_ENGINE_POD: &str = "left_engine_pod";
pub const RIGHT_ENGINE_POD: &str = "right_engine_pod";

/// Ordered list of components to build.
#[derive(Debug, Clone, PartialEq)]
pub struct AirframeLayout {
    pub components: Vec<ComponentSpec>,
}

impl AirframeLayout {
    pub fn reference() -> Self {
        Self::from_airframe(&ReferenceAirframe::default())
    }

    pub fn from_airframe(airframe: &ReferenceAirframe) -> Self {
        let fuselage = ComponentSpec::new(FUSELAGE, EntityKind::Fuselage)
            .with(ParameterKey::Length, airframe.fuselage.length)
            .with(ParameterKey::MaxRadius, airframe.fuselage.max_radius);

        let wing = placed(
            with_dihedral(planform(MAIN_WING, EntityKind::Wing, &airframe.wing), &airframe.wing),
            &airframe.wing,
        );
        // Tail dihedral goes in after placement.
        let horizontal_tail = with_dihedral(
            placed(
                planform(HORIZONTAL_TAIL, EntityKind::HorizontalTail, &airframe.horizontal_tail),
                &airframe.horizontal_tail,
            ),
            &airframe.horizontal_tail,
        );

        // A single panel stood up by rotating about the fuselage (X) axis,
        // which carries its span from Y into Z. Planar symmetry would
        // otherwise add a second fin below the fuselage.
        let vertical_tail = placed(
            with_dihedral(
                planform(VERTICAL_TAIL, EntityKind::VerticalTail, &airframe.vertical_tail),
                &airframe.vertical_tail,
            ),
            &airframe.vertical_tail,
        )
            .with(ParameterKey::PlanarSymmetry, 0.0)
            .with(ParameterKey::XRotation, 90.0);

        let pod = &airframe.pod;
        let left_pod = ComponentSpec::new(LEFT_ENGINE_POD, EntityKind::EnginePod)
            .with(ParameterKey::Length, pod.length)
            .with(ParameterKey::PodRadius, pod.radius)
            .with(ParameterKey::XLocation, pod.x)
            .with(ParameterKey::YLocation, airframe.wing.span * pod.span_fraction)
            .with(ParameterKey::ZLocation, pod.z)
            .with(ParameterKey::ZRotation, pod.z_rotation);
        let right_pod = left_pod.mirrored(RIGHT_ENGINE_POD);

        Self {
            components: vec![fuselage, wing, horizontal_tail, vertical_tail, left_pod, right_pod],
        }
    }

    pub fn component(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn assignment_count(&self) -> usize {
        self.components.iter().map(|c| c.parameters.len()).sum()
    }
}

fn planform(name: &str, kind: EntityKind, dims: &SurfaceDims) -> ComponentSpec {
    ComponentSpec::new(name, kind)
        .with(ParameterKey::TotalSpan, dims.span)
        .with(ParameterKey::RootChord, dims.root_chord)
        .with(ParameterKey::TipChord, dims.tip_chord)
        .with(ParameterKey::SweepLe, dims.sweep_le)
}

fn with_dihedral(spec: ComponentSpec, dims: &SurfaceDims) -> ComponentSpec {
    match dims.dihedral {
        Some(dihedral) => spec.with(ParameterKey::Dihedral, dihedral),
        None => spec,
    }
}

fn placed(spec: ComponentSpec, dims: &SurfaceDims) -> ComponentSpec {
    spec.with(ParameterKey::XLocation, dims.x)
        .with(ParameterKey::ZLocation, dims.z)
}
