//! Coarse surface generation for the reference engine's primitives.

use std::f64::consts::TAU;

use airframe_types::{Mesh, Triangle};
use nalgebra::{Point3, Rotation3, Translation3, Vector3};

use super::catalog::{DESIGN, SYM, WING_GEOM, XFORM, XSEC_1, XSEC_2};
use super::ModelEntity;
use crate::types::PrimitiveKind;

const FUSELAGE_SEGMENTS: usize = 24;
const POD_SEGMENTS: usize = 16;

/// Wing panel thickness as a fraction of the local chord.
const THICKNESS_RATIO: f64 = 0.1;

/// Tessellate one entity into world-space triangles.
pub(crate) fn tessellate(entity: &ModelEntity) -> Mesh {
    let local = match entity.kind {
        PrimitiveKind::Fuselage => capped_cylinder(
            entity.value_or(DESIGN, "Length", 10.0),
            entity.value_or(DESIGN, "Max_Radius", 1.0),
            FUSELAGE_SEGMENTS,
        ),
        PrimitiveKind::Pod => capped_cylinder(
            entity.value_or(DESIGN, "Length", 4.0),
            entity.value_or(DESIGN, "Radius", 0.5),
            POD_SEGMENTS,
        ),
        PrimitiveKind::Wing => wing(entity),
    };

    let rotation = Rotation3::from_euler_angles(
        entity.value_or(XFORM, "X_Rel_Rotation", 0.0).to_radians(),
        entity.value_or(XFORM, "Y_Rel_Rotation", 0.0).to_radians(),
        entity.value_or(XFORM, "Z_Rel_Rotation", 0.0).to_radians(),
    );
    let translation = Translation3::new(
        entity.value_or(XFORM, "X_Rel_Location", 0.0),
        entity.value_or(XFORM, "Y_Rel_Location", 0.0),
        entity.value_or(XFORM, "Z_Rel_Location", 0.0),
    );

    local
        .iter()
        .map(|t| {
            let [a, b, c] = t.vertices.map(|p| translation * (rotation * p));
            Triangle::new(a, b, c)
        })
        .collect()
}

/// Cylinder along +X from the origin, closed at both ends.
fn capped_cylinder(length: f64, radius: f64, segments: usize) -> Mesh {
    let ring = |x: f64, i: usize| {
        let a = TAU * i as f64 / segments as f64;
        Point3::new(x, radius * a.cos(), radius * a.sin())
    };
    let nose = Point3::new(0.0, 0.0, 0.0);
    let tail = Point3::new(length, 0.0, 0.0);

    let mut mesh = Mesh::new();
    for i in 0..segments {
        let (p0, p1) = (ring(0.0, i), ring(0.0, i + 1));
        let (q0, q1) = (ring(length, i), ring(length, i + 1));
        mesh.push(Triangle::new(p0, q0, q1));
        mesh.push(Triangle::new(p0, q1, p1));
        mesh.push(Triangle::new(nose, p1, p0));
        mesh.push(Triangle::new(tail, q0, q1));
    }
    mesh
}

/// Trapezoidal panel from root (y = 0) to tip, mirrored across the XZ plane
/// when planar symmetry is on. With symmetry the total span covers both
/// halves; without it the span is the single panel's length.
fn wing(entity: &ModelEntity) -> Mesh {
    let span = entity.value_or(WING_GEOM, "TotalSpan", 10.0);
    let sweep = entity.value_or(WING_GEOM, "Sweep_LE", 0.0).to_radians();
    let dihedral = entity.value_or(WING_GEOM, "Dihedral", 0.0).to_radians();
    let root = entity.value_or(XSEC_1, "Root_Chord", 2.0);
    let tip = entity.value_or(XSEC_2, "Tip_Chord", 1.0);
    let symmetric = entity.value_or(SYM, "Sym_Planar_Flag", 1.0) >= 0.5;

    let half = if symmetric { span / 2.0 } else { span };
    let root_le = Point3::new(0.0, 0.0, 0.0);
    let tip_le = Point3::new(half * sweep.tan(), half, half * dihedral.tan());

    let panel = panel(root_le, root, tip_le, tip);
    let mut mesh = panel.clone();
    if symmetric {
        let mirror = Vector3::new(1.0, -1.0, 1.0);
        for t in panel.iter() {
            let [a, b, c] = t.vertices.map(|p| Point3::from(p.coords.component_mul(&mirror)));
            // Mirroring flips handedness, swap two vertices to keep the winding outward.
            mesh.push(Triangle::new(a, c, b));
        }
    }
    mesh
}

/// Thin hexahedral slab between a root and a tip chord line.
fn panel(root_le: Point3<f64>, root_chord: f64, tip_le: Point3<f64>, tip_chord: f64) -> Mesh {
    let up = |p: Point3<f64>, chord: f64| p + Vector3::z() * (chord * THICKNESS_RATIO / 2.0);
    let down = |p: Point3<f64>, chord: f64| p - Vector3::z() * (chord * THICKNESS_RATIO / 2.0);
    let root_te = root_le + Vector3::x() * root_chord;
    let tip_te = tip_le + Vector3::x() * tip_chord;

    // 0..4 lower skin, 4..8 upper skin: root LE, root TE, tip TE, tip LE
    let c = [
        down(root_le, root_chord),
        down(root_te, root_chord),
        down(tip_te, tip_chord),
        down(tip_le, tip_chord),
        up(root_le, root_chord),
        up(root_te, root_chord),
        up(tip_te, tip_chord),
        up(tip_le, tip_chord),
    ];
    let quads = [
        [0, 3, 2, 1], // lower
        [4, 5, 6, 7], // upper
        [0, 1, 5, 4], // root
        [3, 7, 6, 2], // tip
        [0, 4, 7, 3], // leading edge
        [1, 2, 6, 5], // trailing edge
    ];

    let mut mesh = Mesh::new();
    for [a, b, cc, d] in quads {
        mesh.push(Triangle::new(c[a], c[b], c[cc]));
        mesh.push(Triangle::new(c[a], c[cc], c[d]));
    }
    mesh
}
