use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A single triangle of a surface soup. No connectivity to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Unit normal from the winding order, or +Z for a degenerate triangle.
    pub fn normal(&self) -> Vector3<f64> {
        let [a, b, c] = self.vertices;
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if len > 1e-12 {
            n / len
        } else {
            Vector3::z()
        }
    }
}

/// An ordered triangle soup. Order is the order the triangles were read or
/// generated in and is preserved by every operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.iter()
    }

    /// Append another mesh's triangles after this one's.
    pub fn merge(&mut self, other: &Mesh) {
        self.triangles.extend_from_slice(&other.triangles);
    }

    /// Axis-aligned bounds as (min, max), or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut points = self.triangles.iter().flat_map(|t| t.vertices.iter());
        let first = *points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        }))
    }

    /// Smallest and largest coordinate over every axis of every vertex.
    pub fn coordinate_range(&self) -> Option<(f64, f64)> {
        let (lo, hi) = self.bounds()?;
        Some((lo.x.min(lo.y).min(lo.z), hi.x.max(hi.y).max(hi.z)))
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
