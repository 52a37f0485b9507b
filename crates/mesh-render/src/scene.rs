use airframe_types::Mesh;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// How a mesh is presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Face opacity in [0, 1].
    pub opacity: f64,
    /// Camera elevation above the XY plane, degrees.
    pub elevation: f64,
    /// Camera azimuth about Z, degrees.
    pub azimuth: f64,
    pub title: String,
    /// Output size in pixels, for backends that rasterize or lay out.
    pub width: f64,
    pub height: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            opacity: 0.5,
            elevation: 45.0,
            azimuth: 45.0,
            title: String::new(),
            width: 1000.0,
            height: 800.0,
        }
    }
}

/// One translucent flat polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point3<f64>>,
    pub opacity: f64,
}

/// Shared range for all three axes, so model-space cubes stay cubes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl AxisLimits {
    /// Limits covering every coordinate of the mesh. A mesh whose
    /// coordinates are all equal gets a unit range around that value.
    pub fn of_mesh(mesh: &Mesh) -> Self {
        match mesh.coordinate_range() {
            None => Self::default(),
            Some((lo, hi)) if hi - lo <= f64::EPSILON => Self {
                min: lo - 0.5,
                max: hi + 0.5,
            },
            Some((min, max)) => Self { min, max },
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map a model-space point into the unit cube centred on the origin.
    pub fn normalize(&self, p: &Point3<f64>) -> Point3<f64> {
        let centre = (self.min + self.max) / 2.0;
        Point3::from((p.coords - Vector3::repeat(centre)) / self.span())
    }
}

/// Fixed viewing direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Degrees.
    pub elevation: f64,
    /// Degrees.
    pub azimuth: f64,
}

impl Camera {
    /// Unit vector from the scene towards the viewer.
    pub fn eye(&self) -> Vector3<f64> {
        let (el, az) = (self.elevation.to_radians(), self.azimuth.to_radians());
        Vector3::new(el.cos() * az.cos(), el.cos() * az.sin(), el.sin())
    }

    /// Screen-right and screen-up unit vectors. Z projects upwards for any
    /// elevation below 90°.
    pub fn screen_axes(&self) -> (Vector3<f64>, Vector3<f64>) {
        let (el, az) = (self.elevation.to_radians(), self.azimuth.to_radians());
        let right = Vector3::new(-az.sin(), az.cos(), 0.0);
        let up = Vector3::new(-el.sin() * az.cos(), -el.sin() * az.sin(), el.cos());
        (right, up)
    }

    /// Orthographic projection of a point: (screen x, screen y, depth).
    /// Larger depth is closer to the viewer.
    pub fn project(&self, p: &Point3<f64>) -> (f64, f64, f64) {
        let (right, up) = self.screen_axes();
        (p.coords.dot(&right), p.coords.dot(&up), p.coords.dot(&self.eye()))
    }
}

/// Everything a backend needs to draw a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub polygons: Vec<Polygon>,
    pub limits: AxisLimits,
    pub camera: Camera,
    pub axis_labels: [String; 3],
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// One polygon per triangle, in mesh order, with uniform axis limits.
pub fn build_scene(mesh: &Mesh, options: &RenderOptions) -> Scene {
    let opacity = options.opacity.clamp(0.0, 1.0);
    let polygons = mesh
        .iter()
        .map(|t| Polygon {
            vertices: t.vertices.to_vec(),
            opacity,
        })
        .collect();

    Scene {
        polygons,
        limits: AxisLimits::of_mesh(mesh),
        camera: Camera {
            elevation: options.elevation,
            azimuth: options.azimuth,
        },
        axis_labels: ["X".to_string(), "Y".to_string(), "Z".to_string()],
        title: options.title.clone(),
        width: options.width,
        height: options.height,
    }
}
