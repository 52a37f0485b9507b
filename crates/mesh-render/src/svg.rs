//! SVG backend: orthographic projection with painter's-order polygons.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::{Point3, Vector3};
use tracing::info;

use crate::backend::{RenderError, SceneBackend};
use crate::scene::Scene;

const PADDING: f64 = 40.0;
const TITLE_HEIGHT: f64 = 25.0;

/// Writes each shown scene to an SVG file. Does not block.
#[derive(Debug, Clone)]
pub struct SvgBackend {
    path: PathBuf,
}

impl SvgBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SceneBackend for SvgBackend {
    fn show(&mut self, scene: &Scene) -> Result<(), RenderError> {
        fs::write(&self.path, scene_to_svg(scene)).map_err(|source| RenderError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), polygons = scene.polygons.len(), "scene rendered");
        Ok(())
    }
}

/// Maps normalized scene space to pixel coordinates.
struct Viewport<'a> {
    scene: &'a Scene,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    min_x: f64,
    min_y: f64,
}

impl<'a> Viewport<'a> {
    /// Fit the projected limits cube into the drawing area. Fitting the cube
    /// rather than the mesh keeps the scale identical on every axis.
    fn fit(scene: &'a Scene) -> Self {
        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;
        for corner in cube_corners() {
            let (x, y, _) = scene.camera.project(&corner);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(-y);
            max_y = max_y.max(-y);
        }

        let avail_w = scene.width - 2.0 * PADDING;
        let avail_h = scene.height - 2.0 * PADDING - TITLE_HEIGHT;
        let data_w = (max_x - min_x).max(0.001);
        let data_h = (max_y - min_y).max(0.001);
        let scale = (avail_w / data_w).min(avail_h / data_h);

        Self {
            scene,
            scale,
            offset_x: PADDING + (avail_w - data_w * scale) / 2.0,
            offset_y: PADDING + TITLE_HEIGHT + (avail_h - data_h * scale) / 2.0,
            min_x,
            min_y,
        }
    }

    /// Pixel position and depth of a model-space point.
    fn place(&self, p: &Point3<f64>) -> (f64, f64, f64) {
        let (x, y, depth) = self.scene.camera.project(&self.scene.limits.normalize(p));
        (
            (x - self.min_x) * self.scale + self.offset_x,
            (-y - self.min_y) * self.scale + self.offset_y,
            depth,
        )
    }
}

fn cube_corners() -> impl Iterator<Item = Point3<f64>> {
    (0..8).map(|i| {
        let c = |bit: usize| if i & bit == 0 { -0.5 } else { 0.5 };
        Point3::new(c(1), c(2), c(4))
    })
}

/// Render a scene as an SVG document.
pub fn scene_to_svg(scene: &Scene) -> String {
    let view = Viewport::fit(scene);
    let (width, height) = (scene.width, scene.height);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" style=\"background:#ffffff\">"
    );
    if !scene.title.is_empty() {
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"20\" font-family=\"sans-serif\" font-size=\"14\" fill=\"#333333\" text-anchor=\"middle\">{}</text>",
            width / 2.0,
            escape(&scene.title)
        );
    }

    write_axes(&mut svg, &view);

    struct Projected {
        points: Vec<(f64, f64)>,
        depth: f64,
        brightness: f64,
        opacity: f64,
    }

    let light = Vector3::new(0.3, -0.5, 0.8).normalize();
    let mut polygons: Vec<Projected> = scene
        .polygons
        .iter()
        .filter(|p| p.vertices.len() >= 3)
        .map(|poly| {
            let placed: Vec<(f64, f64, f64)> = poly.vertices.iter().map(|v| view.place(v)).collect();
            let depth = placed.iter().map(|p| p.2).sum::<f64>() / placed.len() as f64;
            let normal = (poly.vertices[1] - poly.vertices[0]).cross(&(poly.vertices[2] - poly.vertices[0]));
            let brightness = match normal.try_normalize(1e-12) {
                Some(n) => 0.3 + 0.7 * n.dot(&light).abs().min(1.0),
                None => 0.3,
            };
            Projected {
                points: placed.iter().map(|p| (p.0, p.1)).collect(),
                depth,
                brightness,
                opacity: poly.opacity,
            }
        })
        .collect();

    // Farthest first so nearer faces paint over them.
    polygons.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    let stroke_width = if polygons.len() > 200 { 0.2 } else { 0.5 };
    for poly in &polygons {
        let b = poly.brightness;
        let (r, g, bl) = ((70.0 * b) as u8, (130.0 * b) as u8, (200.0 * b) as u8);
        let points = poly
            .points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            svg,
            "  <polygon points=\"{points}\" fill=\"rgb({r},{g},{bl})\" fill-opacity=\"{:.2}\" stroke=\"#1f3b5c\" stroke-opacity=\"{:.2}\" stroke-width=\"{stroke_width}\"/>",
            poly.opacity, poly.opacity
        );
    }

    let _ = writeln!(
        svg,
        "  <text x=\"{}\" y=\"{}\" font-family=\"monospace\" font-size=\"10\" fill=\"#666666\" text-anchor=\"middle\">{} triangles, elev {} azim {}</text>",
        width / 2.0,
        height - 8.0,
        polygons.len(),
        scene.camera.elevation,
        scene.camera.azimuth
    );
    svg.push_str("</svg>\n");
    svg
}

/// Three axis lines from the low corner of the limits cube, each labelled
/// at its far end.
fn write_axes(svg: &mut String, view: &Viewport<'_>) {
    let limits = view.scene.limits;
    let origin = Point3::new(limits.min, limits.min, limits.min);
    let ends = [
        Point3::new(limits.max, limits.min, limits.min),
        Point3::new(limits.min, limits.max, limits.min),
        Point3::new(limits.min, limits.min, limits.max),
    ];

    let (x0, y0, _) = view.place(&origin);
    for (end, label) in ends.iter().zip(&view.scene.axis_labels) {
        let (x1, y1, _) = view.place(end);
        let _ = writeln!(
            svg,
            "  <line x1=\"{x0:.1}\" y1=\"{y0:.1}\" x2=\"{x1:.1}\" y2=\"{y1:.1}\" stroke=\"#999999\" stroke-width=\"1\"/>"
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{x1:.1}\" y=\"{y1:.1}\" font-family=\"sans-serif\" font-size=\"12\" fill=\"#333333\">{} [{:.1}, {:.1}]</text>",
            escape(label),
            limits.min,
            limits.max
        );
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
