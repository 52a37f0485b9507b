//! Scene construction for triangle soups and the backends that show them.

pub mod backend;
pub mod scene;
pub mod svg;

pub use backend::{render, RenderError, SceneBackend};
pub use scene::{build_scene, AxisLimits, Camera, Polygon, RenderOptions, Scene};
pub use svg::SvgBackend;
