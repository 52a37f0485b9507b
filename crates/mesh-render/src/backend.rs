use std::path::PathBuf;

use airframe_types::Mesh;
use tracing::{debug, instrument};

use crate::scene::{build_scene, RenderOptions, Scene};

/// Errors from a rendering backend.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can show a scene.
///
/// Interactive backends block in `show` until the viewer is closed; that is
/// the expected behaviour, callers should not run it on a thread that has
/// other work to do. File backends return once the output is written.
pub trait SceneBackend {
    fn show(&mut self, scene: &Scene) -> Result<(), RenderError>;
}

/// Build a scene from the mesh and hand it to the backend.
/// An empty mesh produces an empty scene, not an error.
#[instrument(skip_all, fields(triangles = mesh.len()))]
pub fn render(
    mesh: &Mesh,
    options: &RenderOptions,
    backend: &mut dyn SceneBackend,
) -> Result<(), RenderError> {
    let scene = build_scene(mesh, options);
    debug!(
        min = scene.limits.min,
        max = scene.limits.max,
        elevation = scene.camera.elevation,
        azimuth = scene.camera.azimuth,
        "scene built"
    );
    backend.show(&scene)
}
