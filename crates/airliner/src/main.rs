//! Builds the reference narrow-body airliner, exports it, and renders the
//! exported mesh to `737_like.svg`.
//!
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=engine_bridge=debug`).

use std::path::Path;

use airframe_builder::{BuildConfig, BuildReport, ExportArtifact, GeometryBuilder};
use anyhow::Context;
use engine_bridge::ReferenceEngine;
use mesh_render::{render, RenderOptions, SvgBackend};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const WORKSPACE_CRATES: [&str; 6] = [
    "airliner",
    "airframe_builder",
    "airframe_types",
    "engine_bridge",
    "mesh_io",
    "mesh_render",
];

fn main() -> anyhow::Result<()> {
    // WARN for dependencies, INFO for our crates, RUST_LOG wins.
    let mut env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        for name in WORKSPACE_CRATES {
            if let Ok(directive) = format!("{name}=info").parse() {
                env_filter = env_filter.add_directive(directive);
            }
        }
    }
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = BuildConfig::default();
    info!(output = %config.output_dir.display(), "building reference airframe");

    let mut engine = ReferenceEngine::new();
    let report = GeometryBuilder::new(config)
        .build(&mut engine)
        .context("airframe build failed")?;
    report.log_summary();

    show_mesh(&report);
    Ok(())
}

/// Load the exported mesh and draw it. Failures here are reported but do not
/// fail the run; the exports are already on disk.
fn show_mesh(report: &BuildReport) {
    let Some(mesh_path) = report.exported(ExportArtifact::Mesh) else {
        warn!("no mesh was exported, skipping render");
        return;
    };

    let mesh = match mesh_io::load_mesh(mesh_path) {
        Ok(mesh) => mesh,
        Err(err) => {
            warn!(path = %mesh_path.display(), error = %err, "could not read exported mesh");
            return;
        }
    };

    let options = RenderOptions {
        title: "737-like airliner".to_string(),
        ..RenderOptions::default()
    };
    let mut backend = SvgBackend::new(Path::new("737_like.svg"));
    if let Err(err) = render(&mesh, &options, &mut backend) {
        warn!(error = %err, "rendering failed");
    }
}
