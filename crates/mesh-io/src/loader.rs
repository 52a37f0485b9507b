//! Minimal ASCII STL reader.
//!
//! Only `vertex` records are consumed. `solid`, `facet`, `outer loop` and
//! their closing markers are skipped without validation, so a file is
//! accepted as long as its vertex records come in complete triples.

use std::fs;
use std::path::Path;

use airframe_types::{Mesh, Triangle};
use nalgebra::Point3;
use tracing::debug;

use crate::errors::FormatError;

/// Leading token of a vertex record.
pub const VERTEX_MARKER: &str = "vertex";

/// Read and parse a triangulated-surface file.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh, FormatError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| FormatError::NotText {
        path: path.to_path_buf(),
    })?;
    let mesh = parse_mesh(&text)?;
    debug!(path = %path.display(), triangles = mesh.len(), "loaded mesh");
    Ok(mesh)
}

/// Parse triangulated-surface text into a mesh, in file order.
pub fn parse_mesh(text: &str) -> Result<Mesh, FormatError> {
    let mut points = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(point) = parse_vertex_line(line, index + 1)? {
            points.push(point);
        }
    }

    if points.is_empty() {
        return Err(FormatError::NoVertices);
    }
    if points.len() % 3 != 0 {
        return Err(FormatError::IncompleteTriangle {
            count: points.len(),
        });
    }

    Ok(points
        .chunks_exact(3)
        .map(|c| Triangle::new(c[0], c[1], c[2]))
        .collect())
}

/// Returns `None` for any line that is not a vertex record.
fn parse_vertex_line(line: &str, line_no: usize) -> Result<Option<Point3<f64>>, FormatError> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(VERTEX_MARKER) {
        return Ok(None);
    }

    let coords: Vec<&str> = tokens.collect();
    if coords.len() != 3 {
        return Err(FormatError::WrongArity {
            line: line_no,
            found: coords.len(),
        });
    }

    let mut xyz = [0.0f64; 3];
    for (slot, token) in xyz.iter_mut().zip(&coords) {
        *slot = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FormatError::InvalidCoordinate {
                line: line_no,
                token: (*token).to_string(),
            })?;
    }
    Ok(Some(Point3::from(xyz)))
}
