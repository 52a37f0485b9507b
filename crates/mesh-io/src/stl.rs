//! STL export from a triangle soup, binary and ASCII formats.

use std::fmt::Write as _;

use airframe_types::Mesh;

use crate::errors::StlWriteError;

/// Export a mesh as a binary STL buffer.
///
/// Binary STL format:
/// - 80-byte header (arbitrary text)
/// - u32 triangle count (little-endian)
/// - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes
pub fn export_binary_stl(mesh: &Mesh, name: &str) -> Result<Vec<u8>, StlWriteError> {
    if mesh.is_empty() {
        return Err(StlWriteError::EmptyMesh);
    }
    let tri_count = u32::try_from(mesh.len()).map_err(|_| StlWriteError::TooManyTriangles {
        count: mesh.len(),
        max: u32::MAX,
    })?;

    let mut buf = Vec::with_capacity(80 + 4 + mesh.len() * 50);

    let header = format!("binary STL: {}", name);
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&tri_count.to_le_bytes());

    for tri in mesh {
        let n = tri.normal();
        for c in [n.x, n.y, n.z] {
            buf.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for v in &tri.vertices {
            for c in [v.x, v.y, v.z] {
                buf.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // Attribute byte count (unused)
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

/// Export a mesh as an ASCII STL string.
pub fn export_ascii_stl(mesh: &Mesh, name: &str) -> Result<String, StlWriteError> {
    if mesh.is_empty() {
        return Err(StlWriteError::EmptyMesh);
    }

    let mut out = String::with_capacity(mesh.len() * 300);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "solid {}", name);
    for tri in mesh {
        let n = tri.normal();
        let _ = writeln!(out, "  facet normal {} {} {}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in &tri.vertices {
            let _ = writeln!(out, "      vertex {} {} {}", v.x, v.y, v.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {}", name);

    Ok(out)
}
