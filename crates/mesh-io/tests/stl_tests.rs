//! Tests for STL export.

use airframe_types::{Mesh, Triangle};
use mesh_io::{export_ascii_stl, export_binary_stl, StlWriteError};
use nalgebra::Point3;

fn make_triangle_mesh() -> Mesh {
    Mesh::from_triangles(vec![Triangle::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    )])
}

#[test]
fn binary_stl_header_is_80_bytes() {
    let stl = export_binary_stl(&make_triangle_mesh(), "test").unwrap();
    let header = String::from_utf8_lossy(&stl[..80]);
    assert!(header.contains("test"), "header should contain solid name");
}

#[test]
fn binary_stl_size_matches_triangle_count() {
    let stl = export_binary_stl(&make_triangle_mesh(), "test").unwrap();
    assert_eq!(stl.len(), 80 + 4 + 50);
    let count = u32::from_le_bytes([stl[80], stl[81], stl[82], stl[83]]);
    assert_eq!(count, 1);
}

#[test]
fn ascii_stl_has_solid_markers() {
    let stl = export_ascii_stl(&make_triangle_mesh(), "part").unwrap();
    assert!(stl.starts_with("solid part\n"));
    assert!(stl.trim_end().ends_with("endsolid part"));
    assert_eq!(stl.matches("vertex").count(), 3);
    assert!(stl.contains("facet normal 0 0 1"));
}

#[test]
fn empty_mesh_cannot_be_exported() {
    assert!(matches!(
        export_ascii_stl(&Mesh::new(), "x"),
        Err(StlWriteError::EmptyMesh)
    ));
    assert!(matches!(
        export_binary_stl(&Mesh::new(), "x"),
        Err(StlWriteError::EmptyMesh)
    ));
}
