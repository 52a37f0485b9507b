//! Triangulated-surface (STL) reading and writing.

pub mod errors;
pub mod loader;
pub mod stl;

pub use errors::{FormatError, StlWriteError};
pub use loader::{load_mesh, parse_mesh, VERTEX_MARKER};
pub use stl::{export_ascii_stl, export_binary_stl};
