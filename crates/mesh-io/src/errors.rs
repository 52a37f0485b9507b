use std::path::PathBuf;

/// Errors while reading a triangulated-surface file.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("cannot read mesh file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a text mesh file (binary STL?)")]
    NotText { path: PathBuf },

    #[error("line {line}: invalid coordinate {token:?}")]
    InvalidCoordinate { line: usize, token: String },

    #[error("line {line}: vertex record has {found} coordinates, expected 3")]
    WrongArity { line: usize, found: usize },

    #[error("mesh contains no vertex records")]
    NoVertices,

    #[error("vertex count {count} is not a multiple of 3")]
    IncompleteTriangle { count: usize },
}

/// Errors while writing STL output.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StlWriteError {
    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("mesh has {count} triangles, binary STL holds at most {max}")]
    TooManyTriangles { count: usize, max: u32 },
}
