pub mod entity;
pub mod mesh;

pub use entity::*;
pub use mesh::*;
