pub mod model_file;
pub mod reference;
pub mod traits;
pub mod types;

pub use reference::{ParameterCatalog, ParameterSpec, ReferenceEngine};
pub use traits::*;
pub use types::*;
