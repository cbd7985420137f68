//! Material definitions and the registry that serves them.

pub mod registry;
pub mod types;

pub use registry::{MaterialRegistry, MaterialSet, MaterialSource};
pub use types::{Color, Material, MaterialPack, PackInfo};
