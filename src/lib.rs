//! Composable tools built from handle and head materials.
//!
//! A [`MaterialRegistry`] serves named [`Material`]s. [`compose`] derives a
//! [`ComposedTool`] from a handle material and a head material, and
//! [`ComposedTool::apply_damage`] consumes its durability during use.

pub mod config;
pub mod crafting;
pub mod describe;
pub mod error;
pub mod material;
pub mod persistence;

pub use config::MaterialsConfig;
pub use crafting::{compose, ComposedTool, PartKind, ToolKind, ToolPart};
pub use error::{MaterialError, Result};
pub use material::{Material, MaterialRegistry, MaterialSource};
pub use persistence::{ItemTag, TagStore, TagValue};
