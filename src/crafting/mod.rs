//! Tool composition from handle and head materials.

pub mod durability;
pub mod parts;
pub mod tools;

pub use durability::{apply_damage_to_tag, is_damageable, mitigated_points, EnchantmentProvider};
pub use parts::{create_part, part_recipe, PartKind, ToolPart};
pub use tools::{compose, compose_by_name, compose_from_parts, ComposedTool, ToolKind};
