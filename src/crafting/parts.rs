//! Handles and heads made from a single material.

use serde::{Deserialize, Serialize};

use crate::error::MaterialError;
use crate::material::{Color, Material, MaterialSource};
use crate::persistence::{keys, TagStore};

use super::tools::ToolKind;

/// Kinds of parts a material can be shaped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    Handle,
    PickaxeHead,
    AxeHead,
    ShovelHead,
}

/// A handle or head tagged with the material it was made from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPart {
    pub kind: PartKind,
    pub material: String,
    pub color: Color,
    pub bright: bool,
}

impl PartKind {
    /// Part units consumed by the pattern for this part
    pub fn pattern_cost(&self) -> f64 {
        match self {
            PartKind::Handle => 1.0,
            PartKind::PickaxeHead | PartKind::AxeHead | PartKind::ShovelHead => 4.0,
        }
    }

    /// Tool this head builds; `None` for handles
    pub fn tool_kind(&self) -> Option<ToolKind> {
        match self {
            PartKind::Handle => None,
            PartKind::PickaxeHead => Some(ToolKind::Pickaxe),
            PartKind::AxeHead => Some(ToolKind::Axe),
            PartKind::ShovelHead => Some(ToolKind::Shovel),
        }
    }

    pub fn is_head(&self) -> bool {
        self.tool_kind().is_some()
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PartKind::Handle => "tool handle",
            PartKind::PickaxeHead => "pickaxe head",
            PartKind::AxeHead => "axe head",
            PartKind::ShovelHead => "shovel head",
        }
    }

    /// Parse part kind from string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.to_lowercase().replace([' ', '-'], "_");
        match s.as_str() {
            "handle" | "tool_handle" => Some(PartKind::Handle),
            "pickaxe_head" | "pickaxe" => Some(PartKind::PickaxeHead),
            "axe_head" | "axe" => Some(PartKind::AxeHead),
            "shovel_head" | "shovel" => Some(PartKind::ShovelHead),
            _ => None,
        }
    }

    pub fn all() -> &'static [PartKind] {
        &[
            PartKind::Handle,
            PartKind::PickaxeHead,
            PartKind::AxeHead,
            PartKind::ShovelHead,
        ]
    }
}

impl std::str::FromStr for PartKind {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| MaterialError::UnknownPartKind(s.to_string()))
    }
}

/// Shape `material` into a part of the given kind
pub fn create_part(kind: PartKind, material: &Material) -> ToolPart {
    let color = match kind {
        PartKind::Handle => material.handle_color,
        _ => material.head_color,
    };
    ToolPart {
        kind,
        material: material.name.clone(),
        color,
        bright: material.bright,
    }
}

/// Ingredient counts needed to make a part: `ceil(pattern cost / fraction)`
/// per ingredient, in ingredient order
pub fn part_recipe(material: &Material, kind: PartKind) -> Vec<(String, u32)> {
    material
        .ingredients
        .iter()
        .map(|(ingredient, fraction)| {
            let count = (kind.pattern_cost() / fraction).ceil() as u32;
            (ingredient.clone(), count)
        })
        .collect()
}

impl ToolPart {
    /// Resolve the source material, if it is still loaded
    pub fn material<'a, S: MaterialSource>(&self, source: &'a S) -> Option<&'a Material> {
        source.lookup_by_name(&self.material)
    }

    /// Persist onto an item tag
    pub fn write_to<T: TagStore>(&self, tag: &mut T) {
        tag.put_int(&keys::color(0), self.color.0 as i32);
        tag.put_str(keys::MATERIAL, &self.material);
        if self.bright {
            tag.put_bool(keys::BRIGHT, true);
        }
    }

    /// Read a part of `kind` back; `None` when no material is recorded
    pub fn read_from<T: TagStore>(kind: PartKind, tag: &T) -> Option<Self> {
        let material = tag.get_str(keys::MATERIAL)?.to_string();
        let color = tag.get_int(&keys::color(0)).unwrap_or(0) as u32;
        Some(Self {
            kind,
            material,
            color: Color(color),
            bright: tag.get_bool(keys::BRIGHT),
        })
    }

    /// Display name, e.g. "iron axe head"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.material.to_lowercase(), self.kind.display_name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::material::{MaterialRegistry, MaterialPack, PackInfo};
    use crate::persistence::ItemTag;

    fn iron() -> Material {
        let mut ingredients = BTreeMap::new();
        ingredients.insert("iron_ingot".to_string(), 1.0);
        ingredients.insert("iron_nugget".to_string(), 0.1);
        Material {
            name: "Iron".to_string(),
            head_durability: 250,
            mining_level: 2,
            head_speed: 6.0,
            head_attack_damage: 3.0,
            handle_durability_multiplier: 1.1,
            handle_breaking_speed_multiplier: 1.0,
            handle_attack_damage: 1.0,
            handle_color: Color(0xAAAAAA),
            head_color: Color(0xDDDDDD),
            bright: true,
            ingredients,
        }
    }

    #[test]
    fn test_part_uses_matching_color() {
        let handle = create_part(PartKind::Handle, &iron());
        let head = create_part(PartKind::AxeHead, &iron());
        assert_eq!(handle.color, Color(0xAAAAAA));
        assert_eq!(head.color, Color(0xDDDDDD));
        assert!(head.bright);
        assert_eq!(head.material, "Iron");
    }

    #[test]
    fn test_part_recipe_counts() {
        let recipe = part_recipe(&iron(), PartKind::Handle);
        assert_eq!(
            recipe,
            vec![("iron_ingot".to_string(), 1), ("iron_nugget".to_string(), 10)]
        );

        let recipe = part_recipe(&iron(), PartKind::PickaxeHead);
        assert_eq!(
            recipe,
            vec![("iron_ingot".to_string(), 4), ("iron_nugget".to_string(), 40)]
        );
    }

    #[test]
    fn test_part_tag_round_trip() {
        let part = create_part(PartKind::ShovelHead, &iron());
        let mut tag = ItemTag::new();
        part.write_to(&mut tag);
        assert_eq!(ToolPart::read_from(PartKind::ShovelHead, &tag), Some(part));
        assert_eq!(ToolPart::read_from(PartKind::Handle, &ItemTag::new()), None);
    }

    #[test]
    fn test_part_resolves_material() {
        let registry = MaterialRegistry::from_packs(vec![MaterialPack {
            info: PackInfo {
                name: "base".to_string(),
                description: String::new(),
                version: "1.0.0".to_string(),
                authors: Vec::new(),
            },
            default: true,
            materials: vec![iron()],
        }]);
        let mut part = create_part(PartKind::Handle, &iron());
        assert!(part.material(&registry).is_some());
        part.material = "unobtainium".to_string();
        assert!(part.material(&registry).is_none());
    }

    #[test]
    fn test_parse_part_kind() {
        assert_eq!(PartKind::parse("Axe Head"), Some(PartKind::AxeHead));
        assert_eq!(PartKind::parse("tool-handle"), Some(PartKind::Handle));
        assert!("blade".parse::<PartKind>().is_err());
        assert_eq!(PartKind::PickaxeHead.tool_kind(), Some(ToolKind::Pickaxe));
        assert!(!PartKind::Handle.is_head());
    }
}
