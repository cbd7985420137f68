//! Tool kinds and composed tool instances.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{MaterialError, Result};
use crate::material::{Color, Material, MaterialSource};
use crate::persistence::{keys, TagStore};

use super::parts::{PartKind, ToolPart};

/// Types of tools that can be composed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Pickaxe,
    Axe,
    Shovel,
}

impl ToolKind {
    /// Flat attack damage added on top of the averaged material damage
    pub fn attack_bonus(&self) -> f64 {
        match self {
            ToolKind::Pickaxe => 1.0,
            ToolKind::Axe => 6.0,
            ToolKind::Shovel => 1.5,
        }
    }

    /// The head part this tool is built from
    pub fn head_part(&self) -> PartKind {
        match self {
            ToolKind::Pickaxe => PartKind::PickaxeHead,
            ToolKind::Axe => PartKind::AxeHead,
            ToolKind::Shovel => PartKind::ShovelHead,
        }
    }

    /// Stem of the per-head tag keys
    pub fn head_key(&self) -> &'static str {
        match self {
            ToolKind::Pickaxe => "pickaxe_head",
            ToolKind::Axe => "axe_head",
            ToolKind::Shovel => "shovel_head",
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Pickaxe => "pickaxe",
            ToolKind::Axe => "axe",
            ToolKind::Shovel => "shovel",
        }
    }

    /// Parse tool kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().trim() {
            "pickaxe" | "pick" => Some(ToolKind::Pickaxe),
            "axe" | "hatchet" => Some(ToolKind::Axe),
            "shovel" | "spade" => Some(ToolKind::Shovel),
            _ => None,
        }
    }

    pub fn all() -> &'static [ToolKind] {
        &[ToolKind::Pickaxe, ToolKind::Axe, ToolKind::Shovel]
    }
}

impl std::str::FromStr for ToolKind {
    type Err = MaterialError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| MaterialError::UnknownToolKind(s.to_string()))
    }
}

/// A finished tool with derived, persisted stats.
///
/// `max_durability` is fixed at composition. `durability` only changes
/// through [`set_current_durability`](ComposedTool::set_current_durability)
/// and damage application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedTool {
    pub id: Uuid,
    pub kind: ToolKind,
    pub(crate) durability: i32,
    max_durability: i32,
    pub mining_level: i32,
    pub breaking_speed: f64,
    pub attack_damage: f64,
    pub handle_material: String,
    pub head_material: String,
    pub handle_color: Color,
    pub head_color: Color,
    pub handle_bright: bool,
    pub head_bright: bool,
}

/// Derive a tool from a handle material and a head material
pub fn compose(kind: ToolKind, handle: &Material, head: &Material) -> ComposedTool {
    let max_durability =
        (f64::from(head.head_durability) * handle.handle_durability_multiplier).floor() as i32;
    let mining_level =
        ((f64::from(handle.mining_level) + f64::from(head.mining_level)) / 2.0).ceil() as i32;
    let breaking_speed = head.head_speed * handle.handle_breaking_speed_multiplier;
    let attack_damage =
        (head.head_attack_damage + handle.handle_attack_damage) / 2.0 + kind.attack_bonus();

    debug!(
        "Composed {} from {} handle and {} head: durability {}, mining level {}, speed {:.2}, damage {:.2}",
        kind.display_name(),
        handle.name,
        head.name,
        max_durability,
        mining_level,
        breaking_speed,
        attack_damage
    );

    ComposedTool {
        id: Uuid::new_v4(),
        kind,
        durability: max_durability,
        max_durability,
        mining_level,
        breaking_speed,
        attack_damage,
        handle_material: handle.name.clone(),
        head_material: head.name.clone(),
        handle_color: handle.handle_color,
        head_color: head.head_color,
        handle_bright: handle.bright,
        head_bright: head.bright,
    }
}

/// Compose by material names
pub fn compose_by_name<S: MaterialSource>(
    source: &S,
    kind: ToolKind,
    handle: &str,
    head: &str,
) -> Result<ComposedTool> {
    let handle = source
        .lookup_by_name(handle)
        .ok_or_else(|| MaterialError::UnknownMaterial(handle.to_string()))?;
    let head = source
        .lookup_by_name(head)
        .ok_or_else(|| MaterialError::UnknownMaterial(head.to_string()))?;
    Ok(compose(kind, handle, head))
}

/// Compose from a handle part and a head part; the head decides the tool kind
pub fn compose_from_parts<S: MaterialSource>(
    source: &S,
    handle: &ToolPart,
    head: &ToolPart,
) -> Result<ComposedTool> {
    let kind = match (handle.kind, head.kind.tool_kind()) {
        (PartKind::Handle, Some(kind)) => kind,
        _ => {
            return Err(MaterialError::MismatchedParts {
                handle: handle.kind.display_name(),
                head: head.kind.display_name(),
            });
        }
    };
    let handle_material = handle
        .material(source)
        .ok_or_else(|| MaterialError::UnknownMaterial(handle.material.clone()))?;
    let head_material = head
        .material(source)
        .ok_or_else(|| MaterialError::UnknownMaterial(head.material.clone()))?;
    Ok(compose(kind, handle_material, head_material))
}

impl ComposedTool {
    pub fn current_durability(&self) -> i32 {
        self.durability
    }

    pub fn max_durability(&self) -> i32 {
        self.max_durability
    }

    /// Store a new durability, clamped to `[0, max_durability]`
    pub fn set_current_durability(&mut self, value: i32) {
        self.durability = value.min(self.max_durability).max(0);
    }

    /// True when every derived stat matches, ignoring instance identity
    pub fn same_stats(&self, other: &ComposedTool) -> bool {
        self.kind == other.kind
            && self.durability == other.durability
            && self.max_durability == other.max_durability
            && self.mining_level == other.mining_level
            && self.breaking_speed == other.breaking_speed
            && self.attack_damage == other.attack_damage
            && self.handle_material == other.handle_material
            && self.head_material == other.head_material
            && self.handle_color == other.handle_color
            && self.head_color == other.head_color
            && self.handle_bright == other.handle_bright
            && self.head_bright == other.head_bright
    }

    /// Durability as a fraction of max
    pub fn durability_percent(&self) -> f64 {
        if self.max_durability <= 0 {
            0.0
        } else {
            f64::from(self.durability) / f64::from(self.max_durability)
        }
    }

    /// Display name, e.g. "oak-handled iron pickaxe"
    pub fn display_name(&self) -> String {
        format!(
            "{}-handled {} {}",
            self.handle_material.to_lowercase(),
            self.head_material.to_lowercase(),
            self.kind.display_name()
        )
    }

    /// Persist every field onto an item tag
    pub fn write_to<T: TagStore>(&self, tag: &mut T) {
        let head = self.kind.head_key();
        tag.put_str(keys::ID, &self.id.to_string());
        tag.put_int(&keys::color(0), self.handle_color.0 as i32);
        tag.put_int(&keys::color(1), self.head_color.0 as i32);
        tag.put_int(keys::MAX_DURABILITY, self.max_durability);
        tag.put_int(keys::DURABILITY, self.durability);
        tag.put_int(keys::MINING_LEVEL, self.mining_level);
        tag.put_float(keys::BREAKING_SPEED, self.breaking_speed);
        tag.put_float(keys::DAMAGE, self.attack_damage);
        tag.put_bool(keys::DONE_TOOL, true);
        if self.handle_bright {
            tag.put_bool(keys::HANDLE_BRIGHT, true);
        }
        if self.head_bright {
            tag.put_bool(&keys::head_bright(head), true);
        }
        tag.put_str(keys::HANDLE_MATERIAL, &self.handle_material);
        tag.put_str(&keys::head_material(head), &self.head_material);
    }

    /// Read a tool of `kind` back from a tag, falling back to the stock
    /// defaults for absent fields
    pub fn read_from<T: TagStore>(kind: ToolKind, tag: &T) -> Self {
        let head = kind.head_key();
        let max_durability = tag.get_int(keys::MAX_DURABILITY).unwrap_or(1);
        let id = tag
            .get_str(keys::ID)
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);
        Self {
            id,
            kind,
            durability: tag.get_int(keys::DURABILITY).unwrap_or(max_durability),
            max_durability,
            mining_level: tag.get_int(keys::MINING_LEVEL).unwrap_or(0),
            breaking_speed: tag.get_float(keys::BREAKING_SPEED).unwrap_or(1.0),
            attack_damage: tag.get_float(keys::DAMAGE).unwrap_or(1.0),
            handle_material: tag
                .get_str(keys::HANDLE_MATERIAL)
                .unwrap_or_default()
                .to_string(),
            head_material: tag
                .get_str(&keys::head_material(head))
                .unwrap_or_default()
                .to_string(),
            handle_color: Color(tag.get_int(&keys::color(0)).unwrap_or(0) as u32),
            head_color: Color(tag.get_int(&keys::color(1)).unwrap_or(0) as u32),
            handle_bright: tag.get_bool(keys::HANDLE_BRIGHT),
            head_bright: tag.get_bool(&keys::head_bright(head)),
        }
    }
}
