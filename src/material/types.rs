//! Material definitions and the packs that ship them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MaterialError;

/// A packed `0xRRGGBB` tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ColorValue", into = "u32")]
pub struct Color(pub u32);

/// A color as written in a pack file: a plain integer or a hex string.
///
/// Integers keep their low 32 bits, so signed ARGB values such as
/// `-16777216` read as `0xFF000000`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Int(i64),
    Hex(String),
}

impl Color {
    /// Parse `#RRGGBB`, `0xRRGGBB` or a decimal integer
    pub fn parse(s: &str) -> Result<Self, MaterialError> {
        let trimmed = s.trim();
        let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
            u32::from_str_radix(hex, 16)
        } else if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            u32::from_str_radix(hex, 16)
        } else {
            trimmed.parse::<u32>()
        };
        parsed
            .map(Color)
            .map_err(|_| MaterialError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<ColorValue> for Color {
    type Error = MaterialError;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Int(v) => Ok(Color((v & 0xFFFF_FFFF) as u32)),
            ColorValue::Hex(s) => Color::parse(&s),
        }
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// A named bundle of stat contributions used to build tool parts.
///
/// Head stats apply when the material is used as a head, handle stats when
/// it is used as a handle. Values are not validated: a malformed pack
/// produces odd but well-defined composed stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub head_durability: i32,
    pub mining_level: i32,
    pub head_speed: f64,
    pub head_attack_damage: f64,
    pub handle_durability_multiplier: f64,
    pub handle_breaking_speed_multiplier: f64,
    pub handle_attack_damage: f64,
    #[serde(default)]
    pub handle_color: Color,
    #[serde(default)]
    pub head_color: Color,
    /// Rendered without shading
    #[serde(default)]
    pub bright: bool,
    /// Ingredient id -> fraction of a part unit one ingredient item is worth
    #[serde(default)]
    pub ingredients: BTreeMap<String, f64>,
}

impl Material {
    /// Stand-in used by callers when a stored material name no longer resolves
    pub fn dummy() -> Self {
        Self {
            name: "dummy".to_string(),
            head_durability: 0,
            mining_level: 0,
            head_speed: 1.0,
            head_attack_damage: 0.0,
            handle_durability_multiplier: 1.0,
            handle_breaking_speed_multiplier: 1.0,
            handle_attack_damage: 0.0,
            handle_color: Color::default(),
            head_color: Color::default(),
            bright: false,
            ingredients: BTreeMap::new(),
        }
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Descriptive metadata of a material pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub authors: Vec<String>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// A set of materials loaded together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPack {
    pub info: PackInfo,
    /// The default pack is listed after every custom pack
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub materials: Vec<Material>,
}
