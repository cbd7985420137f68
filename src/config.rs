use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::material::{MaterialPack, MaterialRegistry};

const BUILTIN_MATERIALS: &str = include_str!("../assets/default_materials.toml");

/// A material pack document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialsConfig {
    #[serde(default)]
    pub packs: Vec<MaterialPack>,
}

impl MaterialsConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// The pack shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_MATERIALS)
    }

    /// Builtin packs plus the packs of an optional user file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::builtin()?;
        if let Some(path) = path {
            config.packs.extend(Self::from_file(path)?.packs);
        }
        Ok(config)
    }

    pub fn into_registry(self) -> MaterialRegistry {
        MaterialRegistry::from_packs(self.packs)
    }
}
