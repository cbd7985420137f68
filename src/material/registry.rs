//! Lookup of loaded materials.

use std::sync::Arc;

use tracing::{info, warn};

use super::types::{Material, MaterialPack};

/// Anything that can resolve materials by name
pub trait MaterialSource {
    /// Case-insensitive lookup; the first match in registration order wins
    fn lookup_by_name(&self, name: &str) -> Option<&Material>;

    /// Every material in registration order
    fn all_materials(&self) -> impl Iterator<Item = &Material>;
}

/// An immutable, fully loaded set of packs
#[derive(Debug, Clone, Default)]
pub struct MaterialSet {
    packs: Vec<MaterialPack>,
}

impl MaterialSet {
    /// Build a set, moving default packs after every custom pack
    pub fn new(packs: Vec<MaterialPack>) -> Self {
        let (defaults, mut custom): (Vec<_>, Vec<_>) =
            packs.into_iter().partition(|p| p.default);
        custom.extend(defaults);
        let set = Self { packs: custom };
        set.warn_duplicates();
        set
    }

    /// Packs in registration order
    pub fn packs(&self) -> &[MaterialPack] {
        &self.packs
    }

    /// Number of materials across all packs
    pub fn len(&self) -> usize {
        self.packs.iter().map(|p| p.materials.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn warn_duplicates(&self) {
        let mut seen: Vec<&str> = Vec::new();
        for material in self.all_materials() {
            if seen.iter().any(|s| s.eq_ignore_ascii_case(&material.name)) {
                warn!(
                    "Duplicate material name '{}'; the earlier definition takes precedence",
                    material.name
                );
            } else {
                seen.push(&material.name);
            }
        }
    }
}

impl MaterialSource for MaterialSet {
    fn lookup_by_name(&self, name: &str) -> Option<&Material> {
        self.all_materials().find(|m| m.is_named(name))
    }

    fn all_materials(&self) -> impl Iterator<Item = &Material> {
        self.packs.iter().flat_map(|p| p.materials.iter())
    }
}

/// Owner of the current material set.
///
/// Reloading swaps the whole set at once. Callers holding a [`snapshot`]
/// keep seeing the set they started with.
///
/// [`snapshot`]: MaterialRegistry::snapshot
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    current: Arc<MaterialSet>,
}

impl MaterialRegistry {
    pub fn new(set: MaterialSet) -> Self {
        Self {
            current: Arc::new(set),
        }
    }

    /// Create a registry from packs
    pub fn from_packs(packs: Vec<MaterialPack>) -> Self {
        Self::new(MaterialSet::new(packs))
    }

    /// The set currently in effect
    pub fn snapshot(&self) -> Arc<MaterialSet> {
        Arc::clone(&self.current)
    }

    /// Replace every loaded material
    pub fn reload(&mut self, packs: Vec<MaterialPack>) {
        let set = MaterialSet::new(packs);
        info!(
            "Reloaded {} materials from {} packs",
            set.len(),
            set.packs().len()
        );
        self.current = Arc::new(set);
    }

    pub fn packs(&self) -> &[MaterialPack] {
        self.current.packs()
    }
}

impl MaterialSource for MaterialRegistry {
    fn lookup_by_name(&self, name: &str) -> Option<&Material> {
        self.current.lookup_by_name(name)
    }

    fn all_materials(&self) -> impl Iterator<Item = &Material> {
        self.current.all_materials()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PackInfo;

    fn material(name: &str, durability: i32) -> Material {
        Material {
            name: name.to_string(),
            head_durability: durability,
            ..Material::dummy()
        }
    }

    fn pack(name: &str, default: bool, materials: Vec<Material>) -> MaterialPack {
        MaterialPack {
            info: PackInfo {
                name: name.to_string(),
                description: String::new(),
                version: "1.0.0".to_string(),
                authors: Vec::new(),
            },
            default,
            materials,
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry =
            MaterialRegistry::from_packs(vec![pack("base", true, vec![material("Iron", 250)])]);
        assert!(registry.lookup_by_name("iron").is_some());
        assert!(registry.lookup_by_name("IRON").is_some());
        assert!(registry.lookup_by_name("copper").is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let registry = MaterialRegistry::from_packs(vec![pack(
            "base",
            false,
            vec![material("Iron", 250), material("iron", 999)],
        )]);
        assert_eq!(registry.lookup_by_name("IRON").unwrap().head_durability, 250);
    }

    #[test]
    fn test_default_pack_ordered_last() {
        let registry = MaterialRegistry::from_packs(vec![
            pack("default", true, vec![material("Iron", 250)]),
            pack("custom", false, vec![material("Iron", 500)]),
        ]);
        assert_eq!(registry.packs()[0].info.name, "custom");
        assert_eq!(registry.lookup_by_name("iron").unwrap().head_durability, 500);
        let names: Vec<_> = registry.all_materials().map(|m| m.head_durability).collect();
        assert_eq!(names, vec![500, 250]);
    }

    #[test]
    fn test_reload_replaces_whole_set() {
        let mut registry =
            MaterialRegistry::from_packs(vec![pack("a", false, vec![material("Iron", 250)])]);
        let before = registry.snapshot();

        registry.reload(vec![pack("b", false, vec![material("Gold", 32)])]);

        assert!(registry.lookup_by_name("iron").is_none());
        assert!(registry.lookup_by_name("gold").is_some());
        // Old snapshot is untouched
        assert!(before.lookup_by_name("iron").is_some());
        assert!(before.lookup_by_name("gold").is_none());
    }

    #[test]
    fn test_empty_set() {
        let set = MaterialSet::default();
        assert!(set.is_empty());
        assert_eq!(set.all_materials().count(), 0);
    }
}
