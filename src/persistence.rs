//! Key-value storage attached to an item.
//!
//! Tools and parts persist their state as named fields on whatever storage
//! the host provides. [`ItemTag`] is the in-crate implementation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Field names written by this crate
pub mod keys {
    pub const DURABILITY: &str = "mt_durability";
    pub const MAX_DURABILITY: &str = "mt_maxdurability";
    pub const MINING_LEVEL: &str = "mt_mininglevel";
    pub const BREAKING_SPEED: &str = "mt_breakingspeed";
    pub const DAMAGE: &str = "mt_damage";
    pub const MATERIAL: &str = "mt_material";
    pub const BRIGHT: &str = "mt_bright";
    pub const DONE_TOOL: &str = "mt_done_tool";
    pub const HANDLE_MATERIAL: &str = "mt_handle_material";
    pub const HANDLE_BRIGHT: &str = "mt_handle_bright";
    pub const ID: &str = "mt_id";
    pub const UNBREAKABLE: &str = "Unbreakable";

    /// Tint of render layer `layer`
    pub fn color(layer: usize) -> String {
        format!("mt_color_{layer}")
    }

    /// Material name of a head part, e.g. `mt_axe_head_material`
    pub fn head_material(head: &str) -> String {
        format!("mt_{head}_material")
    }

    /// Bright flag of a head part, e.g. `mt_axe_head_bright`
    pub fn head_bright(head: &str) -> String {
        format!("mt_{head}_bright")
    }
}

/// A single stored field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

/// Typed access to named fields on an item
pub trait TagStore {
    fn get(&self, key: &str) -> Option<&TagValue>;
    fn put(&mut self, key: &str, value: TagValue);
    fn remove(&mut self, key: &str) -> Option<TagValue>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Integer field; floats are truncated
    fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            TagValue::Int(v) => Some(*v),
            TagValue::Float(v) => Some(*v as i32),
            _ => None,
        }
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            TagValue::Float(v) => Some(*v),
            TagValue::Int(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            TagValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Missing or non-boolean fields read as `false`
    fn get_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some(TagValue::Bool(true)))
    }

    fn put_int(&mut self, key: &str, value: i32) {
        self.put(key, TagValue::Int(value));
    }

    fn put_float(&mut self, key: &str, value: f64) {
        self.put(key, TagValue::Float(value));
    }

    fn put_str(&mut self, key: &str, value: &str) {
        self.put(key, TagValue::Str(value.to_string()));
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.put(key, TagValue::Bool(value));
    }
}

/// Ordered in-memory tag, serializable to JSON for inspection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemTag {
    fields: BTreeMap<String, TagValue>,
}

impl ItemTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TagStore for ItemTag {
    fn get(&self, key: &str) -> Option<&TagValue> {
        self.fields.get(key)
    }

    fn put(&mut self, key: &str, value: TagValue) {
        self.fields.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<TagValue> {
        self.fields.remove(key)
    }
}
