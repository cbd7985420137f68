//! Plain-text summaries of materials and tools.

use crate::crafting::{part_recipe, ComposedTool, PartKind};
use crate::material::Material;

/// How a multiplier compares to the neutral value of 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTrend {
    Neutral,
    Better,
    Worse,
}

impl StatTrend {
    pub fn of(multiplier: f64) -> Self {
        if multiplier == 1.0 {
            StatTrend::Neutral
        } else if multiplier > 1.0 {
            StatTrend::Better
        } else {
            StatTrend::Worse
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            StatTrend::Neutral => "=",
            StatTrend::Better => "+",
            StatTrend::Worse => "-",
        }
    }
}

/// Bucket for remaining durability, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurabilityBand {
    Healthy,
    Worn,
    Critical,
}

impl DurabilityBand {
    pub fn of(percent: f64) -> Self {
        if percent >= 70.0 {
            DurabilityBand::Healthy
        } else if percent >= 40.0 {
            DurabilityBand::Worn
        } else {
            DurabilityBand::Critical
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DurabilityBand::Healthy => "healthy",
            DurabilityBand::Worn => "worn",
            DurabilityBand::Critical => "critical",
        }
    }
}

/// Format with at most two decimals, dropping trailing zeros
pub fn two_decimals(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Lines describing a material as both a handle and a head
pub fn describe_material(material: &Material) -> Vec<String> {
    let mut lines = vec![
        format!("{}{}", material.name, if material.bright { " (bright)" } else { "" }),
        format!("  head durability: {}", material.head_durability),
        format!("  mining level: {}", material.mining_level),
        format!("  head speed: {}", two_decimals(material.head_speed)),
        format!("  head attack damage: {}", two_decimals(material.head_attack_damage)),
        format!(
            "  handle durability: x{} ({})",
            two_decimals(material.handle_durability_multiplier),
            StatTrend::of(material.handle_durability_multiplier).symbol()
        ),
        format!(
            "  handle speed: x{} ({})",
            two_decimals(material.handle_breaking_speed_multiplier),
            StatTrend::of(material.handle_breaking_speed_multiplier).symbol()
        ),
        format!("  handle attack damage: {}", two_decimals(material.handle_attack_damage)),
        format!(
            "  colors: handle {}, head {}",
            material.handle_color, material.head_color
        ),
    ];

    for kind in PartKind::all() {
        let recipe = part_recipe(material, *kind);
        if recipe.is_empty() {
            continue;
        }
        let cost: Vec<String> = recipe
            .iter()
            .map(|(ingredient, count)| format!("{count} {ingredient}"))
            .collect();
        lines.push(format!("  {}: {}", kind.display_name(), cost.join(" or ")));
    }
    lines
}

/// Lines describing a composed tool
pub fn describe_tool(tool: &ComposedTool) -> Vec<String> {
    let percent = tool.durability_percent() * 100.0;
    vec![
        tool.display_name(),
        format!(
            "  durability: {}/{} ({}%, {})",
            tool.current_durability(),
            tool.max_durability(),
            two_decimals(percent),
            DurabilityBand::of(percent).name()
        ),
        format!("  mining level: {}", tool.mining_level),
        format!("  breaking speed: {}", two_decimals(tool.breaking_speed)),
        format!("  attack damage: {}", two_decimals(tool.attack_damage)),
    ]
}
