//! Durability loss and the host-facing damage view.

use rand::Rng;
use tracing::debug;

use crate::persistence::{keys, TagStore};

use super::tools::{ComposedTool, ToolKind};

/// Supplies the durability-enchantment level of an item
pub trait EnchantmentProvider {
    fn unbreaking_level(&self, tool: &ComposedTool) -> u32;
}

/// A fixed level, for callers that already know it
impl EnchantmentProvider for u32 {
    fn unbreaking_level(&self, _tool: &ComposedTool) -> u32 {
        *self
    }
}

/// Count how many of `amount` damage points the enchantment cancels.
///
/// Each point is cancelled independently with probability `1 / (level + 1)`.
pub fn mitigated_points<R: Rng + ?Sized>(amount: u32, level: u32, rng: &mut R) -> u32 {
    if level == 0 {
        return 0;
    }
    (0..amount).filter(|_| rng.gen_range(0..=level) == 0).count() as u32
}

impl ComposedTool {
    /// Check if tool is broken
    pub fn is_broken(&self) -> bool {
        self.durability <= 0
    }

    /// Consume durability. Returns `true` when durability actually dropped.
    ///
    /// Broken tools are never damaged further. The result is not clamped at
    /// zero, so a large hit may leave durability negative.
    pub fn apply_damage<R: Rng + ?Sized>(
        &mut self,
        amount: u32,
        enchantment_level: u32,
        rng: &mut R,
    ) -> bool {
        if self.is_broken() {
            return false;
        }

        let mitigated = mitigated_points(amount, enchantment_level, rng);
        let remaining = amount - mitigated;
        if remaining == 0 {
            debug!("All {} damage points on {} mitigated", amount, self.display_name());
            return false;
        }

        let before = self.durability;
        let loss = i32::try_from(remaining).unwrap_or(i32::MAX);
        self.durability = before.saturating_sub(loss).min(self.max_durability());
        debug!(
            "{} took {} damage ({} mitigated): {} -> {}",
            self.display_name(),
            remaining,
            mitigated,
            before,
            self.durability
        );
        self.durability < before
    }

    /// [`apply_damage`](ComposedTool::apply_damage) with the level taken from a provider
    pub fn apply_damage_with<P, R>(&mut self, amount: u32, provider: &P, rng: &mut R) -> bool
    where
        P: EnchantmentProvider + ?Sized,
        R: Rng + ?Sized,
    {
        let level = provider.unbreaking_level(self);
        self.apply_damage(amount, level, rng)
    }

    /// Damage as the host counts it: `max - current - 1`
    pub fn host_damage(&self) -> i32 {
        self.max_durability() - self.durability - 1
    }

    /// Set durability from a host damage value clamped to `[0, max]`
    pub fn set_host_damage(&mut self, damage: i32) {
        let max = self.max_durability();
        let damage = damage.min(max).max(0);
        self.set_current_durability(max - damage);
    }
}

/// Whether the host may damage an item at all
pub fn is_damageable<T: TagStore>(tag: &T) -> bool {
    !tag.get_bool(keys::UNBREAKABLE)
}

/// Apply damage to a tool persisted on `tag`, writing back only the durability
pub fn apply_damage_to_tag<T, R>(
    kind: ToolKind,
    tag: &mut T,
    amount: u32,
    enchantment_level: u32,
    rng: &mut R,
) -> bool
where
    T: TagStore,
    R: Rng + ?Sized,
{
    let mut tool = ComposedTool::read_from(kind, tag);
    let applied = tool.apply_damage(amount, enchantment_level, rng);
    if applied {
        tag.put_int(keys::DURABILITY, tool.current_durability());
    }
    applied
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::crafting::tools::compose;
    use crate::crafting::tools::tests::{iron, oak};
    use crate::material::Material;
    use crate::persistence::ItemTag;

    fn tool_with_max(max: i32) -> ComposedTool {
        let head = Material {
            head_durability: max,
            ..iron()
        };
        compose(ToolKind::Pickaxe, &oak(), &head)
    }

    #[test]
    fn test_damage_sequence_until_broken() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tool = tool_with_max(100);

        assert!(tool.apply_damage(30, 0, &mut rng));
        assert_eq!(tool.current_durability(), 70);

        assert!(tool.apply_damage(70, 0, &mut rng));
        assert_eq!(tool.current_durability(), 0);
        assert!(tool.is_broken());

        assert!(!tool.apply_damage(10, 0, &mut rng));
        assert_eq!(tool.current_durability(), 0);
    }

    #[test]
    fn test_no_enchantment_subtracts_full_amount() {
        let mut rng = StdRng::seed_from_u64(1);
        for amount in [1, 5, 17, 99] {
            let mut tool = tool_with_max(100);
            assert!(tool.apply_damage(amount, 0, &mut rng));
            assert_eq!(tool.current_durability(), 100 - amount as i32);
        }
    }

    #[test]
    fn test_overkill_goes_below_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tool = tool_with_max(10);
        assert!(tool.apply_damage(25, 0, &mut rng));
        assert_eq!(tool.current_durability(), -15);
        assert!(tool.is_broken());
        assert!(!tool.apply_damage(1, 0, &mut rng));
    }

    #[test]
    fn test_zero_amount_is_not_applied() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tool = tool_with_max(10);
        assert!(!tool.apply_damage(0, 0, &mut rng));
        assert!(!tool.apply_damage(0, 3, &mut rng));
        assert_eq!(tool.current_durability(), 10);
    }

    #[test]
    fn test_fully_mitigated_damage_is_not_applied() {
        // A constant zero stream cancels every point at any level
        let mut rng = StepRng::new(0, 0);
        let mut tool = tool_with_max(250);
        assert!(!tool.apply_damage(5, 2, &mut rng));
        assert_eq!(tool.current_durability(), 250);
        assert!(!tool.is_broken());
    }

    #[test]
    fn test_zero_max_durability_tool_is_broken() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tool = tool_with_max(0);
        assert!(tool.is_broken());
        assert!(!tool.apply_damage(5, 0, &mut rng));
    }

    #[test]
    fn test_enchantment_mitigates_some_points() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut tool = tool_with_max(100_000);
        let mut total_lost = 0;
        for _ in 0..100 {
            let before = tool.current_durability();
            tool.apply_damage(100, 3, &mut rng);
            let lost = before - tool.current_durability();
            assert!((0..=100).contains(&lost));
            total_lost += lost;
        }
        // Roughly a quarter of 10_000 points is cancelled at level 3
        assert!(total_lost > 6_500 && total_lost < 8_500, "lost {total_lost}");
    }

    #[test]
    fn test_mitigation_is_deterministic_per_seed() {
        let a = mitigated_points(500, 2, &mut StdRng::seed_from_u64(9));
        let b = mitigated_points(500, 2, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert!(a <= 500);
        assert_eq!(mitigated_points(500, 0, &mut StdRng::seed_from_u64(9)), 0);
    }

    #[test]
    fn test_apply_damage_with_provider() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut tool = tool_with_max(50);
        assert!(tool.apply_damage_with(10, &0u32, &mut rng));
        assert_eq!(tool.current_durability(), 40);
    }

    #[test]
    fn test_host_damage_view() {
        let mut tool = tool_with_max(100);
        assert_eq!(tool.host_damage(), -1);

        tool.set_host_damage(30);
        assert_eq!(tool.current_durability(), 70);
        assert_eq!(tool.host_damage(), 29);

        tool.set_host_damage(500);
        assert_eq!(tool.current_durability(), 0);

        tool.set_host_damage(-20);
        assert_eq!(tool.current_durability(), 100);
    }

    #[test]
    fn test_damage_through_tag_only_touches_durability() {
        let mut rng = StdRng::seed_from_u64(11);
        let tool = tool_with_max(100);
        let mut tag = ItemTag::new();
        tool.write_to(&mut tag);
        let before = tag.clone();

        assert!(apply_damage_to_tag(ToolKind::Pickaxe, &mut tag, 40, 0, &mut rng));
        assert_eq!(tag.get_int(keys::DURABILITY), Some(60));

        let mut expected = before;
        expected.put_int(keys::DURABILITY, 60);
        assert_eq!(tag, expected);
    }

    #[test]
    fn test_unbreakable_flag() {
        let mut tag = ItemTag::new();
        assert!(is_damageable(&tag));
        tag.put_bool(keys::UNBREAKABLE, true);
        assert!(!is_damageable(&tag));
    }
}
