//! Hero Stats & Combat Scoring
//!
//! The six-attribute stat block shared by raw and processed heroes, plus
//! the weighted combat score that everything downstream (rarity tiers,
//! stat scaling) is derived from.

use serde::{Deserialize, Serialize};

use super::rarity::Rarity;

/// Weighted contribution of each attribute to the combat score.
/// Weights sum to 1.0, so a maxed-out stat block scores exactly 100.
const WEIGHT_STRENGTH: f64 = 0.20;
const WEIGHT_SPEED: f64 = 0.15;
const WEIGHT_POWER: f64 = 0.25;
const WEIGHT_DURABILITY: f64 = 0.20;
const WEIGHT_COMBAT: f64 = 0.15;
const WEIGHT_INTELLIGENCE: f64 = 0.05;

/// A hero's six core attributes, each clamped to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroStats {
    pub strength: u32,
    pub speed: u32,
    pub power: u32,
    pub durability: u32,
    pub combat: u32,
    pub intelligence: u32,
}

impl HeroStats {
    /// Build a stat block, clamping every field into [0, 100].
    pub fn new(
        strength: u32,
        speed: u32,
        power: u32,
        durability: u32,
        combat: u32,
        intelligence: u32,
    ) -> Self {
        Self {
            strength: strength.min(100),
            speed: speed.min(100),
            power: power.min(100),
            durability: durability.min(100),
            combat: combat.min(100),
            intelligence: intelligence.min(100),
        }
    }

    /// Weighted combat score in [0, 100]. Pure and deterministic.
    pub fn combat_score(&self) -> f64 {
        self.strength as f64 * WEIGHT_STRENGTH
            + self.speed as f64 * WEIGHT_SPEED
            + self.power as f64 * WEIGHT_POWER
            + self.durability as f64 * WEIGHT_DURABILITY
            + self.combat as f64 * WEIGHT_COMBAT
            + self.intelligence as f64 * WEIGHT_INTELLIGENCE
    }

    /// Apply the rarity multiplier to every attribute, capped at 100.
    pub fn scaled_by(&self, rarity: Rarity) -> Self {
        let mult = rarity.stat_multiplier();
        let scale = |v: u32| ((v as f64 * mult) as u32).min(100);
        Self {
            strength: scale(self.strength),
            speed: scale(self.speed),
            power: scale(self.power),
            durability: scale(self.durability),
            combat: scale(self.combat),
            intelligence: scale(self.intelligence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_clamps_to_valid_range() {
        let stats = HeroStats::new(250, 101, 100, 0, 50, 9999);
        assert_eq!(stats.strength, 100);
        assert_eq!(stats.speed, 100);
        assert_eq!(stats.power, 100);
        assert_eq!(stats.durability, 0);
        assert_eq!(stats.combat, 50);
        assert_eq!(stats.intelligence, 100);
    }

    #[test]
    fn test_combat_score_known_value() {
        let stats = HeroStats::new(80, 60, 90, 70, 50, 40);
        // 80*0.2 + 60*0.15 + 90*0.25 + 70*0.2 + 50*0.15 + 40*0.05 = 71.0
        assert!((stats.combat_score() - 71.0).abs() < 1e-9);
    }

    #[test]
    fn test_combat_score_extremes() {
        let zero = HeroStats::new(0, 0, 0, 0, 0, 0);
        let max = HeroStats::new(100, 100, 100, 100, 100, 100);
        assert_eq!(zero.combat_score(), 0.0);
        assert!((max.combat_score() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaled_by_legendary_caps_at_100() {
        let stats = HeroStats::new(80, 90, 100, 40, 60, 20);
        let scaled = stats.scaled_by(Rarity::Legendary);
        assert_eq!(scaled.strength, 100); // 80 * 1.5 = 120, capped
        assert_eq!(scaled.durability, 60); // 40 * 1.5
        assert_eq!(scaled.intelligence, 30); // 20 * 1.5
    }

    #[test]
    fn test_scaled_by_common_reduces() {
        let stats = HeroStats::new(50, 50, 50, 50, 50, 50);
        let scaled = stats.scaled_by(Rarity::Common);
        assert_eq!(scaled.strength, 40); // 50 * 0.8
    }

    proptest! {
        #[test]
        fn prop_combat_score_bounded(
            strength in 0u32..=100,
            speed in 0u32..=100,
            power in 0u32..=100,
            durability in 0u32..=100,
            combat in 0u32..=100,
            intelligence in 0u32..=100,
        ) {
            let stats = HeroStats::new(strength, speed, power, durability, combat, intelligence);
            let score = stats.combat_score();
            prop_assert!(score >= 0.0);
            prop_assert!(score <= 100.0);
            // Deterministic: same input, same output.
            prop_assert_eq!(score, stats.combat_score());
        }

        #[test]
        fn prop_scaling_stays_in_range(
            strength in 0u32..=100,
            speed in 0u32..=100,
            power in 0u32..=100,
        ) {
            let stats = HeroStats::new(strength, speed, power, 50, 50, 50);
            for rarity in Rarity::ALL {
                let scaled = stats.scaled_by(rarity);
                prop_assert!(scaled.strength <= 100);
                prop_assert!(scaled.speed <= 100);
                prop_assert!(scaled.power <= 100);
            }
        }
    }
}
