//! Rarity Tiers
//!
//! Rarity is assigned from a hero's combat score against percentile
//! cutpoints computed once from the whole population, so tier boundaries
//! are consistent across a batch. A `TierAssigner` must not be reused
//! against a different population.

use serde::{Deserialize, Serialize};

/// Rarity tier, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    /// Stat multiplier applied to a hero's attributes for this tier.
    pub fn stat_multiplier(&self) -> f64 {
        match self {
            Rarity::Legendary => 1.5,
            Rarity::Epic => 1.25,
            Rarity::Rare => 1.0,
            Rarity::Common => 0.8,
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rarity::Common => write!(f, "Common"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Epic => write!(f, "Epic"),
            Rarity::Legendary => write!(f, "Legendary"),
        }
    }
}

/// Percentile cutpoints frozen against one population of combat scores.
#[derive(Debug, Clone)]
pub struct TierAssigner {
    legendary_cut: f64,
    epic_cut: f64,
    rare_cut: f64,
}

impl TierAssigner {
    /// Compute the 95th/85th/60th percentile cutpoints from the full
    /// population. Must be called with every score in the batch before
    /// any hero is classified.
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut sorted = scores.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Self {
            legendary_cut: percentile(&sorted, 95.0),
            epic_cut: percentile(&sorted, 85.0),
            rare_cut: percentile(&sorted, 60.0),
        }
    }

    /// Classify a score against the frozen cutpoints, highest tier first.
    pub fn classify(&self, score: f64) -> Rarity {
        if score >= self.legendary_cut {
            Rarity::Legendary
        } else if score >= self.epic_cut {
            Rarity::Epic
        } else if score >= self.rare_cut {
            Rarity::Rare
        } else {
            Rarity::Common
        }
    }
}

/// Linear-interpolated percentile over a sorted slice, matching the
/// default NumPy method. Returns 0.0 on an empty slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted = vec![10.0, 20.0, 30.0, 40.0];
        // rank = 0.5 * 3 = 1.5 -> 20 + 0.5 * (30 - 20) = 25
        assert!((percentile(&sorted, 50.0) - 25.0).abs() < 1e-9);
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 100.0), 40.0);
    }

    #[test]
    fn test_percentile_degenerate_inputs() {
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(percentile(&[42.0], 95.0), 42.0);
    }

    #[test]
    fn test_classify_orders_tiers() {
        let scores: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let assigner = TierAssigner::from_scores(&scores);
        assert_eq!(assigner.classify(100.0), Rarity::Legendary);
        assert_eq!(assigner.classify(90.0), Rarity::Epic);
        assert_eq!(assigner.classify(70.0), Rarity::Rare);
        assert_eq!(assigner.classify(5.0), Rarity::Common);
    }

    #[test]
    fn test_tier_partition_is_monotonic() {
        // Uneven population: thresholds still partition by score.
        let scores: Vec<f64> = (0..40).map(|i| (i * i % 97) as f64).collect();
        assert!(scores.len() >= 20);
        let assigner = TierAssigner::from_scores(&scores);

        let mut tier_minimums: std::collections::HashMap<Rarity, f64> =
            std::collections::HashMap::new();
        for &score in &scores {
            let tier = assigner.classify(score);
            let entry = tier_minimums.entry(tier).or_insert(f64::MAX);
            *entry = entry.min(score);
        }

        // Every score at or above the 95th-percentile cutpoint lands in
        // the top tier, and tier minimums are ordered.
        let legendary_min = tier_minimums[&Rarity::Legendary];
        for &score in &scores {
            if score >= legendary_min {
                assert_eq!(assigner.classify(score), Rarity::Legendary);
            }
        }
        let mut prev = f64::MAX;
        for tier in [Rarity::Legendary, Rarity::Epic, Rarity::Rare, Rarity::Common] {
            if let Some(&min) = tier_minimums.get(&tier) {
                assert!(min <= prev, "{tier} minimum {min} exceeds higher tier {prev}");
                prev = min;
            }
        }
    }

    #[test]
    fn test_identical_population_collapses_to_legendary() {
        let scores = vec![50.0; 25];
        let assigner = TierAssigner::from_scores(&scores);
        assert_eq!(assigner.classify(50.0), Rarity::Legendary);
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }
}
