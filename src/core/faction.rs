//! Factions & Faction Balancing
//!
//! Each hero joins one of three factions based on which derived sub-score
//! dominates, subject to a running share cap so no faction ends up with
//! more than a configured fraction of the roster.
//!
//! The balancer is a single running-state mutator: it must be invoked
//! exactly once per hero, serialized, in the final order of faction
//! accounting. The pipeline runs it before fan-out.

use serde::{Deserialize, Serialize};

use super::stats::HeroStats;

/// Default maximum share of the roster any one faction may hold.
pub const DEFAULT_FACTION_CAP: f64 = 0.40;

/// The three arena factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Terraguard,
    #[serde(rename = "Cyber-Ops")]
    CyberOps,
    #[serde(rename = "Aero-Vanguard")]
    AeroVanguard,
}

impl Faction {
    pub const ALL: [Faction; 3] = [Faction::Terraguard, Faction::CyberOps, Faction::AeroVanguard];

    /// Combat-role summary used in generation prompts.
    pub fn role_description(&self) -> &'static str {
        match self {
            Faction::Terraguard => "ground-based tank with high defense and strength",
            Faction::CyberOps => "tech specialist with high damage and intelligence",
            Faction::AeroVanguard => "high-speed aerial combatant with evasion",
        }
    }

    /// Faction affinity score from a hero's stat block.
    fn sub_score(&self, stats: &HeroStats) -> f64 {
        match self {
            Faction::Terraguard => (stats.durability as f64 * 2.0 + stats.strength as f64 * 1.5) / 3.5,
            Faction::CyberOps => (stats.power as f64 * 2.0 + stats.intelligence as f64 * 1.5) / 3.5,
            Faction::AeroVanguard => (stats.speed as f64 * 2.0 + stats.combat as f64 * 1.5) / 3.5,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Terraguard => write!(f, "Terraguard"),
            Faction::CyberOps => write!(f, "Cyber-Ops"),
            Faction::AeroVanguard => write!(f, "Aero-Vanguard"),
        }
    }
}

/// Run-scoped faction assignment with share balancing.
#[derive(Debug)]
pub struct FactionBalancer {
    counts: [usize; 3],
    cap: f64,
}

impl FactionBalancer {
    pub fn new(cap: f64) -> Self {
        Self { counts: [0; 3], cap }
    }

    /// Assign a faction by dominant sub-score, keeping every faction's
    /// share of assignments-so-far strictly below the cap. The very first
    /// assignment is unconditional. If every faction is already at or
    /// above the cap (possible only with pathological caps), fall back to
    /// the least-populated faction, ties broken by declaration order.
    pub fn assign(&mut self, stats: &HeroStats) -> Faction {
        let mut ranked: Vec<(Faction, f64)> = Faction::ALL
            .iter()
            .map(|f| (*f, f.sub_score(stats)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let total: usize = self.counts.iter().sum();
        if total == 0 {
            let faction = ranked[0].0;
            self.counts[faction as usize] += 1;
            return faction;
        }

        for (faction, _) in &ranked {
            let share = self.counts[*faction as usize] as f64 / total as f64;
            if share < self.cap {
                self.counts[*faction as usize] += 1;
                return *faction;
            }
        }

        // Cap deadlock: least-populated faction wins.
        let (idx, _) = self
            .counts
            .iter()
            .enumerate()
            .min_by_key(|(_, count)| **count)
            .unwrap_or((0, &0));
        let faction = Faction::ALL[idx];
        self.counts[idx] += 1;
        faction
    }

    /// Assignments made so far for one faction.
    pub fn count(&self, faction: Faction) -> usize {
        self.counts[faction as usize]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Default for FactionBalancer {
    fn default() -> Self {
        Self::new(DEFAULT_FACTION_CAP)
    }
}
