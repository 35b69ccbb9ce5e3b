//! Mock Provider
//!
//! Offline backend for testing and dry runs without API costs. Samples a
//! callsign from prefix/suffix tables and a faction-templated bio, with a
//! small delay to approximate network latency.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{ContentProvider, GenerationRequest, Result};
use crate::core::model::GeneratedContent;

const PREFIXES: &[&str] = &[
    "Vortex", "Quantum", "Neon", "Cobalt", "Titanium", "Plasma",
    "Volt", "Nexus", "Hyper", "Omega", "Delta", "Echo", "Phantom",
];

const SUFFIXES: &[&str] = &[
    "Striker", "Warden", "Reaper", "Sentinel", "Vanguard",
    "Ronin", "Shade", "Fist", "Blade", "Tempest", "Core", "Prime",
];

const QUOTES: &[&str] = &[
    "Victory is the only acceptable outcome.",
    "They trained me to be a weapon. I chose to be a warrior.",
    "In the arena, there are no second chances.",
    "Power means nothing without purpose.",
];

pub struct MockProvider {
    model: String,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            model: "mock".to_string(),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent> {
        tokio::time::sleep(Duration::from_millis(25)).await;

        let (name, sector, variant) = {
            let mut rng = rand::thread_rng();
            let prefix = PREFIXES.choose(&mut rng).copied().unwrap_or("Vortex");
            let suffix = SUFFIXES.choose(&mut rng).copied().unwrap_or("Striker");
            (
                format!("{prefix} {suffix}"),
                rng.gen_range(1..=99u32),
                rng.gen_range(0..4u32),
            )
        };

        let faction = request.faction;
        let bio = match variant {
            0 => format!("Elite operative from Sector {sector}. Specializes in {faction} combat tactics."),
            1 => format!("Former {faction} commander turned mercenary. Known for ruthless efficiency in battle."),
            2 => format!("Genetically enhanced soldier. Survived the {faction} Enhancement Program with unprecedented results."),
            _ => format!("Last survivor of the {faction} Initiative. Fights to prevent the same fate for others."),
        };

        let quote = QUOTES[(sector as usize) % QUOTES.len()].to_string();

        Ok(GeneratedContent { name, bio, quote })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::faction::Faction;
    use crate::core::rarity::Rarity;
    use crate::core::stats::HeroStats;

    #[tokio::test]
    async fn test_mock_generates_valid_content() {
        let provider = MockProvider::new();
        let request = GenerationRequest {
            stats: HeroStats::new(50, 50, 50, 50, 50, 50),
            faction: Faction::Terraguard,
            rarity: Rarity::Common,
            feedback: None,
        };
        for _ in 0..10 {
            let content = provider.generate(&request).await.expect("mock never fails");
            assert!(content.validate().is_ok(), "mock content within bounds");
            assert!(content.bio.contains("Terraguard") || !content.bio.is_empty());
        }
    }
}
