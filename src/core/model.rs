//! Hero Records
//!
//! Wire-format types for the pipeline: the raw input record, the
//! generated content triple, and the final processed record. Field names
//! are camelCase on the wire to match the consuming frontend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::faction::Faction;
use super::rarity::Rarity;
use super::stats::HeroStats;

fn default_image() -> String {
    "⚡".to_string()
}

/// One input hero as loaded from the raw roster file. The stat map is
/// sparse; missing or null attributes default to 50.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHero {
    pub id: i64,
    pub name: String,
    pub universe: String,
    pub tier: String,
    pub power: u32,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default)]
    pub stats: HashMap<String, Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RawHero {
    /// Densify the sparse stat map. Missing, null, and zero attributes
    /// all mean "unknown" and default to 50; an unknown power stat falls
    /// back to the record's power field, unless that is zero too.
    pub fn to_stats(&self) -> HeroStats {
        let get = |key: &str| self.stats.get(key).copied().flatten().filter(|v| *v > 0);
        HeroStats::new(
            get("strength").unwrap_or(50),
            get("speed").unwrap_or(50),
            get("power").or(if self.power > 0 { Some(self.power) } else { None }).unwrap_or(50),
            get("durability").unwrap_or(50),
            get("combat").unwrap_or(50),
            get("intelligence").unwrap_or(50),
        )
    }
}

/// Content bounds enforced on every generated candidate.
const NAME_CHARS: std::ops::RangeInclusive<usize> = 3..=50;
const BIO_CHARS: std::ops::RangeInclusive<usize> = 20..=200;
const QUOTE_CHARS: std::ops::RangeInclusive<usize> = 5..=100;

/// A candidate name/bio/quote triple from the content generator.
/// Ephemeral: lives only inside one attempt until accepted or discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub name: String,
    pub bio: String,
    pub quote: String,
}

impl GeneratedContent {
    /// Enforce the length bounds. A violation means the generator
    /// produced a malformed response, which counts as a failed attempt.
    pub fn validate(&self) -> Result<(), String> {
        let check = |field: &str, value: &str, range: &std::ops::RangeInclusive<usize>| {
            let len = value.chars().count();
            if range.contains(&len) {
                Ok(())
            } else {
                Err(format!("{field} length {len} outside {}..={}", range.start(), range.end()))
            }
        };
        check("name", &self.name, &NAME_CHARS)?;
        check("bio", &self.bio, &BIO_CHARS)?;
        check("quote", &self.quote, &QUOTE_CHARS)?;
        Ok(())
    }
}

/// The final per-hero output record, immutable once built and ordered by
/// original id in the output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedHero {
    pub id: i64,
    pub original_name: String,
    pub name: String,
    pub faction: Faction,
    pub rarity: Rarity,
    pub bio: String,
    pub quote: String,
    pub stats: HeroStats,
    pub combat_score: f64,
    pub image: String,
    pub needs_manual_review: bool,
    pub retry_count: u32,
}
