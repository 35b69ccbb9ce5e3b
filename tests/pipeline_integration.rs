//! End-to-end pipeline tests.
//!
//! These run the full orchestrator against stub backends: no network, no
//! API keys. They cover the happy path at scale, output ordering, the
//! uniqueness guarantee under real task parallelism, and the exhaustion
//! fallback.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use arena_forge::config::ForgeConfig;
use arena_forge::core::model::{GeneratedContent, RawHero};
use arena_forge::core::pipeline::{CancelFlag, Pipeline};
use arena_forge::core::provider::{ContentProvider, GenerationRequest, Result as ProviderResult};

/// Pseudo-random consonant text: vowel-free (so it can never contain a
/// denylisted term) and effectively dissimilar across seeds.
fn distinct_text(seed: u32, len: usize) -> String {
    const LETTERS: &[u8] = b"bcdfghjklmnpqrstvwxz";
    let mut state = u64::from(seed).wrapping_mul(2654435761).wrapping_add(88172645463325252);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            LETTERS[(state % LETTERS.len() as u64) as usize] as char
        })
        .collect()
}

/// Backend that emits globally distinct content on every call.
struct DistinctProvider {
    calls: AtomicU32,
}

impl DistinctProvider {
    fn new() -> Self {
        Self { calls: AtomicU32::new(0) }
    }
}

#[async_trait]
impl ContentProvider for DistinctProvider {
    fn id(&self) -> &str {
        "distinct-stub"
    }

    fn model(&self) -> &str {
        "distinct-stub"
    }

    async fn generate(&self, _request: &GenerationRequest) -> ProviderResult<GeneratedContent> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeneratedContent {
            name: format!("Unit {}", distinct_text(call, 10)),
            bio: distinct_text(call.wrapping_add(90_000), 60),
            quote: "Nothing stands after the horn sounds.".to_string(),
        })
    }
}

/// Backend that keeps returning the same bio, forcing the uniqueness
/// gate to arbitrate between concurrent tasks.
struct CollidingBioProvider {
    calls: AtomicU32,
}

#[async_trait]
impl ContentProvider for CollidingBioProvider {
    fn id(&self) -> &str {
        "colliding-stub"
    }

    fn model(&self) -> &str {
        "colliding-stub"
    }

    async fn generate(&self, _request: &GenerationRequest) -> ProviderResult<GeneratedContent> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeneratedContent {
            name: format!("Unit {}", distinct_text(call, 10)),
            bio: "Forged in the proving grounds beneath the shattered moon of Davos.".to_string(),
            quote: "Hold the line, whatever comes.".to_string(),
        })
    }
}

fn synthetic_roster(n: usize) -> Vec<RawHero> {
    (0..n)
        .map(|i| {
            let mut stats = HashMap::new();
            stats.insert("strength".to_string(), Some(((i * 7) % 101) as u32));
            stats.insert("speed".to_string(), Some(((i * 13) % 101) as u32));
            stats.insert("power".to_string(), Some(((i * 17) % 101) as u32));
            stats.insert("durability".to_string(), Some(((i * 23) % 101) as u32));
            stats.insert("combat".to_string(), Some(((i * 29) % 101) as u32));
            stats.insert("intelligence".to_string(), Some(((i * 31) % 101) as u32));
            RawHero {
                id: i as i64,
                name: format!("Subject {i:03}"),
                universe: "Test".to_string(),
                tier: "B".to_string(),
                power: 50,
                image: "⚡".to_string(),
                stats,
                abilities: None,
                description: None,
            }
        })
        .collect()
}

#[tokio::test]
async fn test_hundred_heroes_end_to_end() {
    let pipeline = Pipeline::new(
        Arc::new(DistinctProvider::new()),
        ForgeConfig::default(),
        CancelFlag::new(),
    );

    let records = pipeline.run(synthetic_roster(100)).await;

    assert_eq!(records.len(), 100);
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, (0..100).collect::<Vec<i64>>(), "ordered by original id");
    assert!(records.iter().all(|r| !r.needs_manual_review));
    assert_eq!(pipeline.registry().len(), 100);

    let summary = pipeline.summary();
    assert_eq!(summary.processed, 100);
    assert_eq!(summary.manual_review, 0);

    // Accepted names are all distinct.
    let names: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), 100);
}

#[tokio::test]
async fn test_concurrent_bio_collisions_admit_exactly_one() {
    // Every generation call produces the same bio. Whatever the task
    // interleaving at concurrency >= 2, the registry must admit exactly
    // one of them; the rest exhaust into review placeholders.
    let mut config = ForgeConfig::default();
    config.concurrency = 8;
    let pipeline = Pipeline::new(
        Arc::new(CollidingBioProvider { calls: AtomicU32::new(0) }),
        config,
        CancelFlag::new(),
    );

    let records = pipeline.run(synthetic_roster(8)).await;

    assert_eq!(records.len(), 8);
    let accepted = records.iter().filter(|r| !r.needs_manual_review).count();
    assert_eq!(accepted, 1, "duplicate-adjacent bios must not both be accepted");
    assert_eq!(pipeline.registry().len(), 1);
    assert_eq!(pipeline.summary().manual_review, 7);
    // Each loser consumed all its attempts on similarity rejections.
    assert_eq!(pipeline.summary().similarity_retries, 7 * 3);
}

#[tokio::test]
async fn test_rarity_and_faction_are_population_consistent() {
    let pipeline = Pipeline::new(
        Arc::new(DistinctProvider::new()),
        ForgeConfig::default(),
        CancelFlag::new(),
    );

    let records = pipeline.run(synthetic_roster(50)).await;

    // Tier thresholds were frozen against the whole population: records
    // sorted by combat score must have monotone non-decreasing rarity.
    let mut by_score = records.clone();
    by_score.sort_by(|a, b| a.combat_score.partial_cmp(&b.combat_score).unwrap());
    let mut last = arena_forge::core::rarity::Rarity::Common;
    for record in &by_score {
        assert!(record.rarity >= last, "rarity must not decrease as score rises");
        last = record.rarity;
    }

    // Faction cap: no faction above ceil(0.40 * N) + 1.
    let bound = (0.40 * records.len() as f64).ceil() as usize + 1;
    for faction in arena_forge::core::faction::Faction::ALL {
        let count = records.iter().filter(|r| r.faction == faction).count();
        assert!(count <= bound, "{faction} holds {count}, bound {bound}");
    }
}
