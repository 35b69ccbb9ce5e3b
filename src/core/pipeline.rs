//! Generation Pipeline
//!
//! Fans out one generate-validate-retry loop per hero under a global
//! concurrency limiter, collects results as they complete, and restores
//! the original roster order.
//!
//! Ordering guarantees:
//! - Rarity cutpoints are frozen against the whole population, and the
//!   faction balancer runs to completion, before any task is dispatched.
//! - The uniqueness registry serializes check-and-reserve internally.
//! - The semaphore gates only the external generator call; scoring,
//!   filtering, and dedup run synchronously inside each task.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use is_terminal::IsTerminal;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::config::ForgeConfig;
use crate::core::faction::{Faction, FactionBalancer};
use crate::core::model::{GeneratedContent, ProcessedHero, RawHero};
use crate::core::policy::PolicyFilter;
use crate::core::provider::{ContentProvider, GenerationRequest};
use crate::core::rarity::{Rarity, TierAssigner};
use crate::core::registry::{ReserveOutcome, UniquenessRegistry};
use crate::core::stats::HeroStats;

const RETRY_FEEDBACK_GENERIC: &str =
    "PREVIOUS ATTEMPT FAILED VALIDATION. Generate completely different content.";

/// Cooperative cancellation flag shared between the interrupt handler
/// and every in-flight attempt loop.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Run-wide counters, incremented from concurrent tasks.
#[derive(Debug, Default)]
pub struct RunStats {
    processed: AtomicU64,
    manual_review: AtomicU64,
    policy_rejections: AtomicU64,
    similarity_retries: AtomicU64,
}

impl RunStats {
    pub fn snapshot(&self) -> RunSummary {
        RunSummary {
            processed: self.processed.load(Ordering::Relaxed),
            manual_review: self.manual_review.load(Ordering::Relaxed),
            policy_rejections: self.policy_rejections.load(Ordering::Relaxed),
            similarity_retries: self.similarity_retries.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the run counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: u64,
    pub manual_review: u64,
    pub policy_rejections: u64,
    pub similarity_retries: u64,
}

/// A hero with its cheap synchronous stages already applied.
#[derive(Debug, Clone)]
struct PreparedHero {
    raw: RawHero,
    rarity: Rarity,
    faction: Faction,
    scaled_stats: HeroStats,
    combat_score: f64,
}

/// Terminal outcome of one hero's attempt loop.
enum AttemptOutcome {
    Accepted(GeneratedContent),
    Exhausted,
}

pub struct Pipeline {
    provider: Arc<dyn ContentProvider>,
    registry: Arc<UniquenessRegistry>,
    policy: Arc<PolicyFilter>,
    stats: Arc<RunStats>,
    cancel: CancelFlag,
    config: ForgeConfig,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn ContentProvider>, config: ForgeConfig, cancel: CancelFlag) -> Self {
        Self {
            provider,
            registry: Arc::new(UniquenessRegistry::new(config.similarity_threshold)),
            policy: Arc::new(PolicyFilter::default()),
            stats: Arc::new(RunStats::default()),
            cancel,
            config,
        }
    }

    /// Swap in a custom denylist (for tests and alternate rosters).
    pub fn with_policy(mut self, policy: PolicyFilter) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn registry(&self) -> Arc<UniquenessRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn summary(&self) -> RunSummary {
        self.stats.snapshot()
    }

    /// Run the full batch: freeze tier cutpoints, assign factions, fan
    /// out one attempt loop per hero, and return records sorted by the
    /// original hero id.
    pub async fn run(&self, heroes: Vec<RawHero>) -> Vec<ProcessedHero> {
        if heroes.is_empty() {
            return Vec::new();
        }

        let prepared = self.prepare(heroes);
        let total = prepared.len();

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let progress = batch_progress_bar(total as u64);

        let mut tasks = JoinSet::new();
        for hero in prepared {
            let provider = Arc::clone(&self.provider);
            let registry = Arc::clone(&self.registry);
            let policy = Arc::clone(&self.policy);
            let stats = Arc::clone(&self.stats);
            let semaphore = Arc::clone(&semaphore);
            let cancel = self.cancel.clone();
            let max_retries = self.config.max_retries;
            tasks.spawn(async move {
                process_hero(hero, provider, registry, policy, stats, semaphore, cancel, max_retries)
                    .await
            });
        }

        let mut records = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(record) => {
                    progress.inc(1);
                    records.push(record);
                }
                Err(e) => error!("hero task failed to complete: {e}"),
            }
        }
        progress.finish_and_clear();

        // Completion order is arbitrary; output order is canonical.
        records.sort_by_key(|h| h.id);
        records
    }

    /// Scoring, tier assignment, and faction balancing. All synchronous,
    /// all before fan-out: cutpoints need the whole population and the
    /// balancer is a single running-state mutator.
    fn prepare(&self, heroes: Vec<RawHero>) -> Vec<PreparedHero> {
        let scores: Vec<f64> = heroes.iter().map(|h| h.to_stats().combat_score()).collect();
        let assigner = TierAssigner::from_scores(&scores);
        let mut balancer = FactionBalancer::new(self.config.faction_cap);

        heroes
            .into_iter()
            .zip(scores)
            .map(|(raw, combat_score)| {
                let stats = raw.to_stats();
                let rarity = assigner.classify(combat_score);
                let faction = balancer.assign(&stats);
                PreparedHero {
                    raw,
                    rarity,
                    faction,
                    scaled_stats: stats.scaled_by(rarity),
                    combat_score,
                }
            })
            .collect()
    }
}

/// One hero's complete journey: the bounded generate-filter-dedupe loop,
/// then record construction.
#[allow(clippy::too_many_arguments)]
async fn process_hero(
    hero: PreparedHero,
    provider: Arc<dyn ContentProvider>,
    registry: Arc<UniquenessRegistry>,
    policy: Arc<PolicyFilter>,
    stats: Arc<RunStats>,
    semaphore: Arc<Semaphore>,
    cancel: CancelFlag,
    max_retries: u32,
) -> ProcessedHero {
    let mut feedback: Option<String> = None;
    let mut retry_count = 0u32;
    let mut outcome = AttemptOutcome::Exhausted;

    for attempt in 0..max_retries {
        if cancel.is_cancelled() {
            debug!(hero_id = hero.raw.id, "cancelled before dispatch");
            break;
        }

        let request = GenerationRequest {
            stats: hero.scaled_stats,
            faction: hero.faction,
            rarity: hero.rarity,
            feedback: feedback.take(),
        };

        // Only the external call sits behind the admission gate; the
        // validation stages below are cheap and synchronous.
        let generated = {
            let permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let result = provider.generate(&request).await;
            drop(permit);
            result
        };

        let content = match generated {
            Ok(content) => content,
            Err(e) => {
                retry_count += 1;
                warn!(hero_id = hero.raw.id, attempt, "generation failed: {e}");
                feedback = Some(RETRY_FEEDBACK_GENERIC.to_string());
                continue;
            }
        };

        if !policy.is_clean(&content.name) || !policy.is_clean(&content.bio) {
            stats.policy_rejections.fetch_add(1, Ordering::Relaxed);
            retry_count += 1;
            debug!(hero_id = hero.raw.id, attempt, "denylist hit in generated content");
            feedback = Some(RETRY_FEEDBACK_GENERIC.to_string());
            continue;
        }

        match registry.try_reserve(&content.name, &content.bio) {
            ReserveOutcome::Reserved => {
                outcome = AttemptOutcome::Accepted(content);
                break;
            }
            ReserveOutcome::NameTaken => {
                retry_count += 1;
                debug!(hero_id = hero.raw.id, attempt, "name collision");
                feedback = Some(RETRY_FEEDBACK_GENERIC.to_string());
            }
            ReserveOutcome::BioTooSimilar { similarity, conflict } => {
                stats.similarity_retries.fetch_add(1, Ordering::Relaxed);
                retry_count += 1;
                debug!(hero_id = hero.raw.id, attempt, similarity, "bio collision");
                feedback = Some(format!(
                    "Bio was too similar ({:.0}%) to: '{}...'. Create completely different story.",
                    similarity * 100.0,
                    truncate_chars(&conflict, 100),
                ));
            }
        }
    }

    let (content, needs_review) = match outcome {
        AttemptOutcome::Accepted(content) => (content, false),
        AttemptOutcome::Exhausted => (placeholder_content(&hero.raw), true),
    };

    stats.processed.fetch_add(1, Ordering::Relaxed);
    if needs_review {
        stats.manual_review.fetch_add(1, Ordering::Relaxed);
    }

    ProcessedHero {
        id: hero.raw.id,
        original_name: hero.raw.name.clone(),
        name: content.name,
        faction: hero.faction,
        rarity: hero.rarity,
        bio: content.bio,
        quote: content.quote,
        stats: hero.scaled_stats,
        combat_score: (hero.combat_score * 100.0).round() / 100.0,
        image: hero.raw.image,
        needs_manual_review: needs_review,
        retry_count,
    }
}

/// Deterministic placeholder for a hero that exhausted its attempts.
/// Keeps the original identity visible for the review pass.
fn placeholder_content(raw: &RawHero) -> GeneratedContent {
    GeneratedContent {
        name: format!("REVIEW_{}_{}", raw.id, truncate_chars(&raw.name, 20)),
        bio: format!("[MANUAL REVIEW NEEDED] Original: {}", raw.name),
        quote: "NEEDS REVIEW".to_string(),
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn batch_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    if std::io::stdout().is_terminal() {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | ETA: {eta}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
    } else {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }
    bar
}
