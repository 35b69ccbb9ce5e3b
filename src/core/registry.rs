//! Uniqueness Registry
//!
//! Tracks every accepted name and bio for the lifetime of one run and
//! gates new candidates against them: names by case-insensitive match or
//! near-identical similarity, bios by a configurable fuzzy threshold.
//!
//! Checks and reservation are exposed separately for callers that only
//! need one of them, but the pipeline uses `try_reserve`, which holds a
//! single lock across check-both-then-append. Two concurrent candidates
//! can therefore never both pass against the same stale snapshot.

use std::sync::Mutex;

/// Names more similar than this are treated as duplicates.
const NAME_SIMILARITY_CEILING: f64 = 0.85;

/// Default bio similarity threshold.
pub const DEFAULT_BIO_THRESHOLD: f64 = 0.60;

/// Result of a bio uniqueness check.
#[derive(Debug, Clone, PartialEq)]
pub enum BioCheck {
    Unique,
    TooSimilar { similarity: f64, conflict: String },
}

/// Result of an atomic check-and-reserve.
#[derive(Debug, Clone, PartialEq)]
pub enum ReserveOutcome {
    Reserved,
    NameTaken,
    BioTooSimilar { similarity: f64, conflict: String },
}

#[derive(Debug, Default)]
struct RegistryInner {
    names: Vec<String>,
    bios: Vec<String>,
}

/// Run-scoped registry of accepted content. Append-only.
#[derive(Debug)]
pub struct UniquenessRegistry {
    inner: Mutex<RegistryInner>,
    bio_threshold: f64,
}

impl UniquenessRegistry {
    pub fn new(bio_threshold: f64) -> Self {
        Self {
            inner: Mutex::new(RegistryInner::default()),
            bio_threshold,
        }
    }

    /// True when the name collides with no accepted name, either exactly
    /// (case-insensitive) or by similarity above 0.85.
    pub fn is_name_acceptable(&self, name: &str) -> bool {
        let inner = self.lock();
        name_conflict(&inner, name).is_none()
    }

    /// Check a bio against every accepted bio. On conflict, returns the
    /// prior bio and the similarity score for retry feedback.
    pub fn check_bio(&self, bio: &str) -> BioCheck {
        let inner = self.lock();
        match bio_conflict(&inner, bio, self.bio_threshold) {
            Some((similarity, conflict)) => BioCheck::TooSimilar { similarity, conflict },
            None => BioCheck::Unique,
        }
    }

    /// Unconditionally record a name and bio as used.
    pub fn reserve(&self, name: &str, bio: &str) {
        let mut inner = self.lock();
        inner.names.push(name.to_string());
        inner.bios.push(bio.to_string());
    }

    /// Atomic check-and-reserve: the name check, bio check, and append
    /// happen under one lock, so concurrent callers serialize here.
    pub fn try_reserve(&self, name: &str, bio: &str) -> ReserveOutcome {
        let mut inner = self.lock();
        if name_conflict(&inner, name).is_some() {
            return ReserveOutcome::NameTaken;
        }
        if let Some((similarity, conflict)) = bio_conflict(&inner, bio, self.bio_threshold) {
            return ReserveOutcome::BioTooSimilar { similarity, conflict };
        }
        inner.names.push(name.to_string());
        inner.bios.push(bio.to_string());
        ReserveOutcome::Reserved
    }

    /// Number of accepted entries.
    pub fn len(&self) -> usize {
        self.lock().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryInner> {
        // Registry operations never panic while holding the lock, but a
        // poisoned guard still carries valid data.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for UniquenessRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BIO_THRESHOLD)
    }
}

fn name_conflict(inner: &RegistryInner, candidate: &str) -> Option<usize> {
    let lower = candidate.to_lowercase();
    inner.names.iter().position(|existing| {
        let existing_lower = existing.to_lowercase();
        existing_lower == lower || similarity(&existing_lower, &lower) > NAME_SIMILARITY_CEILING
    })
}

fn bio_conflict(inner: &RegistryInner, candidate: &str, threshold: f64) -> Option<(f64, String)> {
    for existing in &inner.bios {
        let score = similarity(candidate, existing);
        if score > threshold {
            return Some((score, existing.clone()));
        }
    }
    None
}

/// Symmetric similarity ratio in [0, 1] over lowercased text.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}
