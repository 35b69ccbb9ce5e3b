//! Content Policy Filter
//!
//! Rejects generated text containing protected franchise terms. The scan
//! is plain case-insensitive substring containment: no stemming, no token
//! boundaries, no fuzzy matching.

/// Protected terms that must never appear in generated content.
pub const DEFAULT_DENYLIST: &[&str] = &[
    // Marvel
    "stark", "tony", "rogers", "steve", "banner", "bruce",
    "parker", "peter", "thor", "odinson", "barton", "clint",
    "romanoff", "natasha", "marvel", "avenger", "mutant",
    "xavier", "charles", "magneto", "eric", "lehnsherr", "weapon-x",
    "wolverine", "logan", "jean", "grey", "cyclops", "summers",
    "storm", "munroe", "rogue", "gambit", "beast", "hank",
    // DC
    "wayne", "kent", "clark", "diana", "prince",
    "allen", "barry", "jordan", "hal", "gotham", "metropolis",
    "batman", "superman", "wonder", "flash", "lantern",
    "krypton", "kryptonian", "amazon", "themyscira",
    "aquaman", "arthur", "curry", "cyborg", "victor", "stone",
    // Generic protected
    "spider", "iron", "captain", "america", "incredible",
    "amazing", "fantastic", "justice", "league", "squadron",
    "wakanda", "asgard", "bifrost", "mjolnir", "vibranium",
];

/// Stateless denylist scanner.
#[derive(Debug, Clone)]
pub struct PolicyFilter {
    terms: Vec<String>,
}

impl PolicyFilter {
    /// Build a filter from explicit terms (stored lowercased).
    pub fn new(terms: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// True when the text contains none of the denylisted terms.
    pub fn is_clean(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        !self.terms.iter().any(|term| lower.contains(term))
    }
}

impl Default for PolicyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST)
    }
}
