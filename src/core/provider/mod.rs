//! Content Provider Implementations
//!
//! This module contains the `ContentProvider` trait and its concrete
//! backends: the mock generator for offline runs, and the live
//! OpenAI-compatible and Google backends.
//!
//! Adding a new backend requires:
//! 1. A new variant in `ProviderConfig`
//! 2. A mapping in `ProviderConfig::from_parts`
//! 3. The provider implementation file

mod google;
mod mock;
mod openai;

pub use google::GoogleProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::faction::Faction;
use crate::core::model::GeneratedContent;
use crate::core::rarity::Rarity;
use crate::core::stats::HeroStats;

/// AIMLAPI exposes an OpenAI-compatible endpoint; it maps onto the
/// OpenAI provider with this base URL.
const AIMLAPI_BASE_URL: &str = "https://api.aimlapi.com/v1";

/// Errors from the content generator backend.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API key required for provider '{0}'")]
    MissingApiKey(&'static str),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Everything a backend needs to generate one hero's content.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub stats: HeroStats,
    pub faction: Faction,
    pub rarity: Rarity,
    /// Accumulated guidance from earlier failed attempts.
    pub feedback: Option<String>,
}

/// Trait that all content generation backends implement.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// The backend's unique identifier.
    fn id(&self) -> &str;

    /// The model being used.
    fn model(&self) -> &str;

    /// Generate one candidate name/bio/quote triple.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent>;
}

// ── ProviderConfig ──────────────────────────────────────────────────────────

/// Configuration for creating providers.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Mock,
    OpenAi {
        api_key: String,
        model: String,
        base_url: Option<String>,
    },
    Google {
        api_key: String,
        model: String,
    },
}

impl ProviderConfig {
    /// Build a config from CLI parts. This is the single id-to-variant
    /// mapping point. "aimlapi" maps to `OpenAi` with AIMLAPI's base URL
    /// (OpenAI-compatible endpoint). Live backends require an API key.
    pub fn from_parts(
        provider_id: &str,
        api_key: Option<&str>,
        model: Option<&str>,
    ) -> Result<Self> {
        let require_key = |id: &'static str| -> Result<String> {
            match api_key {
                Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
                _ => Err(ProviderError::MissingApiKey(id)),
            }
        };
        match provider_id {
            "openai" => Ok(ProviderConfig::OpenAi {
                api_key: require_key("openai")?,
                model: model.unwrap_or("gpt-4o-mini").to_string(),
                base_url: None,
            }),
            "aimlapi" => Ok(ProviderConfig::OpenAi {
                api_key: require_key("aimlapi")?,
                model: model.unwrap_or("google/gemini-3-flash-preview").to_string(),
                base_url: Some(AIMLAPI_BASE_URL.to_string()),
            }),
            "google" => Ok(ProviderConfig::Google {
                api_key: require_key("google")?,
                model: model.unwrap_or("gemini-1.5-flash").to_string(),
            }),
            _ => Ok(ProviderConfig::Mock),
        }
    }

    /// Create a provider from this configuration.
    pub fn create_provider(&self) -> Arc<dyn ContentProvider> {
        match self {
            ProviderConfig::Mock => Arc::new(MockProvider::new()),
            ProviderConfig::OpenAi { api_key, model, base_url } => Arc::new(OpenAiProvider::new(
                api_key.clone(),
                model.clone(),
                base_url.clone(),
            )),
            ProviderConfig::Google { api_key, model } => {
                Arc::new(GoogleProvider::new(api_key.clone(), model.clone()))
            }
        }
    }

    /// Get the provider ID for this configuration.
    pub fn provider_id(&self) -> &'static str {
        match self {
            ProviderConfig::Mock => "mock",
            ProviderConfig::OpenAi { .. } => "openai",
            ProviderConfig::Google { .. } => "google",
        }
    }
}

// ── Shared response handling ────────────────────────────────────────────────

/// Strip a markdown code fence if the model wrapped its JSON in one.
pub(crate) fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    for fence in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(fence) {
            if let Some(end) = rest.find("```") {
                return rest[..end].trim();
            }
            return rest.trim();
        }
    }
    trimmed
}

/// Parse the model's text reply into validated content.
pub(crate) fn parse_content_reply(reply: &str) -> Result<GeneratedContent> {
    let body = strip_code_fences(reply);
    let content: GeneratedContent = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON: {e}")))?;
    content.validate().map_err(ProviderError::MalformedResponse)?;
    Ok(content)
}

/// Shared prompt for the live backends. Ports the designer brief:
/// franchise constraints, faction role, and any retry feedback.
pub(crate) fn build_prompt(request: &GenerationRequest) -> String {
    let feedback = request.feedback.as_deref().unwrap_or("");
    format!(
        r#"You are a Sci-Fi hero designer for "Infinite Arena", a futuristic battle game.

CONSTRAINTS:
- NO Marvel/DC references (no Wayne, Stark, Parker, Rogers, etc.)
- NO real-world locations or brands
- Military/cyberpunk tone
- Must fit faction: {faction} ({role})
- Rarity: {rarity}

HERO PROFILE:
Combat Score: {score:.1}
Faction: {faction}
Rarity: {rarity}
Dominant Stats: Power={power}, Speed={speed}, Durability={durability}

{feedback}

Generate a unique hero:
1. NAME: Military-style callsign (2-3 words, e.g., "Vortex Striker", "Cobalt Sentinel")
2. BIO: 2-sentence backstory (30-50 words, focus on origin and motivation)
3. QUOTE: One battle quote (max 15 words)

Respond ONLY with valid JSON:
{{"name": "...", "bio": "...", "quote": "..."}}"#,
        faction = request.faction,
        role = request.faction.role_description(),
        rarity = request.rarity,
        score = request.stats.combat_score(),
        power = request.stats.power,
        speed = request.stats.speed,
        durability = request.stats.durability,
    )
}
