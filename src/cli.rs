//! Command-Line Interface

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ForgeConfig;

/// Arena Forge - AI-powered hero transformation pipeline.
#[derive(Debug, Parser)]
#[command(name = "arena-forge", version, about)]
pub struct Args {
    /// Input JSON roster.
    #[arg(long, default_value = "heroes_raw.json")]
    pub input: PathBuf,

    /// Output JSON file.
    #[arg(long, default_value = "heroes_processed.json")]
    pub output: PathBuf,

    /// Content generation backend.
    #[arg(long, value_enum, default_value_t = ProviderKind::Mock)]
    pub provider: ProviderKind,

    /// API key for live backends.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model override (backend default if omitted).
    #[arg(long)]
    pub model: Option<String>,

    /// Process only the first N heroes (dry runs).
    #[arg(long)]
    pub limit: Option<usize>,

    /// Maximum concurrent generator calls.
    #[arg(long, default_value_t = 10)]
    pub concurrency: usize,

    /// Bio similarity threshold (0-1).
    #[arg(long, default_value_t = 0.60)]
    pub similarity_threshold: f64,

    /// Attempts per hero before placeholder fallback.
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,
}

impl Args {
    pub fn forge_config(&self) -> ForgeConfig {
        ForgeConfig {
            concurrency: self.concurrency,
            max_retries: self.max_retries,
            similarity_threshold: self.similarity_threshold,
            ..ForgeConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    Mock,
    Openai,
    Google,
    Aimlapi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
            ProviderKind::Openai => "openai",
            ProviderKind::Google => "google",
            ProviderKind::Aimlapi => "aimlapi",
        }
    }
}
