//! Arena Forge - AI-Powered Hero Transformation Pipeline
//!
//! Core library converting licensed hero records into original sci-fi
//! arena characters: combat scoring, rarity tiers, faction balancing,
//! and AI content generation with uniqueness validation.

pub mod cli;
pub mod config;
pub mod core;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
