//! Roster File I/O
//!
//! Loads the raw hero roster and writes the processed output. Input
//! problems are fatal configuration errors: they abort the run before
//! any generation is dispatched, and nothing is written.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{ProcessedHero, RawHero};

/// Fatal errors at the run boundary.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Failed to read input file {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse input file {path}: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Run interrupted by user")]
    Interrupted,
}

/// Load the raw roster from a JSON array of hero records.
pub fn load_heroes(path: &Path) -> Result<Vec<RawHero>, ForgeError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ForgeError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ForgeError::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the processed roster as pretty-printed JSON, ordered as given.
pub fn write_heroes(path: &Path, heroes: &[ProcessedHero]) -> Result<(), ForgeError> {
    let json = serde_json::to_string_pretty(heroes)
        .expect("processed heroes always serialize");
    std::fs::write(path, json).map_err(|source| ForgeError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
