//! Error types for orgtangle.

use std::path::PathBuf;
use thiserror::Error;

use crate::text_location::TextLocation;

/// Main error type for orgtangle operations.
#[derive(Error, Debug)]
pub enum OrgTangleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Cyclic dependency: {} includes itself (via {})", path.display(), format_chain(chain))]
    CyclicDependency { path: PathBuf, chain: Vec<PathBuf> },

    #[error("Document {0} must be saved before tangling")]
    UnsavedDocument(String),

    #[error("Cannot read included file {} ({location}): {source}", path.display())]
    MissingInclude {
        path: PathBuf,
        location: TextLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read document {}: {source}", path.display())]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Extractor error: {0}")]
    Extractor(String),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

fn format_chain(chain: &[PathBuf]) -> String {
    if chain.is_empty() {
        return "<root>".to_string();
    }
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for orgtangle operations.
pub type Result<T> = std::result::Result<T, OrgTangleError>;
