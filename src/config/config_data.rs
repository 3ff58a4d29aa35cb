//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::extractor_kind::ExtractorKind;
use super::strategy::Strategy;

/// Main configuration structure for orgtangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whether tangle requests expand includes before extraction.
    #[serde(default = "default_resolve_includes", alias = "advice-enabled")]
    pub resolve_includes: bool,

    /// Whether the composite artifact is removed after extraction.
    #[serde(default, alias = "delete-temp-artifact")]
    pub delete_temp_artifact: bool,

    /// Extraction engine.
    #[serde(default)]
    pub extractor: ExtractorKind,

    /// Document tangled when no file is named explicitly.
    #[serde(default)]
    pub document: Option<PathBuf>,

    /// Settings for the Emacs extractor.
    #[serde(default)]
    pub emacs: EmacsConfig,
}

fn default_resolve_includes() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolve_includes: default_resolve_includes(),
            delete_temp_artifact: false,
            extractor: ExtractorKind::default(),
            document: None,
            emacs: EmacsConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configured tangle strategy.
    pub fn strategy(&self) -> Strategy {
        Strategy::from_resolve_includes(self.resolve_includes)
    }

    /// Returns the default document, if configured.
    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }
}

/// Emacs extractor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmacsConfig {
    /// Emacs executable.
    #[serde(default = "default_emacs_program")]
    pub program: String,

    /// Extra arguments placed before `--eval`, e.g. `["-l", "init.el"]`.
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_emacs_program() -> String {
    "emacs".to_string()
}

impl Default for EmacsConfig {
    fn default() -> Self {
        Self {
            program: default_emacs_program(),
            args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.resolve_includes);
        assert!(!config.delete_temp_artifact);
        assert_eq!(config.extractor, ExtractorKind::Native);
        assert_eq!(config.strategy(), Strategy::ResolveIncludes);
        assert_eq!(config.emacs.program, "emacs");
    }

    #[test]
    fn test_kebab_case_aliases() {
        let config: Config = toml::from_str(
            "advice-enabled = false\ndelete-temp-artifact = true\n",
        )
        .unwrap();
        assert_eq!(config.strategy(), Strategy::Direct);
        assert!(config.delete_temp_artifact);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = Config {
            document: Some(PathBuf::from("main.org")),
            extractor: ExtractorKind::Emacs,
            ..Config::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
