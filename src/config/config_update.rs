//! Configuration update and merging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::config_data::{Config, EmacsConfig};
use super::extractor_kind::ExtractorKind;

/// Partial configuration update that can be merged into a Config.
///
/// All fields are optional. Only specified fields will override the base config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// Whether tangle requests expand includes before extraction.
    #[serde(default, alias = "advice-enabled")]
    pub resolve_includes: Option<bool>,

    /// Whether the composite artifact is removed after extraction.
    #[serde(default, alias = "delete-temp-artifact")]
    pub delete_temp_artifact: Option<bool>,

    /// Extraction engine.
    #[serde(default)]
    pub extractor: Option<ExtractorKind>,

    /// Document tangled when no file is named explicitly.
    #[serde(default)]
    pub document: Option<PathBuf>,

    /// Emacs extractor settings.
    #[serde(default)]
    pub emacs: Option<EmacsUpdate>,
}

/// Partial Emacs settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmacsUpdate {
    /// Emacs executable.
    #[serde(default)]
    pub program: Option<String>,

    /// Extra arguments.
    #[serde(default)]
    pub args: Option<Vec<String>>,
}

impl ConfigUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges this update into a base configuration, returning a new Config.
    ///
    /// Consumes `self` so fields can be moved instead of cloned.
    pub fn merge_into(self, base: &Config) -> Config {
        Config {
            resolve_includes: self.resolve_includes.unwrap_or(base.resolve_includes),
            delete_temp_artifact: self
                .delete_temp_artifact
                .unwrap_or(base.delete_temp_artifact),
            extractor: self.extractor.unwrap_or(base.extractor),
            document: self.document.or_else(|| base.document.clone()),
            emacs: merge_emacs(&base.emacs, self.emacs),
        }
    }
}

/// Merge Emacs settings field by field.
fn merge_emacs(base: &EmacsConfig, update: Option<EmacsUpdate>) -> EmacsConfig {
    match update {
        Some(u) => EmacsConfig {
            program: u.program.unwrap_or_else(|| base.program.clone()),
            args: u.args.unwrap_or_else(|| base.args.clone()),
        },
        None => base.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_keeps_base() {
        let base = Config {
            delete_temp_artifact: true,
            ..Config::default()
        };
        let merged = ConfigUpdate::new().merge_into(&base);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_partial_update() {
        let update: ConfigUpdate = toml::from_str(
            r#"
delete-temp-artifact = true
extractor = "emacs"

[emacs]
args = ["-l", "init.el"]
"#,
        )
        .unwrap();

        let merged = update.merge_into(&Config::default());
        assert!(merged.resolve_includes);
        assert!(merged.delete_temp_artifact);
        assert_eq!(merged.extractor, ExtractorKind::Emacs);
        assert_eq!(merged.emacs.program, "emacs");
        assert_eq!(merged.emacs.args, vec!["-l", "init.el"]);
    }
}
