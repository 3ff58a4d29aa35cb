//! Code extraction from (composite) Org documents.
//!
//! The [`Extractor`] trait is the seam to the engine that turns annotated
//! source blocks into files. Include resolution only prepares its input.

mod emacs;
mod languages;
mod native;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{Config, ExtractorKind};
use crate::errors::Result;

pub use emacs::EmacsExtractor;
pub use languages::{extension_for, LanguageExtension};
pub use native::{NativeExtractor, TangledFile};

/// Extractor-specific arguments narrowing what gets tangled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractArgs {
    /// Only tangle blocks of this language.
    pub lang: Option<String>,
    /// Only tangle into this target file.
    pub target: Option<PathBuf>,
}

impl ExtractArgs {
    /// Returns true if no extractor-specific argument is set.
    pub fn is_plain(&self) -> bool {
        self.lang.is_none() && self.target.is_none()
    }
}

/// What an extractor is asked to do.
#[derive(Debug, Clone, Copy)]
pub struct ExtractRequest<'a> {
    /// The document to read blocks from (the composite artifact or the root itself).
    pub source: &'a Path,
    /// The root document `yes`/`root` targets and relative paths refer to.
    pub root: &'a Path,
    /// Extractor-specific arguments.
    pub args: &'a ExtractArgs,
}

impl<'a> ExtractRequest<'a> {
    /// A request extracting directly from `root`.
    pub fn direct(root: &'a Path, args: &'a ExtractArgs) -> Self {
        Self {
            source: root,
            root,
            args,
        }
    }
}

/// Outcome of an extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    /// Files written, when the extractor can tell.
    pub written: Vec<PathBuf>,
    /// Number of source blocks tangled.
    pub blocks: usize,
}

/// An engine that extracts annotated source blocks into files.
pub trait Extractor: Send + Sync + std::fmt::Debug {
    /// Returns the name of this extractor.
    fn name(&self) -> &str;

    /// Tangles the request's source document.
    fn extract(&self, request: &ExtractRequest<'_>) -> Result<ExtractReport>;
}

/// Builds the extractor selected by the configuration.
pub fn extractor_for(config: &Config) -> Box<dyn Extractor> {
    match config.extractor {
        ExtractorKind::Native => Box::new(NativeExtractor::new()),
        ExtractorKind::Emacs => Box::new(EmacsExtractor::new(config.emacs.clone())),
    }
}
