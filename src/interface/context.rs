//! Execution context for orgtangle operations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::errors::Result;
use crate::extract::{extractor_for, Extractor};
use crate::io::{FileCache, RealFileCache, ARTIFACT_SUFFIX};
use crate::model::{normalize_path, Resolver};

/// Context for orgtangle operations.
///
/// Contains configuration, file system access and the extractor.
#[derive(Debug)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// File cache for reading documents.
    pub file_cache: Arc<dyn FileCache>,
    /// Engine that tangles (composite) documents.
    pub extractor: Box<dyn Extractor>,
    /// Base directory for operations.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a new context with the given configuration.
    ///
    /// A relative `base_dir` is made absolute against the working directory,
    /// so every path handed to the resolver and extractor is absolute.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        let base_dir = match std::path::absolute(&base_dir) {
            Ok(absolute) => normalize_path(&absolute),
            Err(_) => base_dir,
        };
        let file_cache = Arc::new(RealFileCache::new(base_dir.clone()));
        let extractor = extractor_for(&config);

        Self {
            config,
            file_cache,
            extractor,
            base_dir,
        }
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Self {
        Self::new(Config::default(), base_dir)
    }

    /// Creates a context from the current directory.
    pub fn from_current_dir() -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let config = crate::config::read_config(&base_dir)?;
        Ok(Self::new(config, base_dir))
    }

    /// Replaces the extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Sets the document `tangle_current_document` operates on.
    pub fn set_current_document(&mut self, path: Option<PathBuf>) {
        self.config.document = path;
    }

    /// Returns the current document, resolved against the base directory.
    pub fn current_document(&self) -> Option<PathBuf> {
        self.config.document().map(|p| self.resolve_path(p))
    }

    /// Returns a resolver reading through this context's file cache.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.file_cache.as_ref())
    }

    /// Returns Org documents matching the given glob patterns.
    ///
    /// Composite artifacts are never returned.
    pub fn glob_documents(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for pattern in patterns {
            glob::Pattern::new(pattern)?;
            files.extend(self.file_cache.glob(pattern)?);
        }
        files.retain(|p| !is_artifact(p));
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_path(path)
        } else {
            normalize_path(&self.base_dir.join(path))
        }
    }
}

fn is_artifact(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') && n.ends_with(ARTIFACT_SUFFIX))
}
