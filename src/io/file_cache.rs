//! File system abstraction for testability.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::normalize_path;

/// Trait for reading documents, allowing both real and virtual implementations.
pub trait FileCache: Send + Sync + std::fmt::Debug {
    /// Reads the contents of a file.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Checks if a file exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists files matching a glob pattern.
    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>>;
}

/// Real file system implementation.
#[derive(Debug, Clone, Default)]
pub struct RealFileCache {
    /// Base directory for relative paths.
    pub base_dir: PathBuf,
}

impl RealFileCache {
    /// Creates a new RealFileCache with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl FileCache for RealFileCache {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let full_pattern = self.base_dir.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        let mut paths: Vec<PathBuf> = glob::glob(&pattern_str)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        Ok(paths)
    }
}

/// Virtual file system for testing.
///
/// Paths are normalized on insertion and lookup, so `a/../b.org` and
/// `b.org` name the same file.
#[derive(Debug, Clone, Default)]
pub struct VirtualFS {
    /// Files stored in memory.
    files: HashMap<PathBuf, String>,
}

impl VirtualFS {
    /// Creates a new empty virtual file system.
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
        }
    }

    /// Adds a file to the virtual file system.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files
            .insert(normalize_path(path.as_ref()), content.into());
    }

    /// Builder-style variant of [`VirtualFS::add_file`].
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Lists all files in the virtual file system.
    pub fn list_files(&self) -> Vec<&PathBuf> {
        self.files.keys().collect()
    }
}

impl FileCache for VirtualFS {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "File not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    fn glob(&self, pattern: &str) -> io::Result<Vec<PathBuf>> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut matches: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| glob_pattern.matches_path(p))
            .cloned()
            .collect();
        matches.sort();

        Ok(matches)
    }
}
