//! Documents and path normalization.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::io::FileCache;

/// Normalizes a path lexically, folding `.` and `..` components.
///
/// The file system is never consulted, so symlinks are not resolved.
/// Leading `..` components of relative paths are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    out
}

/// A document read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Normalized path of the document.
    pub path: PathBuf,
    /// Raw document text.
    pub text: String,
    /// Directory that relative references inside the document resolve against.
    pub base_dir: PathBuf,
}

impl Document {
    /// Creates a document from a path and its text.
    pub fn new(path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        let path = normalize_path(path.as_ref());
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            path,
            text: text.into(),
            base_dir,
        }
    }

    /// Reads a document through the file cache.
    pub fn load(cache: &dyn FileCache, path: &Path) -> io::Result<Self> {
        let text = cache.read(path)?;
        Ok(Self::new(path, text))
    }

    /// Resolves a reference found in this document to a normalized path.
    ///
    /// Absolute references are only normalized; relative ones are joined
    /// onto the document's base directory first.
    pub fn resolve_reference(&self, reference: &str) -> PathBuf {
        let reference = Path::new(reference);
        if reference.is_absolute() {
            normalize_path(reference)
        } else {
            normalize_path(&self.base_dir.join(reference))
        }
    }
}
