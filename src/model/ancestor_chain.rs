//! Immutable ancestor chain for include cycle detection.

use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug)]
struct Link {
    path: PathBuf,
    parent: Option<Rc<Link>>,
}

/// The documents currently being expanded, from the root downwards.
///
/// Extending a chain returns a new chain sharing the old links; the
/// original is never mutated, so sibling branches of the include graph
/// each see only their own ancestors.
#[derive(Debug, Clone, Default)]
pub struct AncestorChain {
    head: Option<Rc<Link>>,
    len: usize,
}

impl AncestorChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new chain with `path` appended as the innermost ancestor.
    #[must_use]
    pub fn extended(&self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug_assert!(!self.contains(&path), "{} already in chain", path.display());
        Self {
            head: Some(Rc::new(Link {
                path,
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Returns true if `path` is one of the ancestors.
    pub fn contains(&self, path: &Path) -> bool {
        self.iter().any(|p| p == path)
    }

    /// Number of ancestors.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no ancestors.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates from the innermost ancestor outwards.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        std::iter::successors(self.head.as_deref(), |link| link.parent.as_deref())
            .map(|link| link.path.as_path())
    }

    /// Returns the ancestors ordered from the root down.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.iter().map(Path::to_path_buf).collect();
        paths.reverse();
        paths
    }
}
