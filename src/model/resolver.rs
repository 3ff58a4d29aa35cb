//! Recursive include resolution.
//!
//! Expands `#+include:` directives depth-first into one composite text.
//! Each included file is fully resolved with its own `:tangle` annotations
//! pinned to its path before it is spliced into its parent. Annotations of
//! nested files were already pinned one level down and are not re-anchored.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::{OrgTangleError, Result};
use crate::io::FileCache;
use crate::readers::{segments, Segment};

use super::ancestor_chain::AncestorChain;
use super::document::{normalize_path, Document};
use super::tangle_path::rewrite_tangle_paths;

/// One node of the include tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeNode {
    /// Path of the document.
    pub path: PathBuf,
    /// Line of the directive that included it (`None` for the root).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Documents included from this one, in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<IncludeNode>,
}

impl IncludeNode {
    fn new(path: PathBuf, line: Option<usize>) -> Self {
        Self {
            path,
            line,
            includes: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.includes.iter().map(IncludeNode::count).sum::<usize>()
    }

    /// Renders the tree as an indented outline, one document per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.path.display().to_string());
        if let Some(line) = self.line {
            out.push_str(&format!(" (line {})", line));
        }
        out.push('\n');
        for child in &self.includes {
            child.write_outline(depth + 1, out);
        }
    }
}

/// The result of resolving a root document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The composite text.
    pub text: String,
    /// Which documents were included from where.
    pub tree: IncludeNode,
}

/// Expands include directives using a [`FileCache`] for reads.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    cache: &'a dyn FileCache,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver reading through `cache`.
    pub fn new(cache: &'a dyn FileCache) -> Self {
        Self { cache }
    }

    /// Resolves `root` into its composite text.
    pub fn resolve(&self, root: &Path) -> Result<String> {
        self.resolve_with_tree(root).map(|r| r.text)
    }

    /// Resolves `root`, also returning the include tree.
    pub fn resolve_with_tree(&self, root: &Path) -> Result<Resolution> {
        let root = normalize_path(root);
        let document = Document::load(self.cache, &root).map_err(|source| {
            OrgTangleError::ReadDocument {
                path: root.clone(),
                source,
            }
        })?;

        tracing::debug!("Resolving includes of {}", root.display());
        let resolution = self.expand(&document, &root, &AncestorChain::new(), None, false)?;
        tracing::debug!(
            "Resolved {} into {} documents",
            root.display(),
            resolution.tree.count()
        );
        Ok(resolution)
    }

    /// Expands `document`, whose ancestors (excluding itself) are `chain`.
    ///
    /// A directive naming `document` itself or any ancestor is a cycle.
    ///
    /// With `pin` set, the document's own `:tangle` annotations are rewritten
    /// relative to its path; the root document is left as written.
    fn expand(
        &self,
        document: &Document,
        root: &Path,
        chain: &AncestorChain,
        line: Option<usize>,
        pin: bool,
    ) -> Result<Resolution> {
        let mut text = String::with_capacity(document.text.len() + 1);
        let mut tree = IncludeNode::new(document.path.clone(), line);
        let ancestors = chain.extended(document.path.clone());

        for segment in segments(&document.text) {
            let directive = match segment {
                Segment::Literal(literal) if pin => {
                    text.push_str(&rewrite_tangle_paths(literal, root, &document.path));
                    continue;
                }
                Segment::Literal(literal) => {
                    text.push_str(literal);
                    continue;
                }
                Segment::Include(directive) => directive,
            };

            let target = document.resolve_reference(&directive.path);
            if ancestors.contains(&target) {
                return Err(OrgTangleError::CyclicDependency {
                    path: target,
                    chain: ancestors.paths(),
                });
            }

            let location = directive
                .location
                .clone()
                .with_filename(document.path.clone());
            let included = Document::load(self.cache, &target).map_err(|source| {
                OrgTangleError::MissingInclude {
                    path: target.clone(),
                    location: location.clone(),
                    source,
                }
            })?;

            tracing::debug!(
                depth = chain.len() + 1,
                "Including {} at {}",
                target.display(),
                location
            );
            let child = self.expand(
                &included,
                root,
                &ancestors,
                Some(location.line),
                true,
            )?;

            text.push_str(&child.text);
            tree.includes.push(child.tree);
        }

        text.push('\n');
        Ok(Resolution { text, tree })
    }
}

/// Resolves `root` through `cache` into its composite text.
pub fn resolve(cache: &dyn FileCache, root: &Path) -> Result<String> {
    Resolver::new(cache).resolve(root)
}
