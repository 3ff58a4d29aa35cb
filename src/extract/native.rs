//! Built-in Org source block tangler.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::errors::{OrgTangleError, Result};
use crate::io::atomic_write;
use crate::model::{normalize_path, strip_extension, TangleTarget};
use crate::readers::{find_tangle_arg, read_source_blocks, PropertyDefault, SourceBlock};

use super::languages::extension_for;
use super::{ExtractArgs, ExtractReport, ExtractRequest, Extractor};

/// A file produced by tangling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TangledFile {
    /// Destination path.
    pub path: PathBuf,
    /// Full file content.
    pub content: String,
    /// Number of blocks that went into the file.
    pub blocks: usize,
}

/// Tangles `#+begin_src` blocks according to their `:tangle` header arguments.
#[derive(Debug, Clone, Default)]
pub struct NativeExtractor;

impl NativeExtractor {
    /// Creates a new native extractor.
    pub fn new() -> Self {
        Self
    }

    /// Computes the files `text` tangles into, without writing anything.
    ///
    /// Files are ordered by the first block that targets them; blocks within
    /// a file keep document order and are separated by a blank line.
    pub fn plan(&self, text: &str, root: &Path, args: &ExtractArgs) -> Vec<TangledFile> {
        let source = read_source_blocks(text);
        let wanted_target = args.target.as_deref().map(|t| resolve_target(t, root));
        let mut files: IndexMap<PathBuf, Vec<&str>> = IndexMap::new();

        for block in &source.blocks {
            if let Some(lang) = &args.lang {
                if !block
                    .language
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(lang))
                {
                    continue;
                }
            }

            let Some(target) = block_target(block, &source.defaults, root) else {
                continue;
            };
            if wanted_target.as_ref().is_some_and(|w| *w != target) {
                continue;
            }

            files.entry(target).or_default().push(&block.body);
        }

        files
            .into_iter()
            .map(|(path, bodies)| {
                let mut content = bodies.join("\n\n");
                content.push('\n');
                TangledFile {
                    path,
                    content,
                    blocks: bodies.len(),
                }
            })
            .collect()
    }
}

impl Extractor for NativeExtractor {
    fn name(&self) -> &str {
        "native"
    }

    fn extract(&self, request: &ExtractRequest<'_>) -> Result<ExtractReport> {
        let text = fs::read_to_string(request.source).map_err(|source| {
            OrgTangleError::ReadDocument {
                path: request.source.to_path_buf(),
                source,
            }
        })?;

        let mut report = ExtractReport::default();
        for file in self.plan(&text, request.root, request.args) {
            atomic_write(&file.path, &file.content)?;
            tracing::info!("Tangled {} block(s) into {}", file.blocks, file.path.display());
            report.blocks += file.blocks;
            report.written.push(file.path);
        }

        if report.written.is_empty() {
            tracing::info!("No blocks to tangle in {}", request.source.display());
        }
        Ok(report)
    }
}

/// Determines where a block tangles to, or `None` if it is not tangled.
///
/// File-wide defaults apply first (generic, then language-specific), then
/// the block's own header arguments; the last `:tangle` wins.
fn block_target(block: &SourceBlock, defaults: &[PropertyDefault], root: &Path) -> Option<PathBuf> {
    let language = block.language.as_deref();
    let generic = defaults.iter().filter(|d| d.language.is_none());
    let specific = defaults
        .iter()
        .filter(|d| d.language.is_some() && d.applies_to(language));

    let value = generic
        .chain(specific)
        .map(|d| d.args.as_str())
        .chain(block.header_args.iter().map(String::as_str))
        .filter_map(find_tangle_arg)
        .last()?;

    let base = match TangleTarget::classify(&value) {
        TangleTarget::No => return None,
        TangleTarget::Yes | TangleTarget::Root => strip_extension(root),
        TangleTarget::Expression(expr) => {
            tracing::warn!(
                "Skipping block at line {}: cannot evaluate :tangle {}",
                block.location.line,
                expr
            );
            return None;
        }
        TangleTarget::Absolute(path) | TangleTarget::Relative(path) => {
            resolve_target(Path::new(path), root)
        }
    };

    Some(with_language_extension(base, language))
}

/// Resolves a target path against the root document's directory.
fn resolve_target(path: &Path, root: &Path) -> PathBuf {
    let path = expand_home(path);
    if path.is_absolute() {
        normalize_path(&path)
    } else {
        let dir = root.parent().unwrap_or(Path::new(""));
        normalize_path(&dir.join(path))
    }
}

/// Expands a leading `~` to the home directory when it is known.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Appends the language's extension to targets that have none.
fn with_language_extension(path: PathBuf, language: Option<&str>) -> PathBuf {
    if path.extension().is_some() {
        return path;
    }
    match language.and_then(extension_for) {
        Some(ext) => path.with_extension(ext),
        None => path,
    }
}
