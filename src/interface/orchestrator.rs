//! Tangling with include resolution.
//!
//! A tangle request either goes straight to the extractor or is first
//! resolved into a composite document that the extractor reads instead of
//! the root.

use std::path::{Path, PathBuf};

use crate::config::Strategy;
use crate::errors::{OrgTangleError, Result};
use crate::extract::{ExtractArgs, ExtractReport, ExtractRequest};
use crate::io::Artifact;
use crate::model::IncludeNode;

use super::context::Context;

/// Result of one tangle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TangleOutcome {
    /// What the extractor produced.
    pub report: ExtractReport,
    /// The composite artifact, if one was written and kept.
    pub artifact: Option<PathBuf>,
    /// Include tree of the root, if includes were resolved.
    pub includes: Option<IncludeNode>,
}

/// Tangles `path` using the configured strategy.
pub fn tangle_file(ctx: &Context, path: &Path, args: &ExtractArgs) -> Result<TangleOutcome> {
    tangle_file_with_strategy(ctx, path, args, ctx.config.strategy())
}

/// Tangles the context's current document.
pub fn tangle_current_document(ctx: &Context, args: &ExtractArgs) -> Result<TangleOutcome> {
    tangle_current_document_with_strategy(ctx, args, ctx.config.strategy())
}

/// Tangles the context's current document with an explicit strategy.
pub fn tangle_current_document_with_strategy(
    ctx: &Context,
    args: &ExtractArgs,
    strategy: Strategy,
) -> Result<TangleOutcome> {
    match ctx.current_document() {
        Some(path) => tangle_file_with_strategy(ctx, &path, args, strategy),
        None => Err(OrgTangleError::UnsavedDocument(
            "<no current document>".to_string(),
        )),
    }
}

/// Tangles `path` with an explicit strategy.
///
/// Extractor arguments always bypass include resolution.
pub fn tangle_file_with_strategy(
    ctx: &Context,
    path: &Path,
    args: &ExtractArgs,
    strategy: Strategy,
) -> Result<TangleOutcome> {
    let root = ctx.resolve_path(path);

    if !args.is_plain() || !strategy.resolves_includes() {
        tracing::debug!("Tangling {} without include resolution", root.display());
        let report = ctx
            .extractor
            .extract(&ExtractRequest::direct(&root, args))?;
        return Ok(TangleOutcome {
            report,
            artifact: None,
            includes: None,
        });
    }

    if !ctx.file_cache.exists(&root) {
        return Err(OrgTangleError::UnsavedDocument(root.display().to_string()));
    }

    let resolution = ctx.resolver().resolve_with_tree(&root)?;
    let artifact = Artifact::write(&root, &resolution.text)?;
    tracing::info!(
        "Resolved {} document(s) into {}",
        resolution.tree.count(),
        artifact.path().display()
    );

    let result = ctx.extractor.extract(&ExtractRequest {
        source: artifact.path(),
        root: &root,
        args,
    });

    let kept = if ctx.config.delete_temp_artifact {
        artifact.delete()?;
        None
    } else {
        Some(artifact.path().to_path_buf())
    };

    Ok(TangleOutcome {
        report: result?,
        artifact: kept,
        includes: Some(resolution.tree),
    })
}
