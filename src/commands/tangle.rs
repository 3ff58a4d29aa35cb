//! Tangle command implementation.

use std::path::PathBuf;

use crate::config::Strategy;
use crate::errors::Result;
use crate::extract::ExtractArgs;
use crate::interface::{
    tangle_current_document_with_strategy, tangle_file_with_strategy, Context, TangleOutcome,
};

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleOptions {
    /// Root documents to tangle (empty means the current document).
    pub files: Vec<PathBuf>,
    /// Glob patterns selecting more root documents.
    pub globs: Vec<String>,
    /// Extractor-specific arguments.
    pub args: ExtractArgs,
    /// Strategy override for this invocation.
    pub strategy: Option<Strategy>,
    /// Remove the composite artifact after extraction.
    pub delete_artifact: bool,
}

/// Executes the tangle command.
pub fn tangle(ctx: &mut Context, options: TangleOptions) -> Result<Vec<TangleOutcome>> {
    if options.delete_artifact {
        ctx.config.delete_temp_artifact = true;
    }
    let strategy = options.strategy.unwrap_or_else(|| ctx.config.strategy());

    let mut roots = options.files;
    roots.extend(ctx.glob_documents(&options.globs)?);

    let outcomes = if roots.is_empty() {
        tracing::info!("Tangling current document...");
        vec![tangle_current_document_with_strategy(
            ctx,
            &options.args,
            strategy,
        )?]
    } else {
        let mut outcomes = Vec::with_capacity(roots.len());
        for root in &roots {
            tracing::info!("Tangling {}...", root.display());
            outcomes.push(tangle_file_with_strategy(ctx, root, &options.args, strategy)?);
        }
        outcomes
    };

    let blocks: usize = outcomes.iter().map(|o| o.report.blocks).sum();
    let files: usize = outcomes.iter().map(|o| o.report.written.len()).sum();
    println!("Tangled {} block(s) into {} file(s).", blocks, files);

    Ok(outcomes)
}
