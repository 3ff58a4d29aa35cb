//! Resolve command: print or save the composite document.

use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::Context;
use crate::io::atomic_write;

/// Options for the resolve command.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Root document.
    pub file: PathBuf,
    /// Write the composite here instead of standard output.
    pub output: Option<PathBuf>,
}

/// Executes the resolve command.
pub fn resolve(ctx: &Context, options: ResolveOptions) -> Result<()> {
    let root = ctx.resolve_path(&options.file);
    let text = ctx.resolver().resolve(&root)?;

    match options.output {
        Some(output) => {
            let output = ctx.resolve_path(&output);
            atomic_write(&output, &text)?;
            tracing::info!("Wrote composite of {} to {}", root.display(), output.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
