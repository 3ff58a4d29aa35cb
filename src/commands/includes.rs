//! Includes command: show which documents a root pulls in.

use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::Context;

/// Options for the includes command.
#[derive(Debug, Clone, Default)]
pub struct IncludesOptions {
    /// Root document.
    pub file: PathBuf,
    /// Print the tree as JSON.
    pub json: bool,
}

/// Renders the include tree of the root document.
pub fn render_includes(ctx: &Context, options: &IncludesOptions) -> Result<String> {
    let root = ctx.resolve_path(&options.file);
    let tree = ctx.resolver().resolve_with_tree(&root)?.tree;

    if options.json {
        Ok(serde_json::to_string_pretty(&tree)?)
    } else {
        Ok(tree.outline())
    }
}

/// Executes the includes command.
pub fn includes(ctx: &Context, options: IncludesOptions) -> Result<()> {
    let rendered = render_includes(ctx, &options)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, Context) {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("main.org"),
            "* Book\n#+include: \"ch1.org\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("ch1.org"), "* One\n").unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        (dir, ctx)
    }

    #[test]
    fn test_outline() {
        let (dir, ctx) = setup();
        let options = IncludesOptions {
            file: PathBuf::from("main.org"),
            json: false,
        };

        let rendered = render_includes(&ctx, &options).unwrap();
        let expected = format!(
            "{}\n  {} (line 2)\n",
            dir.path().join("main.org").display(),
            dir.path().join("ch1.org").display()
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_json() {
        let (dir, ctx) = setup();
        let options = IncludesOptions {
            file: PathBuf::from("main.org"),
            json: true,
        };

        let rendered = render_includes(&ctx, &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            value["includes"][0]["path"],
            dir.path().join("ch1.org").display().to_string()
        );
        assert_eq!(value["includes"][0]["line"], 2);
    }
}
