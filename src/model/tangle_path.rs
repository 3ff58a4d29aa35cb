//! Tangle destination rewriting.
//!
//! Included files may say `:tangle yes` or give paths relative to
//! themselves. Once spliced into a composite document those values would
//! be interpreted relative to the composite, so each annotation is pinned to
//! the file it textually lives in before splicing.

use std::path::{Path, PathBuf};

use crate::readers::{find_tangle_annotations, HeaderValue, ValueSyntax};

use super::document::normalize_path;

/// The meaning of a `:tangle` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TangleTarget<'a> {
    /// `yes`: the containing file, without extension.
    Yes,
    /// `root`: the root document, without extension.
    Root,
    /// `no`: the block is not extracted.
    No,
    /// A parenthesized expression, left for the extractor.
    Expression(&'a str),
    /// An absolute destination.
    Absolute(&'a str),
    /// A destination relative to the containing file.
    Relative(&'a str),
}

impl<'a> TangleTarget<'a> {
    /// Classifies a parsed header value.
    pub fn classify(value: &HeaderValue<'a>) -> Self {
        if value.syntax == ValueSyntax::Expression {
            return Self::Expression(value.text);
        }
        match value.text {
            "yes" => Self::Yes,
            "root" => Self::Root,
            "no" => Self::No,
            text if is_absolute(text) => Self::Absolute(text),
            text => Self::Relative(text),
        }
    }
}

/// Absolute in the extractor's sense: rooted, or relative to a home directory.
fn is_absolute(value: &str) -> bool {
    Path::new(value).is_absolute() || value.starts_with('~')
}

/// Strips the final extension from a path.
pub fn strip_extension(path: &Path) -> PathBuf {
    path.with_extension("")
}

/// Computes the replacement for a tangle value, or `None` to keep it.
fn replacement(target: TangleTarget<'_>, root_path: &Path, file_path: &Path) -> Option<PathBuf> {
    match target {
        TangleTarget::Yes => Some(strip_extension(file_path)),
        TangleTarget::Root => Some(strip_extension(root_path)),
        TangleTarget::No | TangleTarget::Expression(_) | TangleTarget::Absolute(_) => None,
        TangleTarget::Relative(value) => {
            let dir = file_path.parent().unwrap_or(Path::new(""));
            Some(normalize_path(&dir.join(value)))
        }
    }
}

/// Rewrites every `:tangle` annotation in `text` for a file at `file_path`
/// included (directly or transitively) from `root_path`.
///
/// Only annotation values change; all other text, including the quotes
/// around quoted values, is preserved.
pub fn rewrite_tangle_paths(text: &str, root_path: &Path, file_path: &Path) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for annotation in find_tangle_annotations(text) {
        let value = &annotation.value;
        let Some(new_path) = replacement(TangleTarget::classify(value), root_path, file_path)
        else {
            continue;
        };

        let new_value = new_path.to_string_lossy();
        output.push_str(&text[last..value.span.start]);
        if value.syntax == ValueSyntax::Bare && new_value.contains(char::is_whitespace) {
            output.push('"');
            output.push_str(&new_value);
            output.push('"');
        } else {
            output.push_str(&new_value);
        }
        last = value.span.end;
    }

    output.push_str(&text[last..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rewrite(text: &str) -> String {
        rewrite_tangle_paths(text, Path::new("main.org"), Path::new("foo/bar.org"))
    }

    #[test]
    fn test_yes_uses_file_path() {
        assert_eq!(
            rewrite("#+begin_src python :tangle yes\n"),
            "#+begin_src python :tangle foo/bar\n"
        );
    }

    #[test]
    fn test_root_uses_root_path() {
        assert_eq!(
            rewrite("#+begin_src python :tangle root :comments no\n"),
            "#+begin_src python :tangle main :comments no\n"
        );
    }

    #[test]
    fn test_no_is_unchanged() {
        let text = "#+begin_src python :tangle no\n";
        assert_eq!(rewrite(text), text);
    }

    #[test]
    fn test_expression_is_unchanged() {
        let text = "#+begin_src python :tangle (concat \"out\" \".py\")\n";
        assert_eq!(rewrite(text), text);
    }

    #[test]
    fn test_absolute_is_unchanged() {
        let text = "#+begin_src sh :tangle /tmp/x.sh\n#+begin_src sh :tangle ~/bin/y\n";
        assert_eq!(rewrite(text), text);
    }

    #[test]
    fn test_relative_joins_file_directory() {
        assert_eq!(
            rewrite_tangle_paths(
                ":tangle out/x.py",
                Path::new("main.org"),
                Path::new("sub/inc.org")
            ),
            ":tangle sub/out/x.py"
        );
    }

    #[test]
    fn test_relative_with_parent_component() {
        assert_eq!(
            rewrite_tangle_paths(
                ":tangle ../build/x.py",
                Path::new("main.org"),
                Path::new("sub/inc.org")
            ),
            ":tangle build/x.py"
        );
    }

    #[test]
    fn test_quoted_value_keeps_quotes() {
        assert_eq!(
            rewrite(":tangle \"src/my file.py\" :mkdirp yes"),
            ":tangle \"foo/src/my file.py\" :mkdirp yes"
        );
        assert_eq!(rewrite(":tangle \"yes\""), ":tangle \"foo/bar\"");
    }

    #[test]
    fn test_bare_replacement_with_spaces_is_quoted() {
        assert_eq!(
            rewrite_tangle_paths(":tangle yes", Path::new("main.org"), Path::new("my notes/a.org")),
            ":tangle \"my notes/a\""
        );
    }

    #[test]
    fn test_multiple_annotations_keep_positions() {
        let text = "a :tangle yes b\n:header-args: :tangle lib.py\nc :tangle no d\n";
        assert_eq!(
            rewrite(text),
            "a :tangle foo/bar b\n:header-args: :tangle foo/lib.py\nc :tangle no d\n"
        );
    }

    #[test]
    fn test_malformed_value_passes_through() {
        let text = ":tangle \"unterminated\n:tangle \n";
        assert_eq!(rewrite(text), text);
    }

    #[test]
    fn test_text_without_annotations() {
        assert_eq!(rewrite("* Heading\nplain text\n"), "* Heading\nplain text\n");
        assert_eq!(rewrite(""), "");
    }

    #[test]
    fn test_classify() {
        let value = crate::readers::parse_header_value("root").unwrap();
        assert_eq!(TangleTarget::classify(&value), TangleTarget::Root);

        let value = crate::readers::parse_header_value("(f)").unwrap();
        assert_eq!(TangleTarget::classify(&value), TangleTarget::Expression("(f)"));

        let value = crate::readers::parse_header_value("lib/x.py").unwrap();
        assert_eq!(TangleTarget::classify(&value), TangleTarget::Relative("lib/x.py"));
    }
}
