//! Line/column locations inside Org documents.

use std::fmt;
use std::path::PathBuf;

/// A position within a document, used to point at include directives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The file path (if known).
    pub filename: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in characters).
    pub column: usize,
}

impl TextLocation {
    /// Creates a new TextLocation.
    pub fn new(filename: Option<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            filename,
            line,
            column,
        }
    }

    /// Computes the location of a byte offset within `text`.
    ///
    /// Offsets past the end of `text` are clamped to the end.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &text[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Self {
            filename: None,
            line,
            column,
        }
    }

    /// Returns a new location with updated filename.
    pub fn with_filename(mut self, filename: PathBuf) -> Self {
        self.filename = Some(filename);
        self
    }
}

impl Default for TextLocation {
    fn default() -> Self {
        Self {
            filename: None,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{}:{}:{}", path.display(), self.line, self.column),
            None => write!(f, "line {}:{}", self.line, self.column),
        }
    }
}
