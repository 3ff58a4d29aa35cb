//! Include directive scanning.
//!
//! Locates `#+include: "<path>"` lines and tokenizes a document into
//! literal text and directive segments. The resolver builds its output by
//! concatenating segments, so no text is ever edited in place.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_location::TextLocation;

/// Pattern for a whole include directive line.
///
/// Only literal quoted paths are recognized; anything after the closing
/// quote belongs to the line but is not part of the directive's target.
static INCLUDE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?mi)^[ \t]*#\+include:[ \t]*"(?P<path>[^"\r\n]+)"[^\r\n]*"#).unwrap()
});

/// An include directive found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// The referenced path exactly as written between the quotes.
    pub path: String,
    /// Byte span of the directive line, excluding the line terminator.
    pub span: Range<usize>,
    /// Location of the directive within its document.
    pub location: TextLocation,
}

/// A lazy, restartable sequence of include directives.
///
/// Cloning the scanner captures its position, so a scan can be resumed
/// from any earlier point.
#[derive(Debug, Clone)]
pub struct IncludeScanner<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> IncludeScanner<'a> {
    /// Creates a scanner starting at the beginning of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    /// Creates a scanner yielding only directives at or after `offset`.
    pub fn from_offset(text: &'a str, offset: usize) -> Self {
        let mut scanner = Self::new(text);
        scanner.restart_at(offset);
        scanner
    }

    /// Moves the scan position to `offset`.
    pub fn restart_at(&mut self, offset: usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset += 1;
        }
        self.offset = offset;
    }
}

impl Iterator for IncludeScanner<'_> {
    type Item = IncludeDirective;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.text.len() {
            return None;
        }
        let caps = INCLUDE_LINE.captures_at(self.text, self.offset)?;
        let whole = caps.get(0)?;
        self.offset = whole.end();

        Some(IncludeDirective {
            path: caps["path"].to_string(),
            span: whole.range(),
            location: TextLocation::from_offset(self.text, whole.start()),
        })
    }
}

/// A piece of a tokenized document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output unchanged.
    Literal(&'a str),
    /// A directive to be replaced by the referenced document.
    Include(IncludeDirective),
}

/// Splits `text` into literal and include segments.
///
/// Concatenating the literals with the directive lines reproduces `text`.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut result = Vec::new();
    let mut last = 0;

    for directive in IncludeScanner::new(text) {
        if directive.span.start > last {
            result.push(Segment::Literal(&text[last..directive.span.start]));
        }
        last = directive.span.end;
        result.push(Segment::Include(directive));
    }

    if last < text.len() {
        result.push(Segment::Literal(&text[last..]));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_include() {
        let text = "* Heading\n#+include: \"chapter.org\"\nbody\n";
        let found: Vec<_> = IncludeScanner::new(text).collect();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "chapter.org");
        assert_eq!(&text[found[0].span.clone()], "#+include: \"chapter.org\"");
        assert_eq!(found[0].location.line, 2);
    }

    #[test]
    fn test_case_insensitive_and_indented() {
        let text = "  #+INCLUDE: \"a.org\"\n#+Include:\"b.org\"\n";
        let paths: Vec<_> = IncludeScanner::new(text).map(|d| d.path).collect();
        assert_eq!(paths, vec!["a.org", "b.org"]);
    }

    #[test]
    fn test_trailing_content_is_part_of_span() {
        let text = "#+include: \"code.org\" :minlevel 2\nnext";
        let found: Vec<_> = IncludeScanner::new(text).collect();

        assert_eq!(found[0].path, "code.org");
        assert_eq!(found[0].span, 0..text.find('\n').unwrap());
    }

    #[test]
    fn test_unquoted_is_not_followed() {
        let text = "#+include: chapter.org\n#+include: (concat \"a\" \".org\")\n";
        assert_eq!(IncludeScanner::new(text).count(), 0);
    }

    #[test]
    fn test_directive_must_start_line() {
        let text = "see #+include: \"a.org\" for details\n";
        assert_eq!(IncludeScanner::new(text).count(), 0);
    }

    #[test]
    fn test_from_offset_skips_earlier_matches() {
        let text = "#+include: \"a.org\"\n#+include: \"b.org\"\n";
        let second = text.find("#+include: \"b").unwrap();

        let paths: Vec<_> = IncludeScanner::from_offset(text, second)
            .map(|d| d.path)
            .collect();
        assert_eq!(paths, vec!["b.org"]);
    }

    #[test]
    fn test_restartable() {
        let text = "#+include: \"a.org\"\n#+include: \"b.org\"\n";
        let mut scanner = IncludeScanner::new(text);
        let saved = scanner.clone();

        assert_eq!(scanner.next().unwrap().path, "a.org");
        assert_eq!(scanner.next().unwrap().path, "b.org");
        assert!(scanner.next().is_none());

        let replay: Vec<_> = saved.map(|d| d.path).collect();
        assert_eq!(replay, vec!["a.org", "b.org"]);

        scanner.restart_at(0);
        assert_eq!(scanner.count(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "#+include: \"a.org\"\r\nrest\r\n";
        let found: Vec<_> = IncludeScanner::new(text).collect();
        assert_eq!(&text[found[0].span.clone()], "#+include: \"a.org\"");
    }

    #[test]
    fn test_segments_cover_text() {
        let text = "before\n#+include: \"a.org\"\nbetween\n#+include: \"b.org\"";
        let segs = segments(text);

        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0], Segment::Literal("before\n"));
        assert!(matches!(&segs[1], Segment::Include(d) if d.path == "a.org"));
        assert_eq!(segs[2], Segment::Literal("\nbetween\n"));
        assert!(matches!(&segs[3], Segment::Include(d) if d.path == "b.org"));

        let rebuilt: String = segs
            .iter()
            .map(|s| match s {
                Segment::Literal(t) => *t,
                Segment::Include(d) => &text[d.span.clone()],
            })
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_segments_without_directives() {
        assert_eq!(segments("plain"), vec![Segment::Literal("plain")]);
        assert!(segments("").is_empty());
    }
}
