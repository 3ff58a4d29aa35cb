//! Header argument parsing.
//!
//! Parses the value following a header argument such as `:tangle`, which
//! may be a bare word, a quoted string, or a parenthesized Lisp expression.

use std::ops::Range;

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_till1},
    character::complete::char,
    combinator::{map, verify},
    sequence::delimited,
    IResult, Parser,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern for a `:tangle` marker and the blanks separating it from its value.
static TANGLE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r":tangle[ \t]+").unwrap());

/// How a header argument value was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSyntax {
    /// A single whitespace-delimited token.
    Bare,
    /// A double-quoted string; the value excludes the quotes.
    Quoted,
    /// A parenthesized expression, evaluated by the extractor if at all.
    Expression,
}

/// A parsed header argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderValue<'a> {
    /// The value text (without quotes for quoted values).
    pub text: &'a str,
    /// How the value was written.
    pub syntax: ValueSyntax,
    /// Byte span of `text` relative to the parsed input.
    pub span: Range<usize>,
}

/// A `:tangle` annotation located in a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TangleAnnotation<'a> {
    /// Byte offset of the `:tangle` marker.
    pub marker_start: usize,
    /// The value, with its span made absolute within the scanned text.
    pub value: HeaderValue<'a>,
}

/// Parse a parenthesized expression, balancing nested parens and skipping
/// string literals. An unbalanced expression extends to the end of the line.
fn parse_expression(input: &str) -> IResult<&str, &str> {
    char::<_, nom::error::Error<&str>>('(').parse(input)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    let end = i + c.len_utf8();
                    return Ok((&input[end..], &input[..end]));
                }
            }
            '\n' | '\r' => break,
            _ => {}
        }
    }

    let end = input.find(['\n', '\r']).unwrap_or(input.len());
    Ok((&input[end..], &input[..end]))
}

/// Parse a double-quoted value on a single line.
fn parse_quoted(input: &str) -> IResult<&str, &str> {
    delimited(
        char('"'),
        take_till(|c: char| c == '"' || c == '\n' || c == '\r'),
        char('"'),
    )
    .parse(input)
}

/// Parse a bare token up to the next whitespace.
fn parse_bare(input: &str) -> IResult<&str, &str> {
    verify(take_till1(char::is_whitespace), |s: &str| !s.starts_with('"')).parse(input)
}

/// Parses a header argument value at the start of `input`.
///
/// Returns `None` for empty or malformed values (for instance an
/// unterminated quote); callers leave such values untouched.
pub fn parse_header_value(input: &str) -> Option<HeaderValue<'_>> {
    let (_, (text, syntax)) = alt((
        map(parse_expression, |t| (t, ValueSyntax::Expression)),
        map(parse_quoted, |t| (t, ValueSyntax::Quoted)),
        map(parse_bare, |t| (t, ValueSyntax::Bare)),
    ))
    .parse(input)
    .ok()?;

    if text.trim().is_empty() {
        return None;
    }

    let start = match syntax {
        ValueSyntax::Quoted => 1,
        _ => 0,
    };
    Some(HeaderValue {
        text,
        syntax,
        span: start..start + text.len(),
    })
}

/// Finds every well-formed `:tangle` annotation in `text`, in order.
///
/// Overlapping markers (a marker inside a previous value) are skipped.
pub fn find_tangle_annotations(text: &str) -> Vec<TangleAnnotation<'_>> {
    let mut found = Vec::new();
    let mut last_end = 0;

    for marker in TANGLE_MARKER.find_iter(text) {
        if marker.start() < last_end {
            continue;
        }
        let value_start = marker.end();
        let Some(mut value) = parse_header_value(&text[value_start..]) else {
            continue;
        };
        value.span = value_start + value.span.start..value_start + value.span.end;
        last_end = value.span.end;
        found.push(TangleAnnotation {
            marker_start: marker.start(),
            value,
        });
    }

    found
}

/// Returns the effective `:tangle` value of a header argument string.
///
/// When the argument is repeated the last occurrence wins.
pub fn find_tangle_arg(args: &str) -> Option<HeaderValue<'_>> {
    find_tangle_annotations(args).pop().map(|a| a.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_value() {
        let value = parse_header_value("yes :comments both").unwrap();
        assert_eq!(value.text, "yes");
        assert_eq!(value.syntax, ValueSyntax::Bare);
        assert_eq!(value.span, 0..3);
    }

    #[test]
    fn test_quoted_value() {
        let value = parse_header_value("\"out dir/x.py\" :mkdirp yes").unwrap();
        assert_eq!(value.text, "out dir/x.py");
        assert_eq!(value.syntax, ValueSyntax::Quoted);
        assert_eq!(value.span, 1..13);
    }

    #[test]
    fn test_expression_value() {
        let value = parse_header_value("(concat \"a)\" (f x)) :eval no").unwrap();
        assert_eq!(value.text, "(concat \"a)\" (f x))");
        assert_eq!(value.syntax, ValueSyntax::Expression);
    }

    #[test]
    fn test_unbalanced_expression_takes_line() {
        let value = parse_header_value("(concat \"a\"\nnext").unwrap();
        assert_eq!(value.text, "(concat \"a\"");
    }

    #[test]
    fn test_malformed_values() {
        assert!(parse_header_value("\"unterminated").is_none());
        assert!(parse_header_value("\"\"").is_none());
        assert!(parse_header_value("").is_none());
        assert!(parse_header_value("\nyes").is_none());
    }

    #[test]
    fn test_find_annotations_with_offsets() {
        let text = "#+begin_src python :tangle out.py\n#+begin_src sh :tangle \"a b.sh\"\n";
        let found = find_tangle_annotations(text);

        assert_eq!(found.len(), 2);
        assert_eq!(&text[found[0].value.span.clone()], "out.py");
        assert_eq!(&text[found[1].value.span.clone()], "a b.sh");
        assert_eq!(found[1].value.syntax, ValueSyntax::Quoted);
    }

    #[test]
    fn test_tangle_mode_is_not_tangle() {
        assert!(find_tangle_annotations(":tangle-mode (identity #o755)").is_empty());
    }

    #[test]
    fn test_last_tangle_arg_wins() {
        let value = find_tangle_arg(":tangle no :tangle yes").unwrap();
        assert_eq!(value.text, "yes");
        assert!(find_tangle_arg(":results output").is_none());
    }
}
