//! Org source block extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_location::TextLocation;

/// Pattern for a source block opening line.
static BEGIN_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[ \t]*#\+begin_src(?:[ \t]+(?P<lang>[^ \t:][^ \t]*))?(?P<args>.*)$").unwrap()
});

/// Pattern for a source block closing line.
static END_SRC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[ \t]*#\+end_src\b").unwrap());

/// Pattern for `#+header:` lines attached to the following block.
static HEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[ \t]*#\+header:(?P<args>.*)$").unwrap());

/// Pattern for file-wide `#+property: header-args[:lang] ...` defaults.
static HEADER_ARGS_PROPERTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[ \t]*#\+property:[ \t]+header-args(?::(?P<lang>[^ \t+]+))?\+?(?P<args>.*)$")
        .unwrap()
});

/// Pattern for Org's comma escaping of lines that look like markup.
static COMMA_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([ \t]*),(\*|#\+)").unwrap());

/// A source block read from an Org document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlock {
    /// Language identifier from the `#+begin_src` line.
    pub language: Option<String>,
    /// Header argument strings, `#+header:` lines first, then the block line.
    pub header_args: Vec<String>,
    /// The de-indented, unescaped block body (no trailing newline).
    pub body: String,
    /// Location of the `#+begin_src` line.
    pub location: TextLocation,
}

/// A file-wide header argument default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefault {
    /// Language the default is restricted to, if any.
    pub language: Option<String>,
    /// The header argument string.
    pub args: String,
}

impl PropertyDefault {
    /// Returns true if this default applies to blocks of `language`.
    pub fn applies_to(&self, language: Option<&str>) -> bool {
        match &self.language {
            None => true,
            Some(lang) => language.is_some_and(|l| l.eq_ignore_ascii_case(lang)),
        }
    }
}

/// Source blocks and header defaults of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgSource {
    /// `#+property: header-args` defaults, in document order.
    pub defaults: Vec<PropertyDefault>,
    /// All closed source blocks, in document order.
    pub blocks: Vec<SourceBlock>,
}

/// Reads all source blocks from an Org document.
///
/// Unclosed blocks are dropped with a warning.
pub fn read_source_blocks(input: &str) -> OrgSource {
    let mut source = OrgSource::default();
    let mut pending_headers: Vec<String> = Vec::new();
    let mut lines = input.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        if let Some(caps) = HEADER_ARGS_PROPERTY.captures(line) {
            source.defaults.push(PropertyDefault {
                language: caps.name("lang").map(|m| m.as_str().to_string()),
                args: caps["args"].trim().to_string(),
            });
            pending_headers.clear();
            continue;
        }

        if let Some(caps) = HEADER_LINE.captures(line) {
            pending_headers.push(caps["args"].trim().to_string());
            continue;
        }

        let Some(caps) = BEGIN_SRC.captures(line) else {
            pending_headers.clear();
            continue;
        };

        let start_line = index + 1;
        let language = caps.name("lang").map(|m| m.as_str().to_string());
        let mut header_args = std::mem::take(&mut pending_headers);
        header_args.push(caps["args"].trim().to_string());

        let mut body_lines = Vec::new();
        let mut closed = false;
        for (_, body_line) in lines.by_ref() {
            if END_SRC.is_match(body_line) {
                closed = true;
                break;
            }
            body_lines.push(body_line);
        }

        if !closed {
            tracing::warn!("Unclosed source block at line {}", start_line);
            break;
        }

        source.blocks.push(SourceBlock {
            language,
            header_args,
            body: clean_body(&body_lines),
            location: TextLocation::new(None, start_line, 1),
        });
    }

    source
}

/// Removes common indentation and comma escapes from block lines.
fn clean_body(lines: &[&str]) -> String {
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            let stripped = if line.len() >= indent {
                &line[indent..]
            } else {
                line.trim_start_matches([' ', '\t'])
            };
            COMMA_ESCAPE.replace(stripped, "$1$2").into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
