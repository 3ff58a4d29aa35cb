//! Tangling through a batch Emacs process running Org Babel.

use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EmacsConfig;
use crate::errors::{OrgTangleError, Result};

use super::{ExtractReport, ExtractRequest, Extractor};

static TANGLED_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Tangled (\d+) code blocks? from").unwrap());

/// Runs `org-babel-tangle-file` in a batch Emacs.
#[derive(Debug, Clone, Default)]
pub struct EmacsExtractor {
    config: EmacsConfig,
}

impl EmacsExtractor {
    /// Creates an extractor using the given Emacs settings.
    pub fn new(config: EmacsConfig) -> Self {
        Self { config }
    }

    /// Builds the Emacs invocation for a request.
    pub fn command(&self, request: &ExtractRequest<'_>) -> Command {
        let target = request
            .args
            .target
            .as_ref()
            .map(|t| elisp_string(&t.to_string_lossy()))
            .unwrap_or_else(|| "nil".to_string());
        let lang = request
            .args
            .lang
            .as_ref()
            .map(|l| elisp_string(&format!("^{}$", l)))
            .unwrap_or_else(|| "nil".to_string());

        let form = format!(
            "(progn (require 'ob-tangle) (org-babel-tangle-file {} {} {}))",
            elisp_string(&request.source.to_string_lossy()),
            target,
            lang
        );

        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .args(["--batch", "-l", "org", "--eval"])
            .arg(form);
        cmd
    }
}

impl Extractor for EmacsExtractor {
    fn name(&self) -> &str {
        "emacs"
    }

    fn extract(&self, request: &ExtractRequest<'_>) -> Result<ExtractReport> {
        tracing::debug!(
            "Running {} on {}",
            self.config.program,
            request.source.display()
        );
        let output = self.command(request).output().map_err(|e| {
            OrgTangleError::Extractor(format!("failed to run {}: {}", self.config.program, e))
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(OrgTangleError::Extractor(stderr.trim().to_string()));
        }

        let blocks = TANGLED_COUNT
            .captures(&stderr)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(0);
        tracing::info!("Emacs tangled {} block(s) from {}", blocks, request.source.display());

        Ok(ExtractReport {
            written: Vec::new(),
            blocks,
        })
    }
}

/// Quotes a value as an Emacs Lisp string literal.
fn elisp_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
