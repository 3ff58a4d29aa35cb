//! Tangle strategy selection.

use serde::{Deserialize, Serialize};

/// How a tangle request is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Expand includes into a composite document, then extract from it.
    #[default]
    ResolveIncludes,

    /// Hand the document to the extractor as-is.
    Direct,
}

impl Strategy {
    /// Maps the `resolve_includes` configuration flag to a strategy.
    pub fn from_resolve_includes(resolve_includes: bool) -> Self {
        if resolve_includes {
            Strategy::ResolveIncludes
        } else {
            Strategy::Direct
        }
    }

    /// Returns true if includes are expanded before extraction.
    pub fn resolves_includes(&self) -> bool {
        matches!(self, Strategy::ResolveIncludes)
    }
}
