//! Extractor selection.

use serde::{Deserialize, Deserializer, Serialize};

/// Which extraction engine tangles the composite document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// The built-in Org source block tangler.
    #[default]
    Native,

    /// `org-babel-tangle-file` run by a batch Emacs.
    Emacs,
}

impl<'de> Deserialize<'de> for ExtractorKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "native" | "builtin" => Ok(ExtractorKind::Native),
            "emacs" | "org-babel" => Ok(ExtractorKind::Emacs),
            _ => Err(serde::de::Error::custom(format!(
                "unknown extractor: '{}' (expected 'native' or 'emacs')",
                s
            ))),
        }
    }
}
