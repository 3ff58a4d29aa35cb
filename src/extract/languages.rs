//! File extensions for Org source block languages.

use once_cell::sync::Lazy;

/// A language name, its aliases and the extension of tangled files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageExtension {
    /// Canonical Org Babel language name.
    pub name: &'static str,
    /// Other identifiers used in `#+begin_src` lines.
    pub aliases: &'static [&'static str],
    /// Extension appended to tangle targets that have none.
    pub extension: &'static str,
}

impl LanguageExtension {
    const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        extension: &'static str,
    ) -> Self {
        Self {
            name,
            aliases,
            extension,
        }
    }

    /// Checks if this entry matches the given identifier (case-insensitive).
    pub fn matches(&self, identifier: &str) -> bool {
        self.name.eq_ignore_ascii_case(identifier)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(identifier))
    }
}

/// Built-in language table, lazily initialized.
static BUILTIN_EXTENSIONS: Lazy<Vec<LanguageExtension>> = Lazy::new(|| {
    vec![
        // C-style languages
        LanguageExtension::new("C", &["c"], "c"),
        LanguageExtension::new("cpp", &["c++", "cxx"], "cpp"),
        LanguageExtension::new("java", &[], "java"),
        LanguageExtension::new("js", &["javascript"], "js"),
        LanguageExtension::new("typescript", &["ts"], "ts"),
        LanguageExtension::new("rust", &["rs"], "rs"),
        LanguageExtension::new("go", &[], "go"),
        LanguageExtension::new("kotlin", &["kt"], "kt"),
        LanguageExtension::new("scala", &[], "scala"),
        // Shell-style languages
        LanguageExtension::new("python", &["py", "python3"], "py"),
        LanguageExtension::new("ruby", &["rb"], "rb"),
        LanguageExtension::new("perl", &["pl"], "pl"),
        LanguageExtension::new("sh", &["bash", "shell", "zsh"], "sh"),
        LanguageExtension::new("R", &["r"], "R"),
        LanguageExtension::new("julia", &["jl"], "jl"),
        LanguageExtension::new("yaml", &["yml"], "yaml"),
        LanguageExtension::new("conf-toml", &["toml"], "toml"),
        LanguageExtension::new("makefile", &["make"], "mk"),
        // Lisp-style languages
        LanguageExtension::new("emacs-lisp", &["elisp"], "el"),
        LanguageExtension::new("lisp", &["cl"], "lisp"),
        LanguageExtension::new("scheme", &["scm"], "scm"),
        LanguageExtension::new("clojure", &["clj"], "clj"),
        // ML-style languages
        LanguageExtension::new("haskell", &["hs"], "hs"),
        LanguageExtension::new("ocaml", &["ml"], "ml"),
        // Web and data languages
        LanguageExtension::new("html", &[], "html"),
        LanguageExtension::new("css", &[], "css"),
        LanguageExtension::new("json", &[], "json"),
        LanguageExtension::new("sql", &[], "sql"),
        LanguageExtension::new("lua", &[], "lua"),
    ]
});

/// Returns the tangle extension for a source block language.
pub fn extension_for(language: &str) -> Option<&'static str> {
    BUILTIN_EXTENSIONS
        .iter()
        .find(|l| l.matches(language))
        .map(|l| l.extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(extension_for("python"), Some("py"));
        assert_eq!(extension_for("emacs-lisp"), Some("el"));
        assert_eq!(extension_for("bash"), Some("sh"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extension_for("Python"), Some("py"));
        assert_eq!(extension_for("c"), Some("c"));
    }

    #[test]
    fn test_unknown_language() {
        assert_eq!(extension_for("brainfuck"), None);
    }
}
