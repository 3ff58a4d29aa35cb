//! orgtangle - Include-aware tangling for Org documents
//!
//! Org documents can pull in other documents with `#+include: "path"`.
//! Before tangling, orgtangle expands those directives recursively into one
//! composite document, rewriting each included file's `:tangle` paths so they
//! still point where the author meant, and rejecting include cycles.
//!
//! # Features
//!
//! - **Resolve**: Expand includes depth-first with cycle detection
//! - **Rewrite**: Re-anchor `:tangle yes`, `root` and relative targets
//! - **Tangle**: Hand the composite to a native or Emacs extractor
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use orgtangle::extract::ExtractArgs;
//! use orgtangle::interface::{tangle_file, Context};
//!
//! let ctx = Context::from_current_dir().unwrap();
//! tangle_file(&ctx, Path::new("book.org"), &ExtractArgs::default()).unwrap();
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod extract;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;

// Re-export commonly used types
pub use config::{Config, Strategy};
pub use errors::{OrgTangleError, Result};
pub use extract::{ExtractArgs, Extractor};
pub use interface::{tangle_current_document, tangle_file, Context};
pub use model::{resolve, rewrite_tangle_paths, Resolver};

// Re-export command options
pub use commands::{IncludesOptions, ResolveOptions, TangleOptions};
