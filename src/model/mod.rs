//! Documents, include resolution and tangle path rewriting.

mod ancestor_chain;
mod document;
mod resolver;
mod tangle_path;

pub use ancestor_chain::AncestorChain;
pub use document::{normalize_path, Document};
pub use resolver::{resolve, IncludeNode, Resolution, Resolver};
pub use tangle_path::{rewrite_tangle_paths, strip_extension, TangleTarget};
