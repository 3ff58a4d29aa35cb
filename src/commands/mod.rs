//! CLI command implementations.

mod includes;
mod resolve;
mod tangle;

pub use includes::{includes, render_includes, IncludesOptions};
pub use resolve::{resolve, ResolveOptions};
pub use tangle::{tangle, TangleOptions};
