//! High-level interface for orgtangle operations.

mod context;
mod orchestrator;

pub use context::Context;
pub use orchestrator::{
    tangle_current_document, tangle_current_document_with_strategy, tangle_file,
    tangle_file_with_strategy, TangleOutcome,
};
