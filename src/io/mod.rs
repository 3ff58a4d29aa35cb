//! I/O operations for reading documents and writing outputs.

mod artifact;
mod file_cache;

pub use artifact::{artifact_path, atomic_write, Artifact, ARTIFACT_SUFFIX};
pub use file_cache::{FileCache, RealFileCache, VirtualFS};
