//! Readers for Org document syntax.

mod header_args;
mod scanner;
mod src_blocks;

pub use header_args::{
    find_tangle_annotations, find_tangle_arg, parse_header_value, HeaderValue, TangleAnnotation,
    ValueSyntax,
};
pub use scanner::{segments, IncludeDirective, IncludeScanner, Segment};
pub use src_blocks::{read_source_blocks, OrgSource, PropertyDefault, SourceBlock};
