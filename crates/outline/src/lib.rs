//! Outline handling ahead of layout.
//!
//! - [`numbering`]: ordinal labels and the recursive prefixing pass
//! - [`tree`]: rebuilding a tree from `{title, level, page}` rows
//! - [`parse`]: reading either shape from JSON text

mod error;
pub mod numbering;
pub mod parse;
pub mod tree;

pub use error::OutlineError;
pub use numbering::{apply_numbering, generate_label, strip_numbering};
pub use parse::{parse_outline, read_outline_file};
pub use tree::{build_tree, FlatEntry};
pub use tocsmith_types::OutlineItem;
