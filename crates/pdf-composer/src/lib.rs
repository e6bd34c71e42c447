//! PDF composition for generated tables of contents.
//!
//! This crate provides low-level PDF manipulation using lopdf:
//! - Deep object copying with cycle detection
//! - Splicing ToC pages into a copy of a source document
//! - Resolving pending ToC links once final page objects exist
//! - Writing and importing bookmark outlines

mod annotations;
mod copier;
mod error;
mod outline;
mod pages;
mod splice;

pub use annotations::{attach_annotation, resolve_links};
pub use error::ComposerError;
pub use outline::{decode_text_string, encode_text_string, import_outline, write_bookmarks};
pub use pages::{page_ids, page_size, toc_page_size};
pub use splice::{PageIndexMap, Splice, clamp_insertion_page, splice};
