//! Synthesizes a clickable table of contents and splices it into a PDF.
//!
//! ```no_run
//! use tocsmith::{FontLibrary, TocConfig, load_document, read_outline_file, synthesize_toc};
//!
//! # fn main() -> Result<(), tocsmith::TocError> {
//! let source = load_document("report.pdf")?;
//! let outline = read_outline_file("outline.json")?;
//! let mut result = synthesize_toc(&source, &outline, &TocConfig::default(), &FontLibrary::standard())?;
//! result.save("report-with-toc.pdf")?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod pipeline;

pub use config::{FontPaths, TocConfig};
pub use error::TocError;
pub use pipeline::{SynthesizedToc, load_document, synthesize_toc};

pub use tocsmith_layout::{FontLibrary, LayoutConfig};
pub use tocsmith_outline::{FlatEntry, apply_numbering, build_tree, parse_outline, read_outline_file};
pub use tocsmith_pdf_composer::import_outline;
pub use tocsmith_style::{LevelStyle, NumeralStyle, StyleTable};
pub use tocsmith_types::{Color, OutlineItem};
