use thiserror::Error;
use tocsmith_traits::ResourceError;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to load font '{path}': {source}")]
    FontLoad {
        path: String,
        #[source]
        source: ResourceError,
    },
    #[error("Font '{name}' could not be parsed: {message}")]
    FontParse { name: String, message: String },
}

mod afm;
pub mod config;
pub mod encoding;
pub mod engine;
pub mod fonts;
pub mod output;
pub mod text;

pub use self::config::LayoutConfig;
pub use self::engine::{Cursor, TocLayoutEngine};
pub use self::fonts::{FaceMetrics, FontFace, FontLibrary, StandardFont, TrueTypeFace};
pub use self::output::{RunKind, TextRun, TocLayout, TocPage};
pub use self::text::sanitize_text;

pub use tocsmith_traits::{FontRole, TextMeasurer};
pub use tocsmith_types::{Rect, Size};

#[cfg(test)]
mod test_utils;
