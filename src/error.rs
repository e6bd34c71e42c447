use thiserror::Error;
use tocsmith_layout::LayoutError;
use tocsmith_outline::OutlineError;
use tocsmith_pdf_composer::ComposerError;
use tocsmith_render_lopdf::RenderError;
use tocsmith_traits::ResourceError;

/// A comprehensive error type for the ToC synthesis pipeline.
#[derive(Error, Debug)]
pub enum TocError {
    #[error("Outline could not be read: {0}")]
    Outline(#[from] OutlineError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Composing the output document failed: {0}")]
    Composer(#[from] ComposerError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Configuration is invalid: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode the output document: {0}")]
    Encode(String),

    #[error("Font path '{0}' does not name a file")]
    FontPath(String),
}
