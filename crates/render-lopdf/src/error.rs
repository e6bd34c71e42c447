use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Failed to encode content stream for ToC page {page}: {message}")]
    ContentEncoding { page: usize, message: String },
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
