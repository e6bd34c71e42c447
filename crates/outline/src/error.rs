use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Outline JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read outline file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Outline must be a JSON array of entries")]
    NotAnArray,
}
