use lopdf::ObjectId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Pending link refers to ToC page {index}, but only {available} were spliced in")]
    MissingTocPage { index: usize, available: usize },

    #[error("Object {0:?} is not a page dictionary")]
    NotAPage(ObjectId),
}
