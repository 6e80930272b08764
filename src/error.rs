use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rubric: {0}")]
    InvalidRubric(String),
    #[error("invalid assessment: {0}")]
    InvalidAssessment(String),
    /// The letterhead could not be read, decoded or drawn.
    #[error("letterhead asset: {0}")]
    Asset(String),
    #[error("page {index} out of range ({count} pages)")]
    PageOutOfRange { index: usize, count: usize },
}

impl Error {
    pub(crate) fn asset(context: impl fmt::Display, cause: impl fmt::Display) -> Self {
        Error::Asset(format!("{context}: {cause}"))
    }
}
