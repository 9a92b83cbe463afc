#[derive(Debug, thiserror::Error)]
pub enum BookmarksError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Index not ready: {0}")]
    NotReady(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, BookmarksError>;

impl From<serde_json::Error> for BookmarksError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
