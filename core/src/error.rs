use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostleError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No puzzle scheduled for {date}")]
    PuzzleNotFound { date: String },

    #[error("Invalid date key '{key}', expected YYYY-MM-DD")]
    InvalidDate { key: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PostleResult<T> = Result<T, PostleError>;
