use thiserror::Error;

/// Top-level error type for the Harimu session runtime.
#[derive(Debug, Error)]
pub enum HarimuError {
    #[error("unknown mood: {0}")]
    UnknownMood(String),

    #[error("no such choice: index {index}, script offers {available}")]
    NoSuchChoice { index: usize, available: usize },

    #[error("audio error: {0}")]
    Audio(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HarimuError>;
