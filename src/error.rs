use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutodevError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid task type: {0}. Must be one of: CODING_TASK, QUICK_QUESTION")]
    InvalidTaskType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AutodevError>;
