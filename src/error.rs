use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("failed to read form body")]
    Io(#[from] std::io::Error),
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
