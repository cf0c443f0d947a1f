// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuestbookError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP Error: {0}")]
    Http(#[from] http::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed submission: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, GuestbookError>;
