//! Errors for the fallible edges of the crate: snapshot decoding and note
//! storage. The editing algorithms themselves never fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("note store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("note not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
