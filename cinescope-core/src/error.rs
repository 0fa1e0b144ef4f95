//! Error types for cinescope-core

use thiserror::Error;

/// Main error type for the cinescope-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Document store driver error
    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),

    /// BSON row decode error
    #[error("row decode error: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for cinescope-core
pub type Result<T> = std::result::Result<T, Error>;
