use thiserror::Error;

/// Common error type for the emsnap tools.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Read failed: {0}")]
    Read(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using emsnap's Error.
pub type Result<T> = std::result::Result<T, Error>;
