//! Error types for the matrix streaming application

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Packet encoding/decoding errors
///
/// On the receive path these are counted and dropped, never propagated:
/// a malformed datagram must not disturb the assembly loop.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Packet truncated: {0} bytes")]
    Truncated(usize),

    #[error("Short row payload for row {row}: {got} bytes")]
    ShortRow { row: u16, got: usize },
}

/// Network errors
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Socket bind failed: {0}")]
    BindFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Invalid target address: {0}")]
    InvalidAddress(String),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;
