//! Error types for filewire
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FtError
pub type Result<T> = std::result::Result<T, FtError>;

/// Unified error type for filewire operations
#[derive(Debug, Error)]
pub enum FtError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File IO error: {0}")]
    FileIo(String),

    // -------------------------------------------------------------------------
    // Buffer / Schema Errors
    // -------------------------------------------------------------------------
    #[error("Buffer capacity exceeded: {0}")]
    Capacity(String),

    #[error("Schema error: {0}")]
    Schema(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Protocol validation failed: {0}")]
    Validation(String),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection closed by peer: expected {expected} bytes, received {received}")]
    ConnectionClosed { expected: usize, received: usize },

    #[error("Timed out: {0}")]
    Timeout(String),
}
