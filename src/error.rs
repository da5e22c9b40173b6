use std::io;
use thiserror::Error;

/// Custom error types for vidslice
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Required external tool '{0}' not found in PATH")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("'{tool}' exited with status {status}: {stderr}")]
    CommandFailed {
        tool: String,
        status: i32,
        stderr: String,
    },

    #[error("'{tool}' timed out after {seconds} seconds")]
    CommandTimeout { tool: String, seconds: u64 },

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for vidslice operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
