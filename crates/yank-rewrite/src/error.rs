//! Error types for the rewrite crate.

use thiserror::Error;

/// Errors that can occur while configuring or running a normalization.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RewriteError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] yank_ir::IrError),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration values are out of range.
    #[error("Invalid normalization config: {0}")]
    Config(String),
}

/// Result type for rewrite operations.
pub type RewriteResult<T> = Result<T, RewriteError>;
