//! Error types for the quantum crate.

use thiserror::Error;

/// Errors that can occur when building or evaluating numeric maps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuantumError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] yank_ir::IrError),

    /// An array does not have the shape its domain and codomain require.
    #[error("Array of {got} entries does not fit shape {expected:?}")]
    ShapeMismatch {
        /// Required shape.
        expected: Vec<usize>,
        /// Number of entries provided.
        got: usize,
    },

    /// Two maps were combined across different dimensions.
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// First operand.
        left: String,
        /// Second operand.
        right: String,
    },

    /// Parameters passed to a circuit builder are malformed.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A generator has no linear-map semantics and needs mixed evaluation.
    #[error("{0} can only be evaluated as a classical-quantum map")]
    NotMixedEvaluable(String),
}

/// Result type for quantum operations.
pub type QuantumResult<T> = Result<T, QuantumError>;
