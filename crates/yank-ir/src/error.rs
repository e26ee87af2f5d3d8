//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur when building or mapping diagrams.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Codomain of the first diagram differs from the domain of the second.
    #[error("Cannot compose: codomain {cod} does not match domain {dom}")]
    NotComposable {
        /// Codomain of the left operand.
        cod: String,
        /// Domain of the right operand.
        dom: String,
    },

    /// Two types were expected to be adjoint and are not.
    #[error("{left} and {right} are not adjoints")]
    NotAdjoint {
        /// Left type.
        left: String,
        /// Right type.
        right: String,
    },

    /// The types are adjoint, but in the other direction.
    #[error("{left} and {right} are adjoints in the wrong direction for a {shape}")]
    WrongAdjunction {
        /// Left type.
        left: String,
        /// Right type.
        right: String,
        /// `"cup"` or `"cap"`.
        shape: &'static str,
    },

    /// A layer does not type-check against the running scan.
    #[error("Layer {index} expects {expected} at offset {offset}, found {found}")]
    InvalidLayer {
        /// Position of the offending layer.
        index: usize,
        /// Offset of the generator within the scan.
        offset: usize,
        /// Domain of the generator.
        expected: String,
        /// Slice of the scan found at that offset.
        found: String,
    },

    /// A type or value does not have the expected shape.
    #[error("Expected {expected}, got {got}")]
    TypeMismatch {
        /// What was expected.
        expected: String,
        /// What was provided.
        got: String,
    },

    /// An operation that needs single-object types received a longer one.
    #[error("{operation} expects types of length 1, got {got}")]
    Arity {
        /// Operation name.
        operation: &'static str,
        /// Offending type.
        got: String,
    },

    /// A functor has no image for an object or generator.
    #[error("No image for {0}")]
    MissingImage(String),

    /// A permutation is not a bijection on the given wires.
    #[error("Invalid permutation {perm:?} for {len} wires")]
    InvalidPermutation {
        /// The permutation as given.
        perm: Vec<usize>,
        /// Number of wires in the domain.
        len: usize,
    },
}

impl IrError {
    /// Whether this error reports a violated axiom of the category
    /// (typing, adjunction or layer mismatch).
    #[must_use]
    pub fn is_axiom(&self) -> bool {
        matches!(
            self,
            Self::NotComposable { .. }
                | Self::NotAdjoint { .. }
                | Self::WrongAdjunction { .. }
                | Self::InvalidLayer { .. }
        )
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
