//! Numeric semantics for Yank diagrams.
//!
//! This crate evaluates diagrams as linear maps between complex vector
//! spaces and as classical-quantum maps, and gives circuits their
//! measurement statistics.
//!
//! # Core Components
//!
//! - **Dimensions**: [`Dim`], a sequence of wire dimensions
//! - **Tensors**: [`Tensor`], the category of complex matrices
//! - **CQ maps**: [`CQ`] and [`CQMap`], completely positive maps with
//!   classical and quantum wires
//! - **Circuits**: the [`Circuit`] trait on diagrams over `bit` and `qubit`
//! - **Gates**: standard gates, basis states and measurements in [`gates`]
//! - **Ansätze**: [`iqp_ansatz`] and [`random_tiling`]
//!
//! # Example: A Bell State
//!
//! ```rust
//! use yank_ir::{Diagram, Ty};
//! use yank_quantum::Circuit;
//! use yank_quantum::gates::{CX, H, ket};
//!
//! let bell = ket(&[0, 0])
//!     .unwrap()
//!     .then(&H.tensor(&Diagram::id(Ty::qubit())))
//!     .unwrap()
//!     .then(&CX)
//!     .unwrap();
//!
//! let probabilities = bell.probabilities().unwrap();
//! assert!((probabilities[[0, 0]] - 0.5).abs() < 1e-9);
//! assert!(probabilities[[0, 1]].abs() < 1e-9);
//! assert!((probabilities[[1, 1]] - 0.5).abs() < 1e-9);
//! ```

pub mod ansatz;
pub mod circuit;
pub mod cq;
pub mod dim;
pub mod error;
pub mod gates;
pub mod tensor;

pub use ansatz::{TileGate, default_gateset, iqp_ansatz, random_tiling};
pub use circuit::{Circuit, Semantics};
pub use cq::{CQ, CQMap};
pub use dim::Dim;
pub use error::{QuantumError, QuantumResult};
pub use tensor::Tensor;
