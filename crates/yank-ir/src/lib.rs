//! Yank Diagram Intermediate Representation
//!
//! This crate provides the typed diagrams that the rest of Yank rewrites and
//! evaluates: planar string diagrams in a rigid monoidal category.
//!
//! # Overview
//!
//! Types are sequences of atomic objects, each with an adjoint level. Diagrams
//! are stacks of layers, each layer one generator placed at an offset into the
//! wires. Cups and caps witness the adjunctions between an object and its left
//! and right duals, and a [`Functor`] sends a diagram to any target that
//! implements [`Category`].
//!
//! # Core Components
//!
//! - **Types**: [`Ob`], [`Ty`] with left and right adjoints
//! - **Generators**: [`BoxGen`] and the closed [`Generator`] variant
//! - **Diagrams**: [`Diagram`] with composition, tensor, dagger, interchange
//! - **Categories**: the [`Category`] trait implemented by diagrams and by
//!   numeric backends
//! - **Functors**: [`Functor`] evaluation by tables or rules
//!
//! # Example: A Pregroup Sentence
//!
//! ```rust
//! use yank_ir::{Diagram, Ty};
//!
//! let (n, s) = (Ty::new("n"), Ty::new("s"));
//! let alice = Diagram::box_("Alice", Ty::unit(), n.clone());
//! let loves = Diagram::box_("loves", Ty::unit(), n.under(&s).over(&n));
//! let bob = Diagram::box_("Bob", Ty::unit(), n.clone());
//!
//! let words = alice.tensor(&loves).tensor(&bob);
//! let grammar = Diagram::cups(&n, &n.r())
//!     .unwrap()
//!     .tensor(&Diagram::id(s.clone()))
//!     .tensor(&Diagram::cups(&n.l(), &n).unwrap());
//! let sentence = words.then(&grammar).unwrap();
//!
//! assert_eq!(sentence.dom(), &Ty::unit());
//! assert_eq!(sentence.cod(), &s);
//! ```
//!
//! # Generators
//!
//! | Generator | Domain | Codomain |
//! |-----------|--------|----------|
//! | `Box` | declared | declared |
//! | `Cup(a, a.r)` | `a @ a.r` | `Ty()` |
//! | `Cap(a.r, a)` | `Ty()` | `a.r @ a` |
//! | `Swap(a, b)` | `a @ b` | `b @ a` |
//! | `Measure(n)` | `qubit ** n` | `bit ** n` |
//! | `Encode(n)` | `bit ** n` | `qubit ** n` |
//! | `Discard(t)` | `t` | `Ty()` |
//! | `MixedState(t)` | `Ty()` | `t` |

pub mod category;
pub mod diagram;
pub mod error;
pub mod functor;
pub mod generator;
pub mod ty;

pub use category::{Category, Factors, Object, nested_cups};
pub use diagram::{Diagram, Layer};
pub use error::{IrError, IrResult};
pub use functor::{ArrowRule, Functor};
pub use generator::{Adjoint, BoxGen, Generator};
pub use ty::{BIT, Ob, QUBIT, Ty};
