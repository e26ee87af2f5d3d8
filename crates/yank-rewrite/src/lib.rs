//! Yank Diagram Rewriting
//!
//! This crate reduces diagrams to a canonical normal form. It removes snakes
//! (a cap whose wire runs into a cup on the same side), which is the content
//! of the snake equations of a rigid category, and then puts the remaining
//! layers in interchange normal form.
//!
//! # Architecture
//!
//! ```text
//! Diagram
//!    │
//!    ▼
//! ┌───────────┐
//! │ Normalize │ ◄── NormalizeConfig (left, max_steps, passes)
//! └───────────┘
//!    │
//!    ├── SnakeRemoval          follow wire, find snake, interchange, yank
//!    └── InterchangeNormalForm lift independent layers
//!    │
//!    ▼
//! lazy sequence of intermediate diagrams
//! ```
//!
//! # Example: Yanking a Snake
//!
//! ```rust
//! use yank_ir::{Diagram, Ty};
//! use yank_rewrite::NormalForm;
//!
//! let n = Ty::new("n");
//! let snake = Diagram::id(n.clone())
//!     .tensor(&Diagram::caps(&n.r(), &n).unwrap())
//!     .then(&Diagram::cups(&n, &n.r()).unwrap().tensor(&Diagram::id(n.clone())))
//!     .unwrap();
//!
//! assert_eq!(snake.normal_form(), Diagram::id(n));
//! ```

pub mod config;
pub mod error;
pub mod normalize;
pub mod pass;
pub mod passes;

pub use config::NormalizeConfig;
pub use error::{RewriteError, RewriteResult};
pub use normalize::{NormalForm, Normalize};
pub use pass::{Move, Rewrite};
pub use passes::{InterchangeNormalForm, SnakeRemoval, find_snake, follow_wire};
