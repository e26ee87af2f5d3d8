//! Built-in rewrites.
//!
//! - [`snake`]: removes cap and cup pairs joined by a wire
//! - [`interchange`]: moves layers into interchange normal form

pub mod interchange;
pub mod snake;

pub use interchange::InterchangeNormalForm;
pub use snake::{Snake, SnakeRemoval, WireTrace, eliminate, find_snake, follow_wire};
