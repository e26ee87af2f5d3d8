//! Interchange normal form.
//!
//! Repeatedly lifts a layer above its predecessor when the two act on
//! disjoint wires and the lower one lies entirely to the left of the upper
//! one (or to the right, for the left normal form). A state directly right
//! of an effect can be exchanged in both directions; such ties are left as
//! they are, which keeps the pass terminating on disconnected diagrams.

use tracing::trace;
use yank_ir::Diagram;

use crate::pass::{Move, Rewrite};

/// Whether layer `i + 1` may be lifted above layer `i`.
fn movable(diagram: &Diagram, i: usize, left: bool) -> bool {
    let layers = diagram.layers();
    let (Some(upper), Some(lower)) = (layers.get(i), layers.get(i + 1)) else {
        return false;
    };
    if left {
        lower.offset >= upper.offset + upper.generator.cod().len()
    } else {
        upper.offset >= lower.offset + lower.generator.dom().len()
    }
}

/// Index of the first pair that should be exchanged, if any.
pub fn find_move(diagram: &Diagram, left: bool) -> Option<usize> {
    (0..diagram.len().saturating_sub(1)).find(|&i| {
        movable(diagram, i, left)
            && diagram
                .try_interchange(i, left)
                .is_some_and(|swapped| !movable(&swapped, i, left))
    })
}

/// Moves layers up until no further exchange applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterchangeNormalForm {
    /// Build the left normal form.
    pub left: bool,
}

impl InterchangeNormalForm {
    pub fn new(left: bool) -> Self {
        Self { left }
    }
}

impl Rewrite for InterchangeNormalForm {
    fn name(&self) -> &'static str {
        "interchange_normal_form"
    }

    fn next_step(&self, diagram: &Diagram) -> Option<Vec<Move>> {
        let i = find_move(diagram, self.left)?;
        trace!("Exchanging layers {} and {}", i, i + 1);
        Some(vec![Move::Interchange {
            from: i,
            to: i + 1,
            left: self.left,
        }])
    }
}
