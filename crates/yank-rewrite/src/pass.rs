//! Rewrite trait and the moves rewrites are made of.

use yank_ir::{Diagram, IrResult};

/// One elementary step of a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Bubble layer `from` to position `to` through adjacent interchanges.
    Interchange { from: usize, to: usize, left: bool },
    /// Remove the adjacent cap and cup at `cap` and `cup`.
    Yank { cap: usize, cup: usize },
}

impl Move {
    /// Apply this move to a diagram.
    pub fn apply(&self, diagram: &Diagram) -> IrResult<Diagram> {
        match *self {
            Self::Interchange { from, to, left } => Ok(diagram.interchange(from, to, left)),
            Self::Yank { cap, cup } => diagram.without_layers(cap..=cup),
        }
    }
}

/// A rewrite strategy run by the normalizer.
///
/// A rewrite inspects the current diagram and plans the moves of its next
/// step. The normalizer applies them one at a time and asks again once they
/// are exhausted, until the rewrite reports a fixpoint.
pub trait Rewrite: Send + Sync {
    /// Get the name of this rewrite.
    fn name(&self) -> &str;

    /// Moves of the next step, or `None` if nothing applies.
    fn next_step(&self, diagram: &Diagram) -> Option<Vec<Move>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use yank_ir::Ty;

    struct Idle;

    impl Rewrite for Idle {
        fn name(&self) -> &'static str {
            "idle"
        }

        fn next_step(&self, _diagram: &Diagram) -> Option<Vec<Move>> {
            None
        }
    }

    #[test]
    fn test_rewrite_name() {
        let pass = Idle;
        assert_eq!(pass.name(), "idle");
        assert!(pass.next_step(&Diagram::id(Ty::unit())).is_none());
    }

    #[test]
    fn test_interchange_move() {
        let d = Diagram::box_("f", Ty::new("a"), Ty::new("b"))
            .tensor(&Diagram::box_("g", Ty::new("c"), Ty::new("d")));
        let moved = Move::Interchange {
            from: 1,
            to: 0,
            left: false,
        }
        .apply(&d)
        .unwrap();
        assert_eq!(moved.offsets(), vec![1, 0]);
    }
}
