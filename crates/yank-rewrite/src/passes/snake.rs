//! Snake removal.
//!
//! A snake is a cap whose output wire, followed down through the diagram,
//! ends in a cup that closes it back on the same side. A *left* snake
//! starts at the cap's left leg and enters the cup through its right leg;
//! a *right* snake is the mirror image. Every layer crossed on the way lies
//! entirely to the left or to the right of the followed wire. These
//! obstructions are moved out of the way by interchanges, after which the
//! cap and the cup sit in adjacent layers and can be yanked straight.

use tracing::{debug, trace};
use yank_ir::{Diagram, Generator};

use crate::pass::{Move, Rewrite};

/// Where a followed wire ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireTrace {
    /// Index of the layer consuming the wire, or the number of layers if the
    /// wire reaches the codomain.
    pub layer: usize,
    /// Position of the wire just above that layer.
    pub wire: usize,
    /// Layers crossed with the wire on their right.
    pub left_obstructions: Vec<usize>,
    /// Layers crossed with the wire on their left.
    pub right_obstructions: Vec<usize>,
}

/// Follow the wire at position `wire` below layer `start` down the diagram.
pub fn follow_wire(diagram: &Diagram, start: usize, wire: usize) -> WireTrace {
    let mut trace = WireTrace {
        layer: diagram.len(),
        wire,
        left_obstructions: Vec::new(),
        right_obstructions: Vec::new(),
    };
    for (i, layer) in diagram.layers().iter().enumerate().skip(start + 1) {
        let (dom, cod) = (layer.generator.dom().len(), layer.generator.cod().len());
        let off = layer.offset;
        if off <= trace.wire && trace.wire < off + dom {
            trace.layer = i;
            return trace;
        }
        if off <= trace.wire {
            trace.wire = trace.wire + cod - dom;
            trace.left_obstructions.push(i);
        } else {
            trace.right_obstructions.push(i);
        }
    }
    trace
}

/// A yankable cap and cup pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub cap: usize,
    pub cup: usize,
    pub left_obstructions: Vec<usize>,
    pub right_obstructions: Vec<usize>,
    /// Whether the snake starts from the cap's left leg.
    pub left_snake: bool,
}

/// Find the first yankable pair, scanning caps from the top.
pub fn find_snake(diagram: &Diagram) -> Option<Snake> {
    let layers = diagram.layers();
    for (cap, layer) in layers.iter().enumerate() {
        if !layer.generator.is_cap() {
            continue;
        }
        for left_snake in [true, false] {
            let wire = if left_snake {
                layer.offset
            } else {
                layer.offset + 1
            };
            let trace = follow_wire(diagram, cap, wire);
            let Some(end) = layers.get(trace.layer) else {
                continue;
            };
            let closes = match end.generator {
                Generator::Cup { .. } if left_snake => end.offset + 1 == trace.wire,
                Generator::Cup { .. } => end.offset == trace.wire,
                _ => false,
            };
            if closes {
                trace!(cap, cup = trace.layer, left_snake, "Found snake");
                return Some(Snake {
                    cap,
                    cup: trace.layer,
                    left_obstructions: trace.left_obstructions,
                    right_obstructions: trace.right_obstructions,
                    left_snake,
                });
            }
        }
    }
    None
}

/// Plan the interchanges that bring a snake's cap and cup together, followed
/// by the yank that removes them.
///
/// For a left snake the left obstructions are lifted above the cap, nearest
/// first, then the right obstructions are lowered below the cup, farthest
/// first. A right snake mirrors this.
pub fn eliminate(snake: &Snake) -> Vec<Move> {
    let Snake {
        mut cap,
        mut cup,
        ref left_obstructions,
        ref right_obstructions,
        left_snake,
    } = *snake;
    let mut right = right_obstructions.clone();
    let mut moves = Vec::with_capacity(left_obstructions.len() + right.len() + 1);

    let interchange = |from, to| Move::Interchange {
        from,
        to,
        left: false,
    };

    if left_snake {
        for &layer in left_obstructions {
            moves.push(interchange(layer, cap));
            for r in right.iter_mut().filter(|r| **r < layer) {
                *r += 1;
            }
            cap += 1;
        }
        for &layer in right.iter().rev() {
            moves.push(interchange(layer, cup));
            cup -= 1;
        }
    } else {
        for &layer in left_obstructions.iter().rev() {
            moves.push(interchange(layer, cup));
            for r in right.iter_mut().filter(|r| **r > layer) {
                *r -= 1;
            }
            cup -= 1;
        }
        for &layer in &right {
            moves.push(interchange(layer, cap));
            cap += 1;
        }
    }
    moves.push(Move::Yank { cap, cup });
    moves
}

/// Removes snakes one at a time until none is left.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeRemoval;

impl Rewrite for SnakeRemoval {
    fn name(&self) -> &'static str {
        "snake_removal"
    }

    fn next_step(&self, diagram: &Diagram) -> Option<Vec<Move>> {
        let snake = find_snake(diagram)?;
        debug!(
            "Removing {} snake between layers {} and {}",
            if snake.left_snake { "left" } else { "right" },
            snake.cap,
            snake.cup
        );
        Some(eliminate(&snake))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yank_ir::Ty;

    /// `Id(n) @ Cap(n.r, n) >> Cup(n, n.r) @ Id(n)`
    fn left_zigzag() -> Diagram {
        let n = Ty::new("n");
        Diagram::id(n.clone())
            .tensor(&Diagram::caps(&n.r(), &n).unwrap())
            .then(&Diagram::cups(&n, &n.r()).unwrap().tensor(&Diagram::id(n)))
            .unwrap()
    }

    #[test]
    fn test_follow_wire_to_cup() {
        let d = left_zigzag();
        let trace = follow_wire(&d, 0, 1);
        assert_eq!(trace.layer, 1);
        assert_eq!(trace.wire, 1);
        assert!(trace.left_obstructions.is_empty());
    }

    #[test]
    fn test_follow_wire_to_codomain() {
        let d = left_zigzag();
        let trace = follow_wire(&d, 0, 2);
        assert_eq!(trace.layer, d.len());
        assert_eq!(trace.left_obstructions, vec![1]);
        assert!(trace.right_obstructions.is_empty());
        assert_eq!(trace.wire, 0);
    }

    #[test]
    fn test_find_left_snake() {
        let snake = find_snake(&left_zigzag()).unwrap();
        assert!(snake.left_snake);
        assert_eq!((snake.cap, snake.cup), (0, 1));
        assert_eq!(eliminate(&snake), vec![Move::Yank { cap: 0, cup: 1 }]);
    }

    #[test]
    fn test_obstruction_is_lifted() {
        let n = Ty::new("n");
        let f = Diagram::box_("f", n.clone(), n.clone());
        let d = Diagram::id(n.clone())
            .tensor(&Diagram::caps(&n.r(), &n).unwrap())
            .then(&f.tensor(&Diagram::id(n.r().tensor(&n))))
            .unwrap()
            .then(&Diagram::cups(&n, &n.r()).unwrap().tensor(&Diagram::id(n)))
            .unwrap();
        let snake = find_snake(&d).unwrap();
        assert_eq!(snake.left_obstructions, vec![1]);
        assert_eq!(
            eliminate(&snake),
            vec![
                Move::Interchange {
                    from: 1,
                    to: 0,
                    left: false
                },
                Move::Yank { cap: 1, cup: 2 },
            ]
        );
    }

    #[test]
    fn test_no_snake_without_closing_cup() {
        let n = Ty::new("n");
        assert!(find_snake(&Diagram::cups(&n, &n.r()).unwrap()).is_none());
        let open = Diagram::caps(&n.r(), &n)
            .unwrap()
            .then(&Diagram::box_("f", n.r(), n.r()).tensor(&Diagram::id(n)))
            .unwrap();
        assert!(find_snake(&open).is_none());
    }
}
