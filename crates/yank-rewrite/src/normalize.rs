//! The normalizer: runs rewrites in order and yields every intermediate diagram.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};
use yank_ir::Diagram;

use crate::config::NormalizeConfig;
use crate::pass::{Move, Rewrite};
use crate::passes::{InterchangeNormalForm, SnakeRemoval};

/// A lazy sequence of rewrite steps.
///
/// Each item is the diagram after one move. Rewrites run in order, each to
/// its own fixpoint. The sequence is finite: it ends when every rewrite is
/// exhausted, or after `max_steps` items. Cloning a `Normalize` gives an
/// independent copy that resumes from the same point.
#[derive(Clone)]
pub struct Normalize {
    diagram: Diagram,
    passes: Vec<Arc<dyn Rewrite>>,
    stage: usize,
    pending: VecDeque<Move>,
    steps: usize,
    max_steps: usize,
}

impl Normalize {
    /// Normalize `diagram` with the rewrites enabled in `config`.
    pub fn new(diagram: Diagram, config: &NormalizeConfig) -> Self {
        let mut passes: Vec<Arc<dyn Rewrite>> = Vec::new();
        if config.snake_removal {
            passes.push(Arc::new(SnakeRemoval));
        }
        if config.interchange {
            passes.push(Arc::new(InterchangeNormalForm::new(config.left)));
        }
        Self::with_passes(diagram, passes, config.max_steps)
    }

    /// Normalize `diagram` with a custom list of rewrites.
    pub fn with_passes(diagram: Diagram, passes: Vec<Arc<dyn Rewrite>>, max_steps: usize) -> Self {
        Self {
            diagram,
            passes,
            stage: 0,
            pending: VecDeque::new(),
            steps: 0,
            max_steps,
        }
    }

    /// The most recent diagram.
    pub fn current(&self) -> &Diagram {
        &self.diagram
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn finish(&mut self) {
        self.stage = self.passes.len();
        self.pending.clear();
    }
}

impl Iterator for Normalize {
    type Item = Diagram;

    fn next(&mut self) -> Option<Diagram> {
        loop {
            if let Some(mv) = self.pending.pop_front() {
                if self.steps >= self.max_steps {
                    warn!(
                        "Normalization stopped after {} steps without reaching a normal form",
                        self.steps
                    );
                    self.finish();
                    return None;
                }
                return match mv.apply(&self.diagram) {
                    Ok(next) => {
                        self.steps += 1;
                        self.diagram = next.clone();
                        Some(next)
                    }
                    Err(e) => {
                        error!("Rewrite step {mv:?} failed: {e}");
                        self.finish();
                        None
                    }
                };
            }

            let pass = self.passes.get(self.stage)?;
            match pass.next_step(&self.diagram) {
                Some(moves) if !moves.is_empty() => self.pending = moves.into(),
                _ => {
                    debug!("Rewrite {} reached a fixpoint after {} steps", pass.name(), self.steps);
                    self.stage += 1;
                }
            }
        }
    }
}

impl fmt::Debug for Normalize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.passes.iter().map(|p| p.name()).collect();
        f.debug_struct("Normalize")
            .field("diagram", &self.diagram.to_string())
            .field("passes", &names)
            .field("stage", &self.stage)
            .field("steps", &self.steps)
            .finish()
    }
}

/// Normalization entry points on diagrams.
pub trait NormalForm {
    /// Rewrite steps with the default configuration.
    fn normalize(&self) -> Normalize;

    /// Rewrite steps with a given configuration.
    fn normalize_with(&self, config: &NormalizeConfig) -> Normalize;

    /// The last diagram of [`normalize`](Self::normalize), or the diagram
    /// itself if no rewrite applies.
    fn normal_form(&self) -> Diagram;

    /// The last diagram of [`normalize_with`](Self::normalize_with).
    fn normal_form_with(&self, config: &NormalizeConfig) -> Diagram;
}

impl NormalForm for Diagram {
    fn normalize(&self) -> Normalize {
        self.normalize_with(&NormalizeConfig::default())
    }

    fn normalize_with(&self, config: &NormalizeConfig) -> Normalize {
        Normalize::new(self.clone(), config)
    }

    fn normal_form(&self) -> Diagram {
        self.normal_form_with(&NormalizeConfig::default())
    }

    fn normal_form_with(&self, config: &NormalizeConfig) -> Diagram {
        self.normalize_with(config).last().unwrap_or_else(|| self.clone())
    }
}
