//! Adversarial search and move selection.
//!
//! Explores the game tree under each candidate move to a fixed depth with
//! plain minimax or alpha-beta pruning, then picks the candidate whose
//! subtree scored best, breaking ties at random.
//!
//! White always maximizes and Black always minimizes, whichever side the
//! search was started for; leaves are always scored from the root player's
//! perspective.

pub mod alpha_beta;
pub mod config;
pub mod minimax;
pub mod selector;

#[cfg(test)]
pub(crate) mod tree;

pub use alpha_beta::alpha_beta;
pub use config::{CandidateScoring, ConfigError, SearchConfig, SearchMode};
pub use minimax::minimax;
pub use selector::{choose, explore, Choice, MoveSelector, Selection};

use crate::board::Player;

/// The side that maximizes at every node it acts on.
pub const MAXIMIZER: Player = Player::White;

/// Stand-in for negative infinity.
pub const SCORE_MIN: i32 = i32::MIN;

/// Stand-in for positive infinity.
pub const SCORE_MAX: i32 = i32::MAX;

/// Result of exploring one subtree.
///
/// Carries the backed-up value together with every leaf value visited
/// beneath it, in visiting order. Under alpha-beta, pruned leaves are
/// absent, so only the maximum of `leaves` is meaningful to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub value: i32,
    pub leaves: Vec<i32>,
    pub nodes: u64,
}

impl SearchOutcome {
    /// A leaf node scored `value`.
    pub fn leaf(value: i32) -> Self {
        SearchOutcome {
            value,
            leaves: vec![value],
            nodes: 1,
        }
    }

    /// An interior node before any child has been explored.
    fn interior(initial: i32) -> Self {
        SearchOutcome {
            value: initial,
            leaves: Vec::new(),
            nodes: 1,
        }
    }

    /// Merges a child's leaves and node count into this node.
    fn absorb(&mut self, child: SearchOutcome) {
        self.leaves.extend(child.leaves);
        self.nodes += child.nodes;
    }

    /// The best leaf value reached, or `None` if no leaf was recorded.
    pub fn best_leaf(&self) -> Option<i32> {
        self.leaves.iter().copied().max()
    }
}
