//! Move selection policy.
//!
//! Runs the configured search once per candidate move, reduces each subtree
//! to a score, and picks uniformly at random among the best-scoring
//! candidates. If any candidate could not be scored, the whole decision
//! falls back to a uniformly random legal move.

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::{alpha_beta, minimax, CandidateScoring, SearchConfig, SearchMode, SearchOutcome};
use super::{SCORE_MAX, SCORE_MIN};
use crate::board::Player;
use crate::position::Position;

/// How the winning candidate was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Picked among the `tied` candidates sharing the maximal `score`.
    Best { index: usize, score: i32, tied: usize },
    /// At least one candidate produced no score, so the pick is random.
    Fallback { index: usize },
}

impl Choice {
    pub fn index(&self) -> usize {
        match *self {
            Choice::Best { index, .. } | Choice::Fallback { index } => index,
        }
    }
}

/// The outcome of one move selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<M> {
    pub chosen: M,
    pub choice: Choice,
    /// Number of legal candidates considered.
    pub candidates: usize,
    /// Nodes visited across all candidate searches.
    pub nodes: u64,
}

impl<M> Selection<M> {
    pub fn is_fallback(&self) -> bool {
        matches!(self.choice, Choice::Fallback { .. })
    }

    /// The winning score, if the pick was not a fallback.
    pub fn score(&self) -> Option<i32> {
        match self.choice {
            Choice::Best { score, .. } => Some(score),
            Choice::Fallback { .. } => None,
        }
    }
}

/// Searches the subtree under one root candidate for `player`: the
/// opponent acts first on the position after `mv`, and leaves are scored
/// for `player`.
pub fn explore<P: Position>(
    config: &SearchConfig,
    mv: &P::Move,
    board: &P,
    player: Player,
) -> SearchOutcome {
    let opponent = player.opponent();
    match config.mode {
        SearchMode::AlphaBeta => alpha_beta(
            mv,
            board,
            config.depth,
            SCORE_MIN,
            SCORE_MAX,
            opponent,
            player,
        ),
        SearchMode::Minimax => minimax(mv, board, config.depth, opponent, player),
    }
}

fn score_outcome(scoring: CandidateScoring, outcome: &SearchOutcome) -> Option<i32> {
    match scoring {
        CandidateScoring::BestLeaf => outcome.best_leaf(),
        CandidateScoring::Backed => {
            Some(outcome.value).filter(|v| *v != SCORE_MIN && *v != SCORE_MAX)
        }
    }
}

/// Picks a candidate index from per-candidate scores.
///
/// Returns `None` only when there are no candidates. If any score is
/// missing (or fewer scores than candidates were supplied) the pick is a
/// uniform random candidate; otherwise it is uniform among the candidates
/// attaining the maximal score.
pub fn choose<R: Rng + ?Sized>(
    candidates: usize,
    scores: &[Option<i32>],
    rng: &mut R,
) -> Option<Choice> {
    if candidates == 0 {
        return None;
    }
    if scores.len() < candidates || scores.iter().any(Option::is_none) {
        return Some(Choice::Fallback {
            index: rng.gen_range(0..candidates),
        });
    }

    let best = scores.iter().flatten().copied().max()?;
    let tied: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == Some(best))
        .map(|(i, _)| i)
        .collect();
    let index = *tied.choose(rng)?;

    Some(Choice::Best {
        index,
        score: best,
        tied: tied.len(),
    })
}

/// Chooses moves with a configured search and an owned random source.
///
/// The random source only breaks ties and drives the fallback; seeding it
/// makes selection fully deterministic.
pub struct MoveSelector<R = SmallRng> {
    config: SearchConfig,
    rng: R,
}

impl MoveSelector<SmallRng> {
    /// Creates a selector seeded from system entropy.
    pub fn new(config: SearchConfig) -> Self {
        MoveSelector::with_rng(config, SmallRng::from_entropy())
    }

    /// Creates a selector with a fixed seed.
    pub fn seeded(config: SearchConfig, seed: u64) -> Self {
        MoveSelector::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MoveSelector<R> {
    pub fn with_rng(config: SearchConfig, rng: R) -> Self {
        MoveSelector { config, rng }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Selects a move for `player`, or `None` if `player` has no legal move.
    pub fn select<P>(&mut self, board: &P, player: Player) -> Option<Selection<P::Move>>
    where
        P: Position + Sync,
        P::Move: Send + Sync,
    {
        let candidates = board.legal_moves(player);
        if candidates.is_empty() {
            debug!("{} has no legal moves", player.name());
            return None;
        }

        let config = self.config;
        let outcomes: Vec<SearchOutcome> = if config.parallel {
            candidates
                .par_iter()
                .map(|mv| explore(&config, mv, board, player))
                .collect()
        } else {
            candidates
                .iter()
                .map(|mv| explore(&config, mv, board, player))
                .collect()
        };

        let scores: Vec<Option<i32>> = outcomes
            .iter()
            .map(|o| score_outcome(config.scoring, o))
            .collect();
        for ((mv, outcome), score) in candidates.iter().zip(&outcomes).zip(&scores) {
            debug!(
                "{} {:?}: score {:?}, value {}, {} leaves, {} nodes",
                config.mode,
                mv,
                score,
                outcome.value,
                outcome.leaves.len(),
                outcome.nodes
            );
        }

        let choice = choose(candidates.len(), &scores, &mut self.rng)?;
        if let Choice::Fallback { .. } = choice {
            warn!(
                "search recorded no leaf values for a candidate; picking a random move among {}",
                candidates.len()
            );
        }

        let count = candidates.len();
        let nodes = outcomes.iter().map(|o| o.nodes).sum();
        let chosen = candidates.into_iter().nth(choice.index())?;
        Some(Selection {
            chosen,
            choice,
            candidates: count,
            nodes,
        })
    }

    /// Selects a move for `player`, or `None` if `player` has no legal move.
    pub fn pick_move<P>(&mut self, board: &P, player: Player) -> Option<P::Move>
    where
        P: Position + Sync,
        P::Move: Send + Sync,
    {
        self.select(board, player).map(|s| s.chosen)
    }
}
