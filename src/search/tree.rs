//! Synthetic game trees for exercising search without board rules.
//!
//! Every node carries a score that evaluates as White's material lead, and
//! the same children are offered to whichever player is asked for moves.

use std::sync::Arc;

use rand::Rng;

use crate::board::{PieceClass, Player, Square};
use crate::position::Position;

/// Nested description of a tree used to build a `TreePosition`.
pub(crate) struct TreeShape {
    pub score: i32,
    pub children: Vec<TreeShape>,
}

pub(crate) fn leaf(score: i32) -> TreeShape {
    TreeShape { score, children: Vec::new() }
}

pub(crate) fn branch(score: i32, children: Vec<TreeShape>) -> TreeShape {
    TreeShape { score, children }
}

struct Tree {
    scores: Vec<i32>,
    children: Vec<Vec<usize>>,
}

/// A cursor into a shared immutable tree. Moves are child node indices.
#[derive(Clone)]
pub(crate) struct TreePosition {
    tree: Arc<Tree>,
    node: usize,
}

impl TreePosition {
    /// Flattens a shape into a tree positioned at its root.
    pub fn build(shape: &TreeShape) -> TreePosition {
        let mut tree = Tree { scores: Vec::new(), children: Vec::new() };
        flatten(shape, &mut tree);
        TreePosition { tree: Arc::new(tree), node: 0 }
    }

    /// Builds a random tree where every interior node has between 1 and
    /// `max_branching` children and scores fall in `-9..=9`.
    pub fn random(rng: &mut impl Rng, depth: u32, max_branching: usize) -> TreePosition {
        TreePosition::build(&random_shape(rng, depth, max_branching))
    }
}

fn flatten(shape: &TreeShape, tree: &mut Tree) -> usize {
    let id = tree.scores.len();
    tree.scores.push(shape.score);
    tree.children.push(Vec::new());
    for child in &shape.children {
        let child_id = flatten(child, tree);
        tree.children[id].push(child_id);
    }
    id
}

fn random_shape(rng: &mut impl Rng, depth: u32, max_branching: usize) -> TreeShape {
    let score = rng.gen_range(-9..=9);
    if depth == 0 {
        return leaf(score);
    }
    let count = rng.gen_range(1..=max_branching);
    let children = (0..count)
        .map(|_| random_shape(rng, depth - 1, max_branching))
        .collect();
    branch(score, children)
}

impl Position for TreePosition {
    type Move = usize;

    fn legal_moves(&self, _player: Player) -> Vec<usize> {
        self.tree.children[self.node].clone()
    }

    fn apply(&self, mv: &usize) -> TreePosition {
        TreePosition { tree: Arc::clone(&self.tree), node: *mv }
    }

    fn player_squares(&self, player: Player) -> Vec<Square> {
        let score = self.tree.scores[self.node];
        let owned = match player {
            Player::White => score.max(0),
            Player::Black => (-score).max(0),
        };
        (1..=owned as Square).collect()
    }

    fn piece_class(&self, _square: Square) -> Option<PieceClass> {
        Some(PieceClass::Man)
    }
}
