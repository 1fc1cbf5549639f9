//! Position evaluation.
//!
//! Scores a position from a fixed player's perspective by material balance.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, material, Material};
