//! International draughts engine library.
//!
//! Exposes the board representation, move generation, evaluation, search,
//! protocol and arena modules for use by integration tests and the binaries.

pub mod arena;
pub mod board;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod position;
pub mod protocol;
pub mod search;
