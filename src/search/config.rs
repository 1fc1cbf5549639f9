//! Search configuration.

use std::fmt;
use std::str::FromStr;

/// Errors from parsing configuration values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown search mode: '{0}'")]
    UnknownMode(String),

    #[error("unknown candidate scoring: '{0}'")]
    UnknownScoring(String),

    #[error("unknown player kind: '{0}'")]
    UnknownPlayerKind(String),

    #[error("invalid depth: '{0}'")]
    InvalidDepth(String),
}

/// Which tree search explores each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    AlphaBeta,
    Minimax,
}

impl SearchMode {
    /// Depth used when none is configured explicitly.
    pub const fn default_depth(self) -> u32 {
        match self {
            SearchMode::AlphaBeta => 5,
            SearchMode::Minimax => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SearchMode::AlphaBeta => "alphabeta",
            SearchMode::Minimax => "minimax",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alphabeta" | "alpha_beta" | "abpruning" => Ok(SearchMode::AlphaBeta),
            "minimax" | "minmax_simple" => Ok(SearchMode::Minimax),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// How a candidate's subtree is reduced to the score compared across
/// candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateScoring {
    /// The best leaf value visited under the candidate.
    BestLeaf,
    /// The candidate subtree's backed-up value. Alpha-beta and minimax
    /// produce identical scores under this policy. A value still at its
    /// initial bound was backed by no leaf and counts as unscored.
    Backed,
}

impl FromStr for CandidateScoring {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bestleaf" | "best_leaf" => Ok(CandidateScoring::BestLeaf),
            "backed" => Ok(CandidateScoring::Backed),
            _ => Err(ConfigError::UnknownScoring(s.to_string())),
        }
    }
}

/// Settings for one move selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub mode: SearchMode,
    /// Plies explored below each candidate.
    pub depth: u32,
    /// Explore root candidates concurrently. Does not change the result.
    pub parallel: bool,
    pub scoring: CandidateScoring,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::alpha_beta()
    }
}

impl SearchConfig {
    /// Alpha-beta at its default depth.
    pub fn alpha_beta() -> Self {
        SearchConfig::for_mode(SearchMode::AlphaBeta)
    }

    /// Plain minimax at its default depth.
    pub fn minimax() -> Self {
        SearchConfig::for_mode(SearchMode::Minimax)
    }

    pub fn for_mode(mode: SearchMode) -> Self {
        SearchConfig {
            mode,
            depth: mode.default_depth(),
            parallel: false,
            scoring: CandidateScoring::BestLeaf,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_scoring(mut self, scoring: CandidateScoring) -> Self {
        self.scoring = scoring;
        self
    }
}
