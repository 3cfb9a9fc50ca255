use crate::logic::board::{Board, BoardParseError, Piece};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

pub mod ai;
pub mod alpha_beta;
pub mod config;
pub mod eval;
pub mod minimax;
pub mod ordering;


/// Outcome of one top-level search call. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIMoveResult {
    /// Chosen cell, 0..=63.
    pub best_move: usize,
    /// Score of the chosen line from the mover's perspective.
    pub evaluation: i32,
    /// Deepest fully completed ply count (0 for short-circuits).
    pub search_depth: u8,
    pub nodes_searched: u64,
    pub time_elapsed_ms: u64,
    pub strategy: String,
}

/// Per-call pruning counters, reset at the start of each top-level call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PruningStats {
    pub nodes_searched: u64,
    pub prune_count: u64,
    pub pruning_efficiency: f64,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid board state: {0}")]
    InvalidBoardState(#[from] BoardParseError),
    #[error("No valid moves available")]
    NoValidMoves,
    #[error("unknown strategy {0:?}")]
    Configuration(String),
}

/// Wall-clock budget and counters threaded through one top-level search.
/// Timeouts are not errors: the recursion returns `None` and the
/// deepening loop falls back to the last fully completed depth.
pub(crate) struct SearchContext {
    deadline: Instant,
    pub nodes: u64,
    pub prunes: u64,
}

impl SearchContext {
    pub fn new(budget: Duration) -> Self {
        Self {
            deadline: Instant::now() + budget,
            nodes: 0,
            prunes: 0,
        }
    }

    pub fn out_of_time(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn pruning_stats(&self) -> PruningStats {
        PruningStats {
            nodes_searched: self.nodes,
            prune_count: self.prunes,
            pruning_efficiency: if self.nodes == 0 {
                0.0
            } else {
                self.prunes as f64 / self.nodes as f64
            },
        }
    }
}

/// The pluggable search seam. Strategies are registered by name on the
/// [`ai::AIEngine`] facade and share the same state machine: fail fast
/// with [`EngineError::NoValidMoves`], short-circuit a forced move, and
/// otherwise iteratively deepen within the time budget.
pub trait SearchStrategy {
    fn best_move(
        &mut self,
        board: &Board,
        player: Piece,
        max_depth: u8,
        max_time_ms: u64,
    ) -> Result<AIMoveResult, EngineError>;

    /// Depth-0 heuristic score of the position for `player`.
    fn evaluate_position(&self, board: &Board, player: Piece) -> i32;

    fn name(&self) -> &'static str;

    /// Counters from the last `best_move` call, for strategies that
    /// prune. The default is `None`.
    fn pruning_stats(&self) -> Option<PruningStats> {
        None
    }
}
