//! Facade the serving layer talks to: resolves a registered strategy by
//! name, maps difficulty to search depth, and optionally injects
//! randomness into the final move.

use crate::engine::alpha_beta::AlphaBetaEngine;
use crate::engine::config::EngineConfig;
use crate::engine::minimax::MinimaxEngine;
use crate::engine::{AIMoveResult, EngineError, PruningStats, SearchStrategy};
use crate::logic::board::{Board, Piece};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

/// Difficulty 1..=6 maps monotonically onto these search depths.
const DIFFICULTY_DEPTHS: [u8; 6] = [2, 3, 4, 5, 6, 7];

#[derive(Debug, Clone)]
pub struct MoveRequest {
    pub strategy: String,
    /// 1 (shallow) through 6 (deep); out-of-range values clamp.
    pub difficulty: u8,
    pub max_time_ms: u64,
    /// Probability of replacing the searched move with a uniformly
    /// sampled legal one. 0.0 keeps results fully deterministic.
    pub randomness: f64,
}

impl Default for MoveRequest {
    fn default() -> Self {
        Self {
            strategy: "alphabeta".to_string(),
            difficulty: 4,
            max_time_ms: 5000,
            randomness: 0.0,
        }
    }
}

pub struct AIEngine {
    strategies: HashMap<String, Box<dyn SearchStrategy>>,
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new(Arc::new(EngineConfig::default()))
    }
}

impl AIEngine {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        let mut strategies: HashMap<String, Box<dyn SearchStrategy>> = HashMap::new();
        strategies.insert(
            "minimax".to_string(),
            Box::new(MinimaxEngine::new(config.clone())),
        );
        strategies.insert(
            "alphabeta".to_string(),
            Box::new(AlphaBetaEngine::new(config)),
        );
        Self { strategies }
    }

    /// Register an additional strategy under `name`, replacing any
    /// previous registration.
    pub fn register(&mut self, name: impl Into<String>, strategy: Box<dyn SearchStrategy>) {
        self.strategies.insert(name.into(), strategy);
    }

    #[must_use]
    pub fn difficulty_to_depth(difficulty: u8) -> u8 {
        let clamped = difficulty.clamp(1, DIFFICULTY_DEPTHS.len() as u8);
        DIFFICULTY_DEPTHS[clamped as usize - 1]
    }

    pub fn get_best_move(
        &mut self,
        board_state: &str,
        player: Piece,
        request: &MoveRequest,
    ) -> Result<AIMoveResult, EngineError> {
        let mut board = Board::from_grid(board_state)?;
        board.clear_markers();
        let depth = Self::difficulty_to_depth(request.difficulty);

        let strategy = self
            .strategies
            .get_mut(&request.strategy)
            .ok_or_else(|| EngineError::Configuration(request.strategy.clone()))?;
        log::debug!(
            "dispatching {} at depth {depth} within {}ms",
            request.strategy,
            request.max_time_ms
        );
        let mut result = strategy.best_move(&board, player, depth, request.max_time_ms)?;

        if request.randomness > 0.0 {
            let mut rng = rand::thread_rng();
            if rng.gen::<f64>() < request.randomness {
                let moves = board.legal_moves(player);
                let pick = moves[rng.gen_range(0..moves.len())];
                if pick != result.best_move {
                    let mut child = board;
                    child.place(pick, player);
                    log::debug!(
                        "randomness override: {} -> {pick}",
                        result.best_move
                    );
                    result.best_move = pick;
                    result.evaluation = strategy.evaluate_position(&child, player);
                }
            }
        }
        Ok(result)
    }

    /// Static evaluation of a serialized position through the named
    /// strategy's evaluator. Pure, depth 0.
    pub fn evaluate_position(
        &self,
        board_state: &str,
        player: Piece,
        strategy_name: &str,
    ) -> Result<i32, EngineError> {
        let mut board = Board::from_grid(board_state)?;
        board.clear_markers();
        let strategy = self
            .strategies
            .get(strategy_name)
            .ok_or_else(|| EngineError::Configuration(strategy_name.to_string()))?;
        Ok(strategy.evaluate_position(&board, player))
    }

    /// Node and prune counters from the named strategy's last call.
    /// `None` for strategies that do not prune.
    pub fn pruning_stats(&self, strategy_name: &str) -> Result<Option<PruningStats>, EngineError> {
        self.strategies
            .get(strategy_name)
            .map(|s| s.pruning_stats())
            .ok_or_else(|| EngineError::Configuration(strategy_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_table_is_monotonic() {
        assert_eq!(AIEngine::difficulty_to_depth(1), 2);
        assert_eq!(AIEngine::difficulty_to_depth(6), 7);
        for d in 1..6 {
            assert!(AIEngine::difficulty_to_depth(d) < AIEngine::difficulty_to_depth(d + 1));
        }
        // Out-of-range values clamp to the table ends.
        assert_eq!(AIEngine::difficulty_to_depth(0), 2);
        assert_eq!(AIEngine::difficulty_to_depth(9), 7);
    }

    #[test]
    fn unknown_strategy_is_a_configuration_error() {
        let mut engine = AIEngine::default();
        let request = MoveRequest {
            strategy: "montecarlo".to_string(),
            ..MoveRequest::default()
        };
        let grid = Board::new().to_grid_string();
        assert!(matches!(
            engine.get_best_move(&grid, Piece::Black, &request),
            Err(EngineError::Configuration(name)) if name == "montecarlo"
        ));
        assert!(matches!(
            engine.evaluate_position(&grid, Piece::Black, "montecarlo"),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn malformed_board_is_rejected() {
        let mut engine = AIEngine::default();
        let request = MoveRequest::default();
        assert!(matches!(
            engine.get_best_move("WB.", Piece::Black, &request),
            Err(EngineError::InvalidBoardState(_))
        ));
    }

    #[test]
    fn serialized_markers_are_normalized() {
        let mut marked = Board::new();
        marked.refresh_legal_moves(Piece::White);
        let grid = marked.to_grid_string();
        assert!(grid.contains('0'));

        let mut engine = AIEngine::default();
        let request = MoveRequest {
            difficulty: 2,
            ..MoveRequest::default()
        };
        let result = engine.get_best_move(&grid, Piece::Black, &request).unwrap();
        assert!(Board::new().can_place_at(result.best_move, Piece::Black));
    }

    #[test]
    fn deterministic_without_randomness() {
        let mut engine = AIEngine::default();
        let grid = Board::new().to_grid_string();
        let request = MoveRequest {
            difficulty: 3,
            ..MoveRequest::default()
        };
        let a = engine.get_best_move(&grid, Piece::Black, &request).unwrap();
        let b = engine.get_best_move(&grid, Piece::Black, &request).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn full_randomness_still_plays_a_legal_move() {
        let mut engine = AIEngine::default();
        let board = Board::new();
        let grid = board.to_grid_string();
        let request = MoveRequest {
            difficulty: 1,
            randomness: 1.0,
            ..MoveRequest::default()
        };
        for _ in 0..16 {
            let result = engine.get_best_move(&grid, Piece::Black, &request).unwrap();
            assert!(board.can_place_at(result.best_move, Piece::Black));
        }
    }

    #[test]
    fn strategies_share_one_evaluation() {
        let engine = AIEngine::default();
        let grid = Board::new().to_grid_string();
        for player in [Piece::White, Piece::Black] {
            assert_eq!(
                engine.evaluate_position(&grid, player, "minimax").unwrap(),
                engine.evaluate_position(&grid, player, "alphabeta").unwrap()
            );
        }
    }

    #[test]
    fn pruning_stats_only_for_alphabeta() {
        let mut engine = AIEngine::default();
        let grid = Board::new().to_grid_string();
        let request = MoveRequest {
            difficulty: 2,
            ..MoveRequest::default()
        };
        engine.get_best_move(&grid, Piece::Black, &request).unwrap();
        let stats = engine.pruning_stats("alphabeta").unwrap().unwrap();
        assert!(stats.nodes_searched > 0);
        assert!(engine.pruning_stats("minimax").unwrap().is_none());
        assert!(engine.pruning_stats("montecarlo").is_err());
    }
}
