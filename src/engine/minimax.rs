//! Exhaustive minimax with iterative deepening. Visits every node of
//! the bounded tree; the baseline the pruning strategy is measured
//! against.

use crate::engine::config::EngineConfig;
use crate::engine::eval::Evaluator;
use crate::engine::{AIMoveResult, EngineError, SearchContext, SearchStrategy};
use crate::logic::board::{Board, Piece};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct MinimaxEngine {
    evaluator: Evaluator,
}

impl MinimaxEngine {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: Evaluator::new(config),
        }
    }

    /// Recursive node evaluation. `None` means the deadline passed and
    /// the current depth must be discarded by the deepening loop.
    fn search(
        &self,
        board: &Board,
        depth: u8,
        to_move: Piece,
        root: Piece,
        ctx: &mut SearchContext,
    ) -> Option<i32> {
        ctx.nodes += 1;
        if ctx.out_of_time() {
            return None;
        }
        if depth == 0 {
            return Some(self.evaluator.evaluate(board, root));
        }

        let moves = board.legal_moves(to_move);
        if moves.is_empty() {
            if !board.has_any_move(to_move.opposite()) {
                return Some(self.evaluator.evaluate(board, root));
            }
            // Forced pass: hand the turn over and charge one ply.
            return self.search(board, depth - 1, to_move.opposite(), root, ctx);
        }

        let maximizing = to_move == root;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let mut child = *board;
            child.place(mv, to_move);
            let score = self.search(&child, depth - 1, to_move.opposite(), root, ctx)?;
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        Some(best)
    }

    /// One complete root pass at `depth`. `None` discards the pass.
    fn root_search(
        &self,
        board: &Board,
        player: Piece,
        moves: &[usize],
        depth: u8,
        ctx: &mut SearchContext,
    ) -> Option<(usize, i32)> {
        let mut best_move = None;
        let mut best = i32::MIN;
        for &mv in moves {
            if ctx.out_of_time() {
                return None;
            }
            let mut child = *board;
            child.place(mv, player);
            let score = self.search(&child, depth - 1, player.opposite(), player, ctx)?;
            if best_move.is_none() || score > best {
                best = score;
                best_move = Some(mv);
            }
        }
        best_move.map(|mv| (mv, best))
    }
}

impl SearchStrategy for MinimaxEngine {
    fn best_move(
        &mut self,
        board: &Board,
        player: Piece,
        max_depth: u8,
        max_time_ms: u64,
    ) -> Result<AIMoveResult, EngineError> {
        let started = Instant::now();
        let mut board = *board;
        board.clear_markers();

        let moves = board.legal_moves(player);
        if moves.is_empty() {
            return Err(EngineError::NoValidMoves);
        }
        if moves.len() == 1 {
            let mv = moves[0];
            let mut child = board;
            child.place(mv, player);
            return Ok(AIMoveResult {
                best_move: mv,
                evaluation: self.evaluator.evaluate(&child, player),
                search_depth: 0,
                nodes_searched: 1,
                time_elapsed_ms: started.elapsed().as_millis() as u64,
                strategy: self.name().to_string(),
            });
        }

        let mut ctx = SearchContext::new(Duration::from_millis(max_time_ms));
        let mut best: Option<(usize, i32, u8)> = None;
        for depth in 1..=max_depth {
            if ctx.out_of_time() {
                break;
            }
            match self.root_search(&board, player, &moves, depth, &mut ctx) {
                Some((mv, score)) => {
                    log::debug!(
                        "minimax depth {depth} complete: move {mv} score {score} ({} nodes)",
                        ctx.nodes
                    );
                    best = Some((mv, score, depth));
                }
                None => break,
            }
        }

        // If not even depth 1 completed, fall back to the first
        // candidate's depth-0 evaluation instead of failing.
        let (best_move, evaluation, search_depth) = best.unwrap_or_else(|| {
            let mv = moves[0];
            let mut child = board;
            child.place(mv, player);
            (mv, self.evaluator.evaluate(&child, player), 0)
        });

        Ok(AIMoveResult {
            best_move,
            evaluation,
            search_depth,
            nodes_searched: ctx.nodes,
            time_elapsed_ms: started.elapsed().as_millis() as u64,
            strategy: self.name().to_string(),
        })
    }

    fn evaluate_position(&self, board: &Board, player: Piece) -> i32 {
        self.evaluator.evaluate(board, player)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MinimaxEngine {
        MinimaxEngine::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn rejects_position_without_moves() {
        let mut grid = String::from(".").repeat(64);
        grid.replace_range(0..1, "B");
        let board = Board::from_grid(&grid).unwrap();
        let err = engine().best_move(&board, Piece::White, 4, 1000).unwrap_err();
        assert!(matches!(err, EngineError::NoValidMoves));
        assert_eq!(err.to_string(), "No valid moves available");
    }

    #[test]
    fn opening_search_is_deterministic() {
        let board = Board::new();
        let mut engine = engine();
        let a = engine.best_move(&board, Piece::Black, 4, 10_000).unwrap();
        let b = engine.best_move(&board, Piece::Black, 4, 10_000).unwrap();
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.evaluation, b.evaluation);
        assert_eq!(a.nodes_searched, b.nodes_searched);
        assert_eq!(a.search_depth, 4);
        assert!(Board::new().can_place_at(a.best_move, Piece::Black));
    }

    #[test]
    fn forced_move_short_circuits() {
        // Black's only move is f4 (cell 29): one white stone walled in by
        // a black one.
        let mut grid = String::from(".").repeat(64);
        grid.replace_range(27..29, "BW");
        let board = Board::from_grid(&grid).unwrap();
        assert_eq!(board.legal_moves(Piece::Black), vec![29]);

        let result = engine().best_move(&board, Piece::Black, 6, 1000).unwrap();
        assert_eq!(result.best_move, 29);
        assert_eq!(result.search_depth, 0);
        assert_eq!(result.nodes_searched, 1);
    }

    #[test]
    fn zero_budget_degrades_to_first_candidate() {
        let board = Board::new();
        let result = engine().best_move(&board, Piece::Black, 6, 0).unwrap();
        assert_eq!(result.search_depth, 0);
        assert!(board.can_place_at(result.best_move, Piece::Black));
    }
}
