//! Alpha-beta pruned minimax with iterative deepening and move
//! ordering. Produces the same move as the exhaustive search for any
//! fully completed depth while visiting a fraction of the nodes.

use crate::engine::config::EngineConfig;
use crate::engine::eval::Evaluator;
use crate::engine::ordering::order_moves;
use crate::engine::{AIMoveResult, EngineError, PruningStats, SearchContext, SearchStrategy};
use crate::logic::board::{Board, Piece};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct AlphaBetaEngine {
    evaluator: Evaluator,
    last_stats: PruningStats,
}

impl AlphaBetaEngine {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: Evaluator::new(config),
            last_stats: PruningStats {
                nodes_searched: 0,
                prune_count: 0,
                pruning_efficiency: 0.0,
            },
        }
    }

    /// Recursive node evaluation carrying the `[alpha, beta]` window.
    /// `None` means the deadline passed and the depth is discarded.
    #[allow(clippy::too_many_arguments)]
    fn search(
        &self,
        board: &Board,
        depth: u8,
        to_move: Piece,
        root: Piece,
        mut alpha: i32,
        mut beta: i32,
        ctx: &mut SearchContext,
    ) -> Option<i32> {
        ctx.nodes += 1;
        if ctx.out_of_time() {
            return None;
        }
        if depth == 0 {
            return Some(self.evaluator.evaluate(board, root));
        }

        let mut moves = board.legal_moves(to_move);
        if moves.is_empty() {
            if !board.has_any_move(to_move.opposite()) {
                return Some(self.evaluator.evaluate(board, root));
            }
            // Forced pass: hand the turn over and charge one ply.
            return self.search(board, depth - 1, to_move.opposite(), root, alpha, beta, ctx);
        }
        order_moves(&mut moves);

        let maximizing = to_move == root;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let mut child = *board;
            child.place(mv, to_move);
            let score = self.search(&child, depth - 1, to_move.opposite(), root, alpha, beta, ctx)?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                ctx.prunes += 1;
                break;
            }
        }
        Some(best)
    }

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
        let mut alpha = i32::MIN;
        for &mv in moves {
            if ctx.out_of_time() {
                return None;
            }
            let mut child = *board;
            child.place(mv, player);
            let score =
                self.search(&child, depth - 1, player.opposite(), player, alpha, i32::MAX, ctx)?;
            if best_move.is_none() || score > best {
                best = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best);
        }
        best_move.map(|mv| (mv, best))
    }
}

impl SearchStrategy for AlphaBetaEngine {
    fn best_move(
        &mut self,
        board: &Board,
        player: Piece,
        max_depth: u8,
        max_time_ms: u64,
    ) -> Result<AIMoveResult, EngineError> {
        let started = Instant::now();
        self.last_stats = PruningStats::default();
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
            self.last_stats.nodes_searched = 1;
            return Ok(AIMoveResult {
                best_move: mv,
                evaluation: self.evaluator.evaluate(&child, player),
                search_depth: 0,
                nodes_searched: 1,
                time_elapsed_ms: started.elapsed().as_millis() as u64,
                strategy: self.name().to_string(),
            });
        }

        let mut ordered = moves.clone();
        order_moves(&mut ordered);

        let mut ctx = SearchContext::new(Duration::from_millis(max_time_ms));
        let mut best: Option<(usize, i32, u8)> = None;
        for depth in 1..=max_depth {
            if ctx.out_of_time() {
                break;
            }
            match self.root_search(&board, player, &ordered, depth, &mut ctx) {
                Some((mv, score)) => {
                    log::debug!(
                        "alphabeta depth {depth} complete: move {mv} score {score} ({} nodes, {} prunes)",
                        ctx.nodes,
                        ctx.prunes
                    );
                    best = Some((mv, score, depth));
                }
                None => break,
            }
        }

        let (best_move, evaluation, search_depth) = best.unwrap_or_else(|| {
            let mv = ordered[0];
            let mut child = board;
            child.place(mv, player);
            (mv, self.evaluator.evaluate(&child, player), 0)
        });

        self.last_stats = ctx.pruning_stats();
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
        "alphabeta"
    }

    fn pruning_stats(&self) -> Option<PruningStats> {
        Some(self.last_stats)
    }
}
