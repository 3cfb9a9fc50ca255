//! Multi-factor position scoring. Every term is computed as player
//! minus opponent, so swapping the perspective negates the score.

use crate::engine::config::EngineConfig;
use crate::logic::board::{Board, Piece, NUM_CELLS};
use crate::logic::eval_constants::{
    is_corner, is_edge, CORNERS, C_SQUARES, POSITION_WEIGHTS, X_SQUARES,
};
use std::sync::Arc;

pub struct Evaluator {
    config: Arc<EngineConfig>,
}

impl Evaluator {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// Heuristic score of `board` from `player`'s perspective. Pure; the
    /// strategies call this on throwaway board copies.
    #[must_use]
    pub fn evaluate(&self, board: &Board, player: Piece) -> i32 {
        let opponent = player.opposite();
        let cfg = &*self.config;

        let material = board.count(player) - board.count(opponent);
        let position = Self::positional(board, player) - Self::positional(board, opponent);
        let corners =
            cfg.corner_value * (Self::corners(board, player) - Self::corners(board, opponent));
        let edges = Self::edges(board, player) - Self::edges(board, opponent);
        let mobility = board.mobility(player) - board.mobility(opponent);
        let stability = self.stability(board, player) - self.stability(board, opponent);
        let risk = self.risk(board, player) - self.risk(board, opponent);

        cfg.weight_material * material
            + cfg.weight_position * position
            + cfg.weight_corner * corners
            + cfg.weight_edge * edges
            + cfg.weight_mobility * mobility
            + cfg.weight_stability * stability
            + cfg.weight_risk * risk
    }

    fn positional(board: &Board, side: Piece) -> i32 {
        let own = side.cell();
        (0..NUM_CELLS)
            .filter(|&idx| board.get(idx) == own)
            .map(|idx| POSITION_WEIGHTS[idx])
            .sum()
    }

    fn corners(board: &Board, side: Piece) -> i32 {
        let own = side.cell();
        CORNERS.iter().filter(|&&idx| board.get(idx) == own).count() as i32
    }

    fn edges(board: &Board, side: Piece) -> i32 {
        let own = side.cell();
        (0..NUM_CELLS)
            .filter(|&idx| is_edge(idx) && !is_corner(idx) && board.get(idx) == own)
            .count() as i32
    }

    /// Corners are always stable; edge pieces in a run contiguous with an
    /// owned corner cannot be flipped either. Each cell scores once even
    /// when a full edge is anchored from both ends.
    fn stability(&self, board: &Board, side: Piece) -> i32 {
        let own = side.cell();
        let mut score = 0;
        let mut anchored = [false; NUM_CELLS];

        for &corner in &CORNERS {
            if board.get(corner) != own {
                continue;
            }
            score += self.config.corner_stability_bonus;
            let (row, col) = Board::index_to_coord(corner);
            let along_row: i8 = if col == 0 { 1 } else { -1 };
            let along_col: i8 = if row == 0 { 1 } else { -1 };
            Self::walk_edge(board, own, corner, 0, along_row, &mut anchored);
            Self::walk_edge(board, own, corner, along_col, 0, &mut anchored);
        }

        let run_cells = anchored.iter().filter(|&&a| a).count() as i32;
        score + run_cells * self.config.edge_stability_bonus
    }

    fn walk_edge(
        board: &Board,
        own: crate::logic::board::Cell,
        corner: usize,
        dr: i8,
        dc: i8,
        anchored: &mut [bool; NUM_CELLS],
    ) {
        let (row, col) = Board::index_to_coord(corner);
        let mut r = row as i8 + dr;
        let mut c = col as i8 + dc;
        while (0..8).contains(&r) && (0..8).contains(&c) {
            let idx = Board::square_index(r as usize, c as usize);
            if board.get(idx) != own {
                break;
            }
            if !is_corner(idx) {
                anchored[idx] = true;
            }
            r += dr;
            c += dc;
        }
    }

    /// Danger squares: an X-square is only a liability while its corner
    /// is still open; a C-square always is. Applied once per cell.
    fn risk(&self, board: &Board, side: Piece) -> i32 {
        let own = side.cell();
        let mut penalty = 0;
        for &(x, corner) in &X_SQUARES {
            if board.get(x) == own && board.get(corner).is_open() {
                penalty += self.config.x_square_penalty;
            }
        }
        for &(c, _) in &C_SQUARES {
            if board.get(c) == own {
                penalty += self.config.c_square_penalty;
            }
        }
        penalty
    }
}
