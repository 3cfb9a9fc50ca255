//! Board state and move dynamics for the 8x8 Othello grid.
//!
//! The board is a plain 64-cell value type. Search never mutates a
//! shared board: every hypothetical move is played on a fresh copy, so
//! there is no undo log and no aliasing between branches.

use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use thiserror::Error;

pub const EDGE_LENGTH: usize = 8;
pub const NUM_CELLS: usize = 64;

/// Ray directions used for legality scans and flip propagation.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    White,
    Black,
    /// A computed legal destination for the designated next mover.
    /// Never hand-set; cleared and recomputed by `refresh_legal_moves`.
    LegalMove,
}

impl Cell {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::White => 'W',
            Self::Black => 'B',
            Self::LegalMove => '0',
        }
    }

    /// Whether a piece may be placed here (markers count as open).
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Empty | Self::LegalMove)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    White,
    Black,
}

impl Piece {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[must_use]
    pub const fn cell(self) -> Cell {
        match self {
            Self::White => Cell::White,
            Self::Black => Cell::Black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("board string must be 64 characters, got {0}")]
    BadLength(usize),
    #[error("invalid board character {0:?} at cell {1}")]
    BadChar(char, usize),
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    cells: [Cell; NUM_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard opening: White on d4/e5, Black on e4/d5.
    #[must_use]
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; NUM_CELLS];
        cells[Self::square_index(3, 3)] = Cell::White;
        cells[Self::square_index(3, 4)] = Cell::Black;
        cells[Self::square_index(4, 3)] = Cell::Black;
        cells[Self::square_index(4, 4)] = Cell::White;
        Self { cells }
    }

    /// Parse the 64-character row-major serialization. This is the only
    /// place board input is validated; the scan and flip internals
    /// assume a well-formed board.
    pub fn from_grid(s: &str) -> Result<Self, BoardParseError> {
        let len = s.chars().count();
        if len != NUM_CELLS {
            return Err(BoardParseError::BadLength(len));
        }
        let mut cells = [Cell::Empty; NUM_CELLS];
        for (idx, ch) in s.chars().enumerate() {
            cells[idx] = match ch {
                '.' => Cell::Empty,
                'W' => Cell::White,
                'B' => Cell::Black,
                '0' => Cell::LegalMove,
                other => return Err(BoardParseError::BadChar(other, idx)),
            };
        }
        Ok(Self { cells })
    }

    #[must_use]
    pub fn to_grid_string(&self) -> String {
        self.cells.iter().map(|c| c.as_char()).collect()
    }

    #[must_use]
    pub const fn square_index(row: usize, col: usize) -> usize {
        row * EDGE_LENGTH + col
    }

    #[must_use]
    pub const fn index_to_coord(idx: usize) -> (usize, usize) {
        (idx / EDGE_LENGTH, idx % EDGE_LENGTH)
    }

    #[must_use]
    pub const fn get(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    /// True iff the cell is open and at least one ray from `idx` holds a
    /// contiguous run of opposite pieces terminated by an own piece.
    #[must_use]
    pub fn can_place_at(&self, idx: usize, piece: Piece) -> bool {
        if !self.cells[idx].is_open() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.would_flip_in_direction(idx, piece, dr, dc))
    }

    fn would_flip_in_direction(&self, idx: usize, piece: Piece, dr: i8, dc: i8) -> bool {
        let own = piece.cell();
        let other = piece.opposite().cell();
        let (row, col) = Self::index_to_coord(idx);

        let mut r = row as i8 + dr;
        let mut c = col as i8 + dc;
        let mut found_other = false;

        while (0..EDGE_LENGTH as i8).contains(&r) && (0..EDGE_LENGTH as i8).contains(&c) {
            let cell = self.cells[Self::square_index(r as usize, c as usize)];
            if cell == other {
                found_other = true;
                r += dr;
                c += dc;
            } else if cell == own {
                return found_other;
            } else {
                // Empty cell or marker ends the ray without a capture.
                return false;
            }
        }
        false
    }

    /// Place `piece` at `idx` and flip every captured run. The caller
    /// must already have validated legality; an illegal placement flips
    /// nothing and is a caller error, not a self-checked one.
    pub fn place(&mut self, idx: usize, piece: Piece) {
        self.cells[idx] = piece.cell();
        for &(dr, dc) in &DIRECTIONS {
            self.flip_in_direction(idx, piece, dr, dc);
        }
    }

    fn flip_in_direction(&mut self, idx: usize, piece: Piece, dr: i8, dc: i8) {
        if !self.would_flip_in_direction(idx, piece, dr, dc) {
            return;
        }
        let own = piece.cell();
        let other = piece.opposite().cell();
        let (row, col) = Self::index_to_coord(idx);

        let mut r = row as i8 + dr;
        let mut c = col as i8 + dc;
        loop {
            let sq = Self::square_index(r as usize, c as usize);
            if self.cells[sq] != other {
                break;
            }
            self.cells[sq] = own;
            r += dr;
            c += dc;
        }
    }

    /// Legal destinations for `piece` in ascending cell order.
    #[must_use]
    pub fn legal_moves(&self, piece: Piece) -> Vec<usize> {
        (0..NUM_CELLS)
            .filter(|&idx| self.can_place_at(idx, piece))
            .collect()
    }

    #[must_use]
    pub fn has_any_move(&self, piece: Piece) -> bool {
        (0..NUM_CELLS).any(|idx| self.can_place_at(idx, piece))
    }

    #[must_use]
    pub fn mobility(&self, piece: Piece) -> i32 {
        (0..NUM_CELLS)
            .filter(|&idx| self.can_place_at(idx, piece))
            .count() as i32
    }

    /// Recompute legal-move markers for the side that did NOT just move:
    /// callers pass the piece that just moved and the markers describe
    /// the opponent's options. Returns whether that side has any move,
    /// which is what callers use to detect forced passes and game end.
    pub fn refresh_legal_moves(&mut self, just_moved: Piece) -> bool {
        self.clear_markers();
        let mover = just_moved.opposite();
        let mut any = false;
        for idx in 0..NUM_CELLS {
            if self.can_place_at(idx, mover) {
                self.cells[idx] = Cell::LegalMove;
                any = true;
            }
        }
        any
    }

    /// Normalize `'0'` marker cells back to empty. Must run before any
    /// marker recomputation or search over a deserialized board.
    pub fn clear_markers(&mut self) {
        for cell in &mut self.cells {
            if *cell == Cell::LegalMove {
                *cell = Cell::Empty;
            }
        }
    }

    #[must_use]
    pub fn count(&self, piece: Piece) -> i32 {
        let own = piece.cell();
        self.cells.iter().filter(|&&c| c == own).count() as i32
    }

    #[must_use]
    pub fn occupied(&self) -> i32 {
        self.count(Piece::White) + self.count(Piece::Black)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_grid_string())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in 0..EDGE_LENGTH {
            write!(f, "{} ", row + 1)?;
            for col in 0..EDGE_LENGTH {
                write!(f, "{} ", self.cells[Self::square_index(row, col)].as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
