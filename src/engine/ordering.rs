//! Root and interior move ordering for the pruning strategy. Ordering
//! only affects how fast the window tightens, never the result of a
//! fully completed depth.

use crate::logic::board::EDGE_LENGTH;
use crate::logic::eval_constants::{is_c_square, is_corner, is_edge, is_x_square};

/// Priority classes: corners, then cells that are neither X- nor
/// C-squares, then edge cells, then the corner-adjacent liabilities.
fn priority(idx: usize) -> u8 {
    if is_corner(idx) {
        0
    } else if !is_x_square(idx) && !is_c_square(idx) {
        1
    } else if is_edge(idx) {
        2
    } else {
        3
    }
}

/// Manhattan distance to the board center, doubled to stay integral.
fn center_distance(idx: usize) -> i32 {
    let row = (idx / EDGE_LENGTH) as i32;
    let col = (idx % EDGE_LENGTH) as i32;
    (2 * row - 7).abs() + (2 * col - 7).abs()
}

pub fn order_moves(moves: &mut [usize]) {
    moves.sort_by_key(|&idx| (priority(idx), center_distance(idx), idx));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_come_first() {
        let mut moves = vec![19, 63, 9, 0, 37];
        order_moves(&mut moves);
        assert_eq!(&moves[..2], &[0, 63]);
        assert_eq!(*moves.last().unwrap(), 9);
    }

    #[test]
    fn liabilities_come_last() {
        // b1 (C-square) sorts behind a plain edge cell, and b2 (X-square)
        // behind everything.
        let mut moves = vec![9, 1, 3, 27];
        order_moves(&mut moves);
        assert_eq!(moves, vec![27, 3, 1, 9]);
    }

    #[test]
    fn center_proximity_breaks_ties() {
        // All interior safe cells: the ones nearest the center lead.
        let mut moves = vec![18, 27, 36, 45];
        order_moves(&mut moves);
        assert_eq!(moves, vec![27, 36, 18, 45]);
    }
}
