// Default weights for the multi-factor evaluator. High values favor the
// side being scored; every term is computed as player minus opponent.

pub const WEIGHT_MATERIAL: i32 = 1;
pub const WEIGHT_POSITION: i32 = 3;
pub const WEIGHT_CORNER: i32 = 25;
pub const WEIGHT_EDGE: i32 = 5;
pub const WEIGHT_MOBILITY: i32 = 10;
pub const WEIGHT_STABILITY: i32 = 15;
pub const WEIGHT_RISK: i32 = 8;

pub const CORNER_VALUE: i32 = 100;
pub const CORNER_STABILITY_BONUS: i32 = 50;
pub const EDGE_STABILITY_BONUS: i32 = 10;
pub const X_SQUARE_PENALTY: i32 = -50;
pub const C_SQUARE_PENALTY: i32 = -20;

// Static positional weights. Corners dominate, the cells touching them
// are liabilities, edges carry a mild bonus over the interior.
#[rustfmt::skip]
pub const POSITION_WEIGHTS: [i32; 64] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -20,  -5,  -5,  -5,  -5, -20, -20,
     10,  -5,   3,   1,   1,   3,  -5,  10,
      5,  -5,   1,   0,   0,   1,  -5,   5,
      5,  -5,   1,   0,   0,   1,  -5,   5,
     10,  -5,   3,   1,   1,   3,  -5,  10,
    -20, -20,  -5,  -5,  -5,  -5, -20, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

pub const CORNERS: [usize; 4] = [0, 7, 56, 63];

/// X-squares (diagonal neighbor of a corner) paired with their corner.
pub const X_SQUARES: [(usize, usize); 4] = [(9, 0), (14, 7), (49, 56), (54, 63)];

/// C-squares (edge cell orthogonally adjacent to a corner) paired with
/// their corner.
pub const C_SQUARES: [(usize, usize); 8] = [
    (1, 0),
    (8, 0),
    (6, 7),
    (15, 7),
    (48, 56),
    (57, 56),
    (55, 63),
    (62, 63),
];

#[must_use]
pub const fn is_corner(idx: usize) -> bool {
    matches!(idx, 0 | 7 | 56 | 63)
}

#[must_use]
pub fn is_x_square(idx: usize) -> bool {
    X_SQUARES.iter().any(|&(x, _)| x == idx)
}

#[must_use]
pub fn is_c_square(idx: usize) -> bool {
    C_SQUARES.iter().any(|&(c, _)| c == idx)
}

#[must_use]
pub const fn is_edge(idx: usize) -> bool {
    let row = idx / 8;
    let col = idx % 8;
    row == 0 || row == 7 || col == 0 || col == 7
}
