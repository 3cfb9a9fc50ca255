//! Core game logic and AI search for Othello (Reversi).
//!
//! [`logic`] holds the board model and the game lifecycle. [`engine`]
//! holds the position evaluator, the two search strategies (exhaustive
//! minimax and alpha-beta) and the [`engine::ai::AIEngine`] facade that
//! the serving layer drives with serialized board states.

pub mod engine;
pub mod logic;
