//! Tic-Tac-Toe board, win detection and game engine

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BoardKey, BoardState, CELLS, Cell, Player};
pub use game::{GameEngine, GameOutcome, GameStatus, Transition};
pub use lines::{LINE_MASKS, LineAnalyzer, WINNING_LINES};
