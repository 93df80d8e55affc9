//! Tabular Q-learning for tic-tac-toe
//!
//! One [`QTable`] maps every visited board to a row of nine action values,
//! with occupied cells masked out. A single [`QTablePolicy`] plays both
//! seats during self-play: X reads rows as a maximizer, O as a minimizer,
//! and every half-move updates the row of the board it was played on:
//!
//! ```text
//! Q(s,a) ← (1-α)·Q(s,a) + α·(R + γ·Qext)
//! ```
//!
//! where `R` is +1 when X just won, -1 when O just won and 0 otherwise, and
//! `Qext` is the best value the next mover can reach from the new board
//! (0 once the game is over).
//!
//! ## Usage Example
//!
//! ```no_run
//! use ttt_qlearn::q_learning::{QLearningParams, QTablePolicy};
//!
//! let params = QLearningParams::new(
//!     0.4, // learning_rate
//!     0.8, // discount_factor
//!     0.7, // epsilon (exploration)
//! )?;
//! let policy = QTablePolicy::new(params)?.with_seed(42);
//! # Ok::<(), ttt_qlearn::Error>(())
//! ```

pub mod params;
pub mod policy;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use params::QLearningParams;
pub use policy::QTablePolicy;
pub use q_table::{DEFAULT_INIT_SCALE, QRow, QTable};
pub use serialization::{SavedQTable, TrainingMetadata};
