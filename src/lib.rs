//! Tabular Q-learning for tic-tac-toe through self-play
//!
//! This crate provides:
//! - Bitboard tic-tac-toe with a turn-based game engine
//! - A masked Q-table shared by both players (X maximizes, O minimizes)
//! - Epsilon-greedy temporal-difference learning from self-play
//! - Training and evaluation pipelines with observers
//! - Versioned persistence in MessagePack or JSON
//!
//! ```
//! use ttt_qlearn::{QLearningParams, TrainingConfig, evaluate_self, train};
//!
//! let config = TrainingConfig::new(200, QLearningParams::default()).with_seed(7);
//! let (mut policy, history) = train(config)?;
//! assert_eq!(history.outcomes.total(), 200);
//!
//! policy.set_params(QLearningParams::frozen())?;
//! let counts = evaluate_self(&mut policy, 10)?;
//! assert_eq!(counts.total(), 10);
//! # Ok::<(), ttt_qlearn::Error>(())
//! ```

pub mod adapters;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod policies;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
pub use pipeline::{
    OutcomeCounts, Trainer, TrainingConfig, TrainingHistory, evaluate, evaluate_self, train,
};
pub use ports::{Observer, Policy, QTableRepository};
pub use q_learning::{QLearningParams, QRow, QTable, QTablePolicy, SavedQTable};
pub use tictactoe::{BoardState, GameEngine, GameOutcome, Player};
