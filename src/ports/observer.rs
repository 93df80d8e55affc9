//! Observer port - hooks into the training loop
//!
//! Observers collect data during training (progress bars, outcome tallies)
//! without the trainer knowing how that data is presented.

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once
/// 2. `on_episode_end(episode, outcome)` - after every episode
/// 3. `on_training_end()` - once
pub trait Observer {
    /// Called when training starts with the number of episodes to play.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal state.
    ///
    /// `episode` is 0-based.
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
