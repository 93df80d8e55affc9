//! Policy port - what the game engine needs from a player

use crate::{
    Result,
    tictactoe::{BoardState, Player, Transition},
};

/// Move-selection and learning contract used by [`GameEngine`].
///
/// Random, scripted and tabular policies all implement this trait and are
/// interchangeable in either seat.
///
/// # Examples
///
/// ```
/// use ttt_qlearn::{
///     ports::Policy,
///     tictactoe::{BoardState, GameEngine, Player},
/// };
///
/// struct Center;
///
/// impl Policy for Center {
///     fn select_move(&mut self, board: &BoardState, _mover: Player) -> ttt_qlearn::Result<usize> {
///         if board.is_empty(4) {
///             return Ok(4);
///         }
///         board
///             .empty_cells()
///             .first()
///             .copied()
///             .ok_or(ttt_qlearn::Error::NoLegalMove)
///     }
///
///     fn name(&self) -> &str {
///         "center"
///     }
/// }
///
/// let mut engine = GameEngine::new();
/// engine.step(&mut Center).unwrap();
/// assert_eq!(engine.last_move(), Some(4));
/// ```
///
/// [`GameEngine`]: crate::tictactoe::GameEngine
pub trait Policy {
    /// Select a cell (0-8) for `mover` on `board`.
    ///
    /// # Errors
    ///
    /// Returns `NoLegalMove` if the board has no empty cell.
    fn select_move(&mut self, board: &BoardState, mover: Player) -> Result<usize>;

    /// Learn from a half-move that was just staged by the engine.
    ///
    /// Called after every half-move, before the engine commits the board.
    /// The default does nothing, which suits non-learning policies.
    fn update(&mut self, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    /// Name used in reports.
    fn name(&self) -> &str;

    /// Reseed the policy's random number generator, if it has one.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
