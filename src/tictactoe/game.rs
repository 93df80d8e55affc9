//! Turn-based game engine driving policies through one game

use serde::{Deserialize, Serialize};

use super::board::{BoardState, CELLS, Player};
use crate::{Error, Result, ports::Policy};

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// State of the engine's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl From<Option<GameOutcome>> for GameStatus {
    fn from(outcome: Option<GameOutcome>) -> Self {
        match outcome {
            None => GameStatus::InProgress,
            Some(GameOutcome::Win(player)) => GameStatus::Won(player),
            Some(GameOutcome::Draw) => GameStatus::Draw,
        }
    }
}

/// One half-move as seen by a learning policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Board before the move
    pub before: BoardState,
    /// Cell the mover occupied
    pub position: usize,
    /// Board after the move
    pub after: BoardState,
    /// Player who moved
    pub mover: Player,
    /// Set when the move ended the game
    pub outcome: Option<GameOutcome>,
}

impl Transition {
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        self.outcome.and_then(GameOutcome::winner)
    }
}

/// Game engine holding the committed board, the pending board of the move in
/// flight, and the terminal flags.
///
/// Each half-move is staged on `pending`, evaluated for a win or a draw,
/// handed to the mover's policy for learning, and only then committed into
/// `current`. X always moves first.
#[derive(Debug, Clone)]
pub struct GameEngine {
    current: BoardState,
    pending: BoardState,
    turn: Player,
    is_over: bool,
    winner: Option<Player>,
    last_move: Option<usize>,
    history: Vec<Transition>,
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            current: BoardState::new(),
            pending: BoardState::new(),
            turn: Player::X,
            is_over: false,
            winner: None,
            last_move: None,
            history: Vec::with_capacity(CELLS),
        }
    }

    /// Restore the initial in-progress state, keeping allocations.
    pub fn clear(&mut self) {
        self.current = BoardState::new();
        self.pending = BoardState::new();
        self.turn = Player::X;
        self.is_over = false;
        self.winner = None;
        self.last_move = None;
        self.history.clear();
    }

    pub fn current(&self) -> &BoardState {
        &self.current
    }

    pub fn pending(&self) -> &BoardState {
        &self.pending
    }

    /// Player to move next
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Transitions of the game so far, in play order
    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_over {
            return None;
        }
        Some(match self.winner {
            Some(player) => GameOutcome::Win(player),
            None => GameOutcome::Draw,
        })
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::from(self.outcome())
    }

    /// Play one half-move: ask `policy` for the mover's cell, stage and
    /// evaluate it, let the policy learn from the transition, then commit.
    ///
    /// Nothing is committed unless every part succeeds; after an error the
    /// engine is exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// `GameOver` once the game has ended, `NoLegalMove` if the board has no
    /// empty cell, and whatever the policy returns from selection or update.
    pub fn step(&mut self, policy: &mut dyn Policy) -> Result<Transition> {
        self.ensure_playable()?;
        let position = policy.select_move(&self.current, self.turn)?;
        let transition = self.stage(position)?;
        if let Err(err) = policy.update(&transition) {
            self.pending = self.current;
            return Err(err);
        }
        self.commit(transition);
        Ok(transition)
    }

    /// Apply a move for the player to move without consulting any policy.
    pub fn apply_move(&mut self, position: usize) -> Result<Transition> {
        self.ensure_playable()?;
        let transition = self.stage(position)?;
        self.commit(transition);
        Ok(transition)
    }

    /// Play to the end with `x_policy` moving for X and `o_policy` for O.
    pub fn play_game(
        &mut self,
        x_policy: &mut dyn Policy,
        o_policy: &mut dyn Policy,
    ) -> Result<GameOutcome> {
        while !self.is_over {
            match self.turn {
                Player::X => self.step(x_policy)?,
                Player::O => self.step(o_policy)?,
            };
        }
        self.outcome().ok_or(Error::NoLegalMove)
    }

    /// Play to the end with one policy filling both seats.
    pub fn play_self(&mut self, policy: &mut dyn Policy) -> Result<GameOutcome> {
        while !self.is_over {
            self.step(policy)?;
        }
        self.outcome().ok_or(Error::NoLegalMove)
    }

    fn ensure_playable(&self) -> Result<()> {
        if self.is_over {
            return Err(Error::GameOver);
        }
        if self.current.is_full() {
            return Err(Error::NoLegalMove);
        }
        Ok(())
    }

    fn stage(&mut self, position: usize) -> Result<Transition> {
        let mover = self.turn;
        let mut pending = self.current;
        pending.apply(mover, position)?;
        self.pending = pending;

        // A line completed by the filling move is a win, not a draw.
        let outcome = if let Some(winner) = pending.winner() {
            Some(GameOutcome::Win(winner))
        } else if pending.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };

        Ok(Transition {
            before: self.current,
            position,
            after: pending,
            mover,
            outcome,
        })
    }

    fn commit(&mut self, transition: Transition) {
        self.current = transition.after;
        self.pending = transition.after;
        self.last_move = Some(transition.position);
        if let Some(outcome) = transition.outcome {
            self.is_over = true;
            self.winner = outcome.winner();
        }
        self.turn = self.turn.opponent();
        self.history.push(transition);
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
