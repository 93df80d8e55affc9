//! Epsilon-greedy tabular policy learning one shared table through self-play

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::Policy,
    q_learning::{params::QLearningParams, q_table::QTable},
    tictactoe::{BoardState, Player, Transition},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Reward of a half-move from X's (the maximizer's) point of view
fn reward(transition: &Transition) -> f64 {
    match transition.winner() {
        Some(winner) if winner.is_maximizer() => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}

/// Q-learning policy over a single table shared by both seats.
///
/// X picks the largest value of a row and O the smallest, so one table
/// holds the game from X's point of view and either side can play from it.
/// After every half-move the value of (board before, cell) moves toward
/// `R + γ·Qext`, where `Qext` is the best reply of the next mover on the
/// board after (or 0 once the game is over).
#[derive(Debug, Clone)]
pub struct QTablePolicy {
    table: QTable,
    params: QLearningParams,
    rng: StdRng,
}

impl QTablePolicy {
    /// Create a policy with an empty table
    pub fn new(params: QLearningParams) -> Result<Self> {
        Self::from_table(QTable::new(), params)
    }

    /// Wrap an existing (e.g. loaded) table
    pub fn from_table(table: QTable, params: QLearningParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            table,
            params,
            rng: build_rng(None),
        })
    }

    /// Seed exploration and fresh-row initialization
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
        self.table.set_rng_seed(seed.wrapping_add(1));
    }

    pub fn params(&self) -> QLearningParams {
        self.params
    }

    /// Replace the hyperparameters between runs
    pub fn set_params(&mut self, params: QLearningParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut QTable {
        &mut self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }

    /// Value-optimal cell for `mover`, ignoring exploration
    pub fn greedy_move(&mut self, board: &BoardState, mover: Player) -> Result<usize> {
        let (_, cell) = self
            .table
            .best_value_and_cell(board, mover.is_maximizer())?;
        Ok(cell)
    }
}

impl Policy for QTablePolicy {
    fn select_move(&mut self, board: &BoardState, mover: Player) -> Result<usize> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return Err(Error::NoLegalMove);
        }

        if self.rng.random::<f64>() < self.params.epsilon {
            // Explore
            empty.choose(&mut self.rng).copied().ok_or(Error::NoLegalMove)
        } else {
            self.greedy_move(board, mover)
        }
    }

    fn update(&mut self, transition: &Transition) -> Result<()> {
        let continuation = if transition.is_terminal() {
            0.0
        } else {
            let next_mover = transition.mover.opponent();
            let (value, _) = self
                .table
                .best_value_and_cell(&transition.after, next_mover.is_maximizer())?;
            value
        };

        let QLearningParams {
            learning_rate,
            discount_factor,
            ..
        } = self.params;
        let target = reward(transition) + discount_factor * continuation;

        let row = self.table.row(&transition.before);
        let old = row.get(transition.position).ok_or(Error::MaskedCell {
            position: transition.position,
        })?;
        row.set(
            transition.position,
            (1.0 - learning_rate) * old + learning_rate * target,
        )
    }

    fn name(&self) -> &str {
        "Q-Table"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.reseed(seed);
        Ok(())
    }
}
