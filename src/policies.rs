//! Baseline policies for evaluation and regression fixtures

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    ports::Policy,
    tictactoe::{BoardState, Player, Transition},
};

/// Uniformly random over empty cells; never learns
pub struct RandomPolicy {
    name: String,
    rng: StdRng,
}

impl RandomPolicy {
    /// Create a new random policy
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random policy with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_move(&mut self, board: &BoardState, _mover: Player) -> Result<usize> {
        let moves = board.empty_cells();
        if moves.is_empty() {
            return Err(Error::NoLegalMove);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Always takes the lowest-index empty cell
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEmptyPolicy;

impl Policy for FirstEmptyPolicy {
    fn select_move(&mut self, board: &BoardState, _mover: Player) -> Result<usize> {
        board.empty_cells().first().copied().ok_or(Error::NoLegalMove)
    }

    fn name(&self) -> &str {
        "First-Empty"
    }
}

/// Frozen policy wrapper - plays like the inner policy but never learns
///
/// Used to evaluate a trained table without touching its values.
pub struct FrozenPolicy<'a> {
    inner: &'a mut dyn Policy,
}

impl<'a> FrozenPolicy<'a> {
    pub fn new(inner: &'a mut dyn Policy) -> Self {
        Self { inner }
    }
}

impl Policy for FrozenPolicy<'_> {
    fn select_move(&mut self, board: &BoardState, mover: Player) -> Result<usize> {
        self.inner.select_move(board, mover)
    }

    fn update(&mut self, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.inner.set_rng_seed(seed)
    }
}
