//! Evaluation of policies with learning switched off

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    policies::FrozenPolicy,
    ports::{Observer, Policy},
    tictactoe::{GameEngine, GameOutcome, Player},
};

/// Tally of finished games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    /// Wins of `player` as a fraction of all games (0 when empty)
    pub fn win_rate(&self, player: Player) -> f64 {
        let wins = match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        };
        Self::rate(wins, self.total())
    }

    pub fn draw_rate(&self) -> f64 {
        Self::rate(self.draws, self.total())
    }

    fn rate(count: usize, total: usize) -> f64 {
        if total > 0 {
            count as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Plays a fixed number of games with frozen policies
pub struct Evaluation {
    games: usize,
    observers: Vec<Box<dyn Observer>>,
}

impl Evaluation {
    pub fn new(games: usize) -> Self {
        Self {
            games,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the evaluation
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// X played by `x_policy`, O by `o_policy`
    pub fn run(
        &mut self,
        x_policy: &mut dyn Policy,
        o_policy: &mut dyn Policy,
    ) -> Result<OutcomeCounts> {
        let mut x_frozen = FrozenPolicy::new(x_policy);
        let mut o_frozen = FrozenPolicy::new(o_policy);
        self.play(|engine| engine.play_game(&mut x_frozen, &mut o_frozen))
    }

    /// One policy in both seats
    pub fn run_self(&mut self, policy: &mut dyn Policy) -> Result<OutcomeCounts> {
        let mut frozen = FrozenPolicy::new(policy);
        self.play(|engine| engine.play_self(&mut frozen))
    }

    fn play<F>(&mut self, mut play_one: F) -> Result<OutcomeCounts>
    where
        F: FnMut(&mut GameEngine) -> Result<GameOutcome>,
    {
        for observer in &mut self.observers {
            observer.on_training_start(self.games)?;
        }

        let mut counts = OutcomeCounts::default();
        let mut engine = GameEngine::new();
        for game in 0..self.games {
            engine.clear();
            let outcome = play_one(&mut engine)?;
            counts.record(outcome);
            for observer in &mut self.observers {
                observer.on_episode_end(game, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }
        Ok(counts)
    }
}

/// Play `games` frozen games between two policies
pub fn evaluate(
    x_policy: &mut dyn Policy,
    o_policy: &mut dyn Policy,
    games: usize,
) -> Result<OutcomeCounts> {
    Evaluation::new(games).run(x_policy, o_policy)
}

/// Play `games` frozen self-play games
pub fn evaluate_self(policy: &mut dyn Policy, games: usize) -> Result<OutcomeCounts> {
    Evaluation::new(games).run_self(policy)
}
