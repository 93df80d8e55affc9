//! Self-play training loop with tracked-board snapshots

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use super::evaluation::OutcomeCounts;
use crate::{
    Error, Result,
    ports::{Observer, Policy, QTableRepository},
    q_learning::{QLearningParams, QTablePolicy, SavedQTable, TrainingMetadata},
    tictactoe::{BoardState, CELLS, GameEngine},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub episodes: usize,

    /// Hyperparameters installed on the policy before the run
    pub params: QLearningParams,

    /// Random seed
    pub seed: Option<u64>,

    /// Boards whose rows are snapshotted after every episode
    pub tracked_boards: Vec<BoardState>,

    /// Episodes the policy had already seen (when resuming)
    pub prior_episodes: usize,
}

impl TrainingConfig {
    pub fn new(episodes: usize, params: QLearningParams) -> Self {
        Self {
            episodes,
            params,
            seed: None,
            tracked_boards: Vec::new(),
            prior_episodes: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tracked_boards(mut self, boards: Vec<BoardState>) -> Self {
        self.tracked_boards = boards;
        self
    }

    pub fn with_prior_episodes(mut self, prior_episodes: usize) -> Self {
        self.prior_episodes = prior_episodes;
        self
    }

    /// Metadata describing a table produced by this configuration
    pub fn metadata(&self) -> TrainingMetadata {
        TrainingMetadata {
            episodes_trained: self.prior_episodes + self.episodes,
            params: Some(self.params),
            seed: self.seed,
            tracked_boards: self.tracked_boards.iter().map(BoardState::to_literal).collect(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(10_000, QLearningParams::default())
    }
}

/// Row values of every tracked board after every episode.
///
/// `snapshots[board][episode][cell]`, with `None` at occupied cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub tracked_boards: Vec<String>,
    pub snapshots: Vec<Vec<[Option<f64>; CELLS]>>,
    pub outcomes: OutcomeCounts,
}

impl TrainingHistory {
    fn new(tracked_boards: &[BoardState], episodes: usize) -> Self {
        Self {
            tracked_boards: tracked_boards.iter().map(BoardState::to_literal).collect(),
            snapshots: vec![Vec::with_capacity(episodes); tracked_boards.len()],
            outcomes: OutcomeCounts::default(),
        }
    }

    /// Number of recorded episodes
    pub fn episodes(&self) -> usize {
        self.snapshots.first().map_or(self.outcomes.total(), Vec::len)
    }

    /// Time series of one tracked board
    pub fn series(&self, board: usize) -> Option<&[[Option<f64>; CELLS]]> {
        self.snapshots.get(board).map(Vec::as_slice)
    }

    /// Write one CSV row per (board, episode); masked cells are left blank.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let mut header = vec!["board".to_string(), "episode".to_string()];
        header.extend((0..CELLS).map(|cell| format!("cell_{cell}")));
        csv.write_record(&header)?;

        for (literal, series) in self.tracked_boards.iter().zip(&self.snapshots) {
            for (episode, row) in series.iter().enumerate() {
                let mut record = vec![literal.clone(), episode.to_string()];
                record.extend(
                    row.iter()
                        .map(|value| value.map(|v| v.to_string()).unwrap_or_default()),
                );
                csv.write_record(&record)?;
            }
        }
        csv.flush().map_err(|source| Error::Io {
            operation: "flush CSV history".to_string(),
            source,
        })?;
        Ok(())
    }

    /// Save as CSV (`.csv`) or pretty JSON (anything else)
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let writer = BufWriter::new(file);

        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")) {
            self.write_csv(writer)
        } else {
            serde_json::to_writer_pretty(writer, self)?;
            Ok(())
        }
    }
}

/// Self-play trainer: one policy fills both seats of every episode.
pub struct Trainer {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    checkpoint: Option<(Box<dyn QTableRepository>, PathBuf)>,
}

impl Trainer {
    /// Create a new trainer
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            checkpoint: None,
        }
    }

    /// Add an observer to the trainer
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Save the final table to `path` through `repository`
    pub fn with_checkpoint(
        mut self,
        repository: Box<dyn QTableRepository>,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.checkpoint = Some((repository, path.into()));
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run every episode, then persist the table if a checkpoint is set.
    ///
    /// The policy's hyperparameters are replaced by the configured ones
    /// first, and reseeded when a seed is configured. Any error aborts the
    /// run; nothing is saved in that case.
    pub fn run(&mut self, policy: &mut QTablePolicy) -> Result<TrainingHistory> {
        policy.set_params(self.config.params)?;
        if let Some(seed) = self.config.seed {
            policy.set_rng_seed(seed)?;
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut history = TrainingHistory::new(&self.config.tracked_boards, self.config.episodes);
        let mut engine = GameEngine::new();

        for episode in 0..self.config.episodes {
            engine.clear();
            let outcome = engine.play_self(policy)?;
            history.outcomes.record(outcome);

            for (series, board) in history
                .snapshots
                .iter_mut()
                .zip(&self.config.tracked_boards)
            {
                series.push(*policy.table_mut().row(board).values());
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        if let Some((repository, path)) = &self.checkpoint {
            let saved = SavedQTable::new(policy.table().clone(), self.config.metadata());
            repository.save(&saved, path)?;
        }

        Ok(history)
    }
}

/// Train a fresh policy for `config.episodes` self-play episodes
pub fn train(config: TrainingConfig) -> Result<(QTablePolicy, TrainingHistory)> {
    let mut policy = QTablePolicy::new(config.params)?;
    let history = Trainer::new(config).run(&mut policy)?;
    Ok((policy, history))
}
