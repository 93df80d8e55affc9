//! Train command - Learn a Q-table through self-play

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::{load_table, parse_board};
use crate::{
    adapters::repository_for_path,
    cli::output::{
        format_number, format_row, print_interval, print_kv, print_outcomes, print_section,
        print_subsection,
    },
    pipeline::{IntervalObserver, ProgressObserver, Trainer, TrainingConfig},
    q_learning::{QLearningParams, QTable, QTablePolicy},
    tictactoe::BoardState,
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-table through self-play", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of self-play episodes
    #[arg(long, short = 'e', default_value_t = 10_000)]
    pub episodes: usize,

    /// Learning rate (alpha) in [0, 1]
    #[arg(long, default_value_t = QLearningParams::DEFAULT_LEARNING_RATE)]
    pub learning_rate: f64,

    /// Discount factor (gamma) in [0, 1]
    #[arg(long, default_value_t = QLearningParams::DEFAULT_DISCOUNT_FACTOR)]
    pub discount_factor: f64,

    /// Exploration rate (epsilon) in [0, 1]
    #[arg(long, default_value_t = QLearningParams::DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Random seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Standard deviation of fresh row values
    #[arg(long)]
    pub init_scale: Option<f64>,

    /// Board literal whose row is recorded after every episode (repeatable)
    #[arg(long = "track", value_name = "BOARD")]
    pub track: Vec<String>,

    /// Continue training a previously saved table
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Output file for the trained table (.msgpack or .json)
    #[arg(long, short = 'O', default_value = "qtable.msgpack")]
    pub output: PathBuf,

    /// Write the tracked-board history (.csv, otherwise JSON)
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Print outcome rates every N episodes
    #[arg(long, value_name = "N")]
    pub report_every: Option<usize>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let params = QLearningParams::new(args.learning_rate, args.discount_factor, args.epsilon)
        .context("Invalid hyperparameters")?;

    let tracked_boards = if args.track.is_empty() {
        vec![BoardState::new()]
    } else {
        args.track
            .iter()
            .map(|literal| parse_board(literal))
            .collect::<Result<Vec<_>>>()?
    };

    // Fail on an unknown extension before spending time on training
    let repository = repository_for_path(&args.output)?;

    let (table, prior_episodes) = match &args.input {
        Some(path) => {
            let saved = load_table(path)?;
            println!(
                "Resuming from {} ({} episodes trained)",
                path.display(),
                format_number(saved.metadata.episodes_trained)
            );
            let prior = saved.metadata.episodes_trained;
            (saved.into_table(), prior)
        }
        None => (QTable::new(), 0),
    };
    let table = match args.init_scale {
        Some(scale) => table.with_init_scale(scale),
        None => table,
    };
    table.validate().context("Invalid initial table")?;

    let mut config = TrainingConfig::new(args.episodes, params)
        .with_tracked_boards(tracked_boards.clone())
        .with_prior_episodes(prior_episodes);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    print_section("Q-Learning Self-Play Training");
    print_kv("Episodes", &format_number(args.episodes));
    print_kv("Learning rate", &params.learning_rate.to_string());
    print_kv("Discount factor", &params.discount_factor.to_string());
    print_kv("Epsilon", &params.epsilon.to_string());
    print_kv("Init scale", &table.init_scale().to_string());
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }
    print_kv("Output", &args.output.display().to_string());

    let mut trainer = Trainer::new(config).with_checkpoint(repository, &args.output);
    if !args.no_progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(every) = args.report_every {
        let observer = IntervalObserver::new(every).with_reporter(print_interval);
        trainer = trainer.with_observer(Box::new(observer));
    }

    let mut policy = QTablePolicy::from_table(table, params)?;
    let history = trainer.run(&mut policy).context("Training failed")?;

    print_section("Training Summary");
    print_outcomes(&history.outcomes);
    print_kv("Rows in table", &format_number(policy.table().len()));
    print_kv(
        "Total episodes",
        &format_number(prior_episodes + args.episodes),
    );

    for board in &tracked_boards {
        if let Some(row) = policy.table().peek(board) {
            print_subsection(&format!("Tracked board {}", board.to_literal()));
            println!("{}", format_row(row));
        }
    }

    if let Some(path) = &args.history {
        history
            .save(path)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
        println!("\nHistory written to {}", path.display());
    }

    println!("\n✓ Q-table saved to {}", args.output.display());
    Ok(())
}
