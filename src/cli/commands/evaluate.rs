//! Evaluate command - Play a trained table with learning switched off

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use super::{load_table, parse_player_token};
use crate::{
    cli::output::{format_number, format_share, print_kv, print_outcomes, print_section},
    pipeline::{Evaluation, OutcomeCounts, ProgressObserver},
    policies::{FirstEmptyPolicy, RandomPolicy},
    ports::Policy,
    q_learning::{QLearningParams, QTablePolicy},
    tictactoe::Player,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    /// The table plays both sides
    #[value(name = "self")]
    SelfPlay,
    /// Uniformly random legal moves
    Random,
    /// Always the lowest-index empty cell
    FirstEmpty,
}

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained Q-table", allow_negative_numbers = true)]
pub struct EvaluateArgs {
    /// Saved Q-table (.msgpack or .json)
    pub table: PathBuf,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Opponent of the table
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::SelfPlay)]
    pub opponent: OpponentKind,

    /// Side the table plays against a non-self opponent (x or o)
    #[arg(long, default_value = "x")]
    pub agent_player: String,

    /// Exploration rate of the table during evaluation
    #[arg(long, default_value_t = 0.0)]
    pub epsilon: f64,

    /// Random seed for reproducible evaluation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Run the evaluation and return the tally
pub fn run(args: &EvaluateArgs) -> Result<OutcomeCounts> {
    let agent_player = parse_player_token(&args.agent_player, "--agent-player")?;
    let saved = load_table(&args.table)?;
    let episodes_trained = saved.metadata.episodes_trained;

    let params = QLearningParams::frozen().with_epsilon(args.epsilon);
    let mut policy = QTablePolicy::from_table(saved.into_table(), params)
        .context("Invalid evaluation epsilon")?;

    let mut opponent: Option<Box<dyn Policy>> = match args.opponent {
        OpponentKind::SelfPlay => None,
        OpponentKind::Random => Some(Box::new(RandomPolicy::new("Random".to_string()))),
        OpponentKind::FirstEmpty => Some(Box::new(FirstEmptyPolicy)),
    };

    if let Some(seed) = args.seed {
        policy.set_rng_seed(seed)?;
        if let Some(opponent) = opponent.as_mut() {
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }
    }

    print_section("Evaluation");
    print_kv("Table", &args.table.display().to_string());
    print_kv("Episodes trained", &format_number(episodes_trained));
    print_kv("Rows", &format_number(policy.table().len()));
    print_kv("Games", &format_number(args.games));
    print_kv("Epsilon", &args.epsilon.to_string());
    match &opponent {
        None => print_kv("Opponent", "itself"),
        Some(opponent) => {
            print_kv("Opponent", opponent.name());
            print_kv("Agent plays as", &agent_player.to_string());
        }
    }

    let mut evaluation = Evaluation::new(args.games);
    if !args.no_progress {
        evaluation = evaluation.with_observer(Box::new(ProgressObserver::new()));
    }

    let counts = match (opponent.as_mut(), agent_player) {
        (None, _) => evaluation.run_self(&mut policy)?,
        (Some(opponent), Player::X) => evaluation.run(&mut policy, opponent.as_mut())?,
        (Some(opponent), Player::O) => evaluation.run(opponent.as_mut(), &mut policy)?,
    };

    Ok(counts)
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let counts = run(&args)?;

    print_section("Results");
    print_outcomes(&counts);

    if args.opponent != OpponentKind::SelfPlay {
        let agent = parse_player_token(&args.agent_player, "--agent-player")?;
        let wins = match agent {
            Player::X => counts.x_wins,
            Player::O => counts.o_wins,
        };
        let losses = match agent {
            Player::X => counts.o_wins,
            Player::O => counts.x_wins,
        };
        println!();
        print_kv("Agent wins", &format_share(wins, counts.win_rate(agent)));
        print_kv(
            "Agent losses",
            &format_share(losses, counts.win_rate(agent.opponent())),
        );
    }

    Ok(())
}
