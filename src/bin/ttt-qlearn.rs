//! ttt-qlearn CLI - Tabular Q-learning for tic-tac-toe
//!
//! This CLI provides a unified interface for:
//! - Training a Q-table through self-play (optionally resuming a saved one)
//! - Evaluating a trained table against itself or baseline opponents
//! - Inspecting the learned values of individual boards

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt-qlearn")]
#[command(version, about = "Tabular Q-learning for tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-table through self-play
    Train(Box<ttt_qlearn::cli::commands::train::TrainArgs>),

    /// Evaluate a trained Q-table
    Evaluate(ttt_qlearn::cli::commands::evaluate::EvaluateArgs),

    /// Show the learned values of one board
    Inspect(ttt_qlearn::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => ttt_qlearn::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => ttt_qlearn::cli::commands::evaluate::execute(args),
        Commands::Inspect(args) => ttt_qlearn::cli::commands::inspect::execute(args),
    }
}
