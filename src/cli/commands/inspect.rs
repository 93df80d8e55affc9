//! Inspect command - Show the learned values of one board

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use super::{load_table, parse_board, parse_player_token};
use crate::{
    cli::output::{format_row, print_kv, print_section, print_subsection},
    tictactoe::{BoardState, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Show the Q-values of a board in a saved table")]
pub struct InspectArgs {
    /// Saved Q-table (.msgpack or .json)
    pub table: PathBuf,

    /// Board literal, e.g. "X...O...." (X/x, O/o, '.' or '-' for empty)
    pub board: String,

    /// Side to move (defaults to the side implied by the piece count)
    #[arg(long)]
    pub player: Option<String>,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let board = parse_board(&args.board)?;
    let mover = match &args.player {
        Some(value) => parse_player_token(value, "--player")?,
        None => board.to_move(),
    };

    let saved = load_table(&args.table)?;

    print_section(&format!("Board {}", board.to_literal()));
    println!("{board}");
    print_kv("Key", &board.key().to_string());
    print_kv("To move", &mover.to_string());

    if let Some(winner) = board.winner() {
        print_kv("Status", &format!("{winner} has won"));
        return Ok(());
    }
    if board.is_full() {
        print_kv("Status", "draw");
        return Ok(());
    }

    let Some(row) = saved.table().peek(&board) else {
        bail!(
            "Board {} has no row in {} (never visited during training)",
            board.to_literal(),
            args.table.display()
        );
    };

    print_subsection("Q-values (- marks occupied cells)");
    println!("{}", format_row(row));

    if let Some((value, cell)) = row.best(mover.is_maximizer()) {
        println!();
        print_kv("Greedy move", &format!("cell {cell} ({value:+.4})"));
        print_kv("After move", &preview(&board, mover, cell)?);
    }

    Ok(())
}

fn preview(board: &BoardState, mover: Player, cell: usize) -> Result<String> {
    Ok(board.with_move(mover, cell)?.to_literal())
}
