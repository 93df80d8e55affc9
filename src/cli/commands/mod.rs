//! Subcommands of the `ttt-qlearn` binary

use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::{
    adapters::repository_for_path,
    q_learning::SavedQTable,
    tictactoe::{BoardState, Player},
};

pub mod evaluate;
pub mod inspect;
pub mod train;

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "player1" | "p1" => Ok(Player::X),
        "o" | "second" | "player2" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

pub(crate) fn parse_board(literal: &str) -> Result<BoardState> {
    literal
        .parse()
        .with_context(|| format!("Invalid board literal '{literal}'"))
}

/// Load a saved table with the repository matching the file extension
pub(crate) fn load_table(path: &Path) -> Result<SavedQTable> {
    let repository = repository_for_path(path)?;
    repository
        .load(path)
        .with_context(|| format!("Failed to load Q-table from {}", path.display()))
}
