//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{BoardKey, BoardState, CELLS},
};

/// Standard deviation of the values a fresh row starts with
pub const DEFAULT_INIT_SCALE: f64 = 1.0;

/// Action values of one board, indexed by cell.
///
/// Occupied cells hold `None` and never take part in an extremum search;
/// exactly the empty cells of the board carry finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QRow {
    values: [Option<f64>; CELLS],
}

impl QRow {
    /// Build a row with `scale`-sized normal noise at the empty cells of
    /// `board` and masks at the occupied ones.
    pub fn fresh<R: Rng + ?Sized>(board: &BoardState, scale: f64, rng: &mut R) -> Self {
        let mut values = [None; CELLS];
        for (pos, value) in values.iter_mut().enumerate() {
            if board.is_empty(pos) {
                let noise: f64 = rng.sample(StandardNormal);
                *value = Some(noise * scale);
            }
        }
        Self { values }
    }

    pub fn values(&self) -> &[Option<f64>; CELLS] {
        &self.values
    }

    /// Value at `cell`, `None` if masked or out of range
    pub fn get(&self, cell: usize) -> Option<f64> {
        self.values.get(cell).copied().flatten()
    }

    /// Overwrite the value of an unmasked cell.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` for cells outside 0-8, `MaskedCell` for occupied
    /// cells, `InvalidConfiguration` for non-finite values.
    pub fn set(&mut self, cell: usize, value: f64) -> Result<()> {
        let slot = self
            .values
            .get_mut(cell)
            .ok_or(Error::InvalidPosition { position: cell })?;
        if slot.is_none() {
            return Err(Error::MaskedCell { position: cell });
        }
        if !value.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("Q-value for cell {cell} must be finite, got {value}"),
            });
        }
        *slot = Some(value);
        Ok(())
    }

    /// Cells carrying the mask, ascending
    pub fn masked_cells(&self) -> Vec<usize> {
        (0..CELLS).filter(|&c| self.values[c].is_none()).collect()
    }

    pub fn finite_count(&self) -> usize {
        self.values.iter().flatten().count()
    }

    /// Extremal value and its cell; ties go to the lowest cell index.
    pub fn best(&self, maximize: bool) -> Option<(f64, usize)> {
        let mut best: Option<(f64, usize)> = None;
        for (cell, value) in self.values.iter().enumerate() {
            let Some(value) = *value else { continue };
            let better = match best {
                None => true,
                Some((current, _)) if maximize => value > current,
                Some((current, _)) => value < current,
            };
            if better {
                best = Some((value, cell));
            }
        }
        best
    }

    pub fn max(&self) -> Option<f64> {
        self.best(true).map(|(value, _)| value)
    }

    pub fn min(&self) -> Option<f64> {
        self.best(false).map(|(value, _)| value)
    }

    /// Whether the mask matches exactly the occupied cells of `board`
    pub fn matches_board(&self, board: &BoardState) -> bool {
        (0..CELLS).all(|pos| match self.values[pos] {
            Some(value) => board.is_empty(pos) && value.is_finite(),
            None => !board.is_empty(pos),
        })
    }
}

fn entropy_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}

/// Q-table mapping board keys to action-value rows.
///
/// Rows are created on first access, already masked, so callers never
/// observe an unmasked row for an occupied cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    rows: HashMap<BoardKey, QRow>,
    init_scale: f64,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl QTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            init_scale: DEFAULT_INIT_SCALE,
            rng: entropy_rng(),
        }
    }

    /// Set the spread of fresh row values
    pub fn with_init_scale(mut self, init_scale: f64) -> Self {
        self.init_scale = init_scale;
        self
    }

    /// Seed the generator used for fresh rows
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn init_scale(&self) -> f64 {
        self.init_scale
    }

    /// Get-or-create the row of `board`
    pub fn row(&mut self, board: &BoardState) -> &mut QRow {
        let scale = self.init_scale;
        let rng = &mut self.rng;
        self.rows
            .entry(board.key())
            .or_insert_with(|| QRow::fresh(board, scale, rng))
    }

    /// Row of `board` if it has been materialized
    pub fn peek(&self, board: &BoardState) -> Option<&QRow> {
        self.rows.get(&board.key())
    }

    /// Extremal finite value of `board`'s row and its cell (lowest cell on ties).
    ///
    /// # Errors
    ///
    /// `NoLegalMove` if the board has no empty cell.
    pub fn best_value_and_cell(
        &mut self,
        board: &BoardState,
        maximize: bool,
    ) -> Result<(f64, usize)> {
        self.row(board).best(maximize).ok_or(Error::NoLegalMove)
    }

    /// Number of materialized rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (BoardKey, &QRow)> {
        self.rows.iter().map(|(key, row)| (*key, row))
    }

    /// Check that every stored row is masked exactly at its board's
    /// occupied cells.
    pub fn validate(&self) -> Result<()> {
        if !self.init_scale.is_finite() || self.init_scale < 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "init scale must be finite and non-negative, got {}",
                    self.init_scale
                ),
            });
        }
        for (key, row) in &self.rows {
            let board = BoardState::from_key(*key)?;
            if !row.matches_board(&board) {
                return Err(Error::InvalidConfiguration {
                    message: format!("row for board {key} is not masked at its occupied cells"),
                });
            }
        }
        Ok(())
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(literal: &str) -> BoardState {
        literal.parse().unwrap()
    }

    #[test]
    fn test_fresh_row_masks_occupied_cells() {
        let mut table = QTable::new().with_seed(3);
        let b = board("X...O...X");
        let row = *table.row(&b);
        assert_eq!(row.masked_cells(), vec![0, 4, 8]);
        assert_eq!(row.finite_count(), 6);
        assert!(row.matches_board(&b));
    }

    #[test]
    fn test_row_is_cached() {
        let mut table = QTable::new().with_seed(5);
        let b = board("X........");
        let first = *table.row(&b);
        let second = *table.row(&b);
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_zero_scale_rows_are_zero() {
        let mut table = QTable::new().with_init_scale(0.0);
        let row = *table.row(&BoardState::new());
        assert!(row.values().iter().all(|v| *v == Some(0.0)));
    }

    #[test]
    fn test_best_breaks_ties_on_lowest_cell() {
        let mut table = QTable::new().with_init_scale(0.0);
        let b = board("X.......O");
        let row = table.row(&b);
        row.set(3, 2.0).unwrap();
        row.set(6, 2.0).unwrap();
        row.set(5, -1.0).unwrap();
        row.set(7, -1.0).unwrap();

        assert_eq!(table.best_value_and_cell(&b, true).unwrap(), (2.0, 3));
        assert_eq!(table.best_value_and_cell(&b, false).unwrap(), (-1.0, 5));
    }

    #[test]
    fn test_fresh_zero_row_picks_first_empty_cell() {
        let mut table = QTable::new().with_init_scale(0.0);
        let b = board("XO.......");
        assert_eq!(table.best_value_and_cell(&b, true).unwrap(), (0.0, 2));
        assert_eq!(table.best_value_and_cell(&b, false).unwrap(), (0.0, 2));
    }

    #[test]
    fn test_full_board_has_no_best() {
        let mut table = QTable::new();
        let b = board("XOXXOOOXX");
        assert!(matches!(
            table.best_value_and_cell(&b, true),
            Err(Error::NoLegalMove)
        ));
    }

    #[test]
    fn test_set_rejects_masked_cell() {
        let mut table = QTable::new();
        let row = table.row(&board("X........"));
        assert!(matches!(row.set(0, 1.0), Err(Error::MaskedCell { position: 0 })));
        assert!(matches!(
            row.set(9, 1.0),
            Err(Error::InvalidPosition { position: 9 })
        ));
        assert!(row.set(1, f64::NAN).is_err());
    }

    #[test]
    fn test_validate_detects_corrupt_row() {
        let mut table = QTable::new().with_seed(1);
        table.row(&BoardState::new());
        table.validate().unwrap();

        let mut json = serde_json::to_value(&table).unwrap();
        // The empty board has key 0; masking one of its cells breaks the row.
        json["rows"]["0"][4] = serde_json::Value::Null;
        let corrupt: QTable = serde_json::from_value(json).unwrap();
        assert!(corrupt.validate().is_err());
    }

    #[test]
    fn test_seeded_tables_agree() {
        let mut a = QTable::new().with_seed(42);
        let mut b = QTable::new().with_seed(42);
        let empty = BoardState::new();
        assert_eq!(a.row(&empty), b.row(&empty));
    }
}
