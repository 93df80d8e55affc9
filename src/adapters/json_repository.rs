//! JSON implementation of the Q-table repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::QTableRepository, q_learning::SavedQTable};

/// Human-readable Q-table repository.
///
/// Rows are written as arrays of nine entries with `null` at occupied
/// cells, keyed by the decimal board key.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    pub fn new() -> Self {
        Self
    }
}

impl QTableRepository for JsonRepository {
    fn save(&self, saved: &SavedQTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, saved)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedQTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedQTable = serde_json::from_reader(BufReader::new(file))?;
        saved.verify()?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::{
        q_learning::{QTable, TrainingMetadata},
        tictactoe::BoardState,
    };

    #[test]
    fn test_json_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("qtable.json");

        let mut table = QTable::new().with_seed(8);
        let board: BoardState = "XO.......".parse().unwrap();
        let row = *table.row(&board);
        let saved = SavedQTable::new(table, TrainingMetadata::default());

        let repo = JsonRepository::new();
        repo.save(&saved, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded.table().peek(&board), Some(&row));
    }

    #[test]
    fn test_json_values_are_bit_exact() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("exact.json");

        let values = [
            -1.4663948627200005,
            -1.1356791837328721,
            0.1 + 0.2,
            f64::MIN_POSITIVE,
            -1.0e-300,
        ];
        let mut table = QTable::new().with_init_scale(0.0);
        let board = BoardState::new();
        let row = table.row(&board);
        for (cell, value) in values.iter().enumerate() {
            row.set(cell, *value).unwrap();
        }
        let saved = SavedQTable::new(table, TrainingMetadata::default());

        let repo = JsonRepository::new();
        repo.save(&saved, &file_path).unwrap();
        let loaded = repo.load(&file_path).unwrap();
        let loaded_row = loaded.table().peek(&board).unwrap();

        for (cell, value) in values.iter().enumerate() {
            assert_eq!(
                loaded_row.get(cell).map(f64::to_bits),
                Some(value.to_bits()),
                "cell {cell} changed"
            );
        }
    }

    #[test]
    fn test_masked_cells_are_null() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("qtable.json");

        let mut table = QTable::new();
        let board: BoardState = "....X....".parse().unwrap();
        table.row(&board);
        JsonRepository::new()
            .save(&SavedQTable::new(table, TrainingMetadata::default()), &file_path)
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&file_path).unwrap()).unwrap();
        let row = &json["table"]["rows"][board.key().value().to_string()];
        assert!(row[4].is_null());
        assert!(row[0].is_f64());
    }

    #[test]
    fn test_load_rejects_foreign_version() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("qtable.json");

        let mut saved = SavedQTable::new(QTable::new(), TrainingMetadata::default());
        saved.version = 7;
        let repo = JsonRepository::new();
        repo.save(&saved, &file_path).unwrap();

        assert!(matches!(
            repo.load(&file_path),
            Err(Error::UnsupportedFormatVersion { found: 7, .. })
        ));
    }

    #[test]
    fn test_load_truncated_file_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("broken.json");
        fs::write(&file_path, "{\"version\": 1, \"table\": {").unwrap();

        let result = JsonRepository::new().load(&file_path);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
