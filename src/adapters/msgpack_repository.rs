//! MessagePack implementation of the Q-table repository.
//!
//! This adapter implements the QTableRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{Result, error::Error, ports::QTableRepository, q_learning::SavedQTable};

/// MessagePack-based Q-table repository.
///
/// This is the default on-disk format: a trained table of a few thousand
/// rows stays small and loads quickly.
///
/// # Examples
///
/// ```no_run
/// use ttt_qlearn::adapters::MsgPackRepository;
/// use ttt_qlearn::ports::QTableRepository;
/// use ttt_qlearn::q_learning::{QTable, SavedQTable, TrainingMetadata};
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let saved = SavedQTable::new(QTable::new(), TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("qtable.msgpack"))?;
/// let loaded = repo.load(Path::new("qtable.msgpack"))?;
/// # Ok::<(), ttt_qlearn::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl QTableRepository for MsgPackRepository {
    fn save(&self, saved: &SavedQTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, saved).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.into_inner().map_err(|e| Error::Io {
            operation: format!("flush file {path:?}"),
            source: e.into_error(),
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedQTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedQTable = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize Q-table from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;

        saved.verify()?;
        Ok(saved)
    }
}
