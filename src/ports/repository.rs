//! Repository port for Q-table persistence.

use std::path::Path;

use crate::{Result, q_learning::SavedQTable};

/// Port for persisting and loading trained Q-tables.
///
/// The storage format is an adapter concern; the domain only hands over a
/// [`SavedQTable`] and expects the same one back.
///
/// # Examples
///
/// ```no_run
/// use ttt_qlearn::ports::QTableRepository;
/// use ttt_qlearn::q_learning::SavedQTable;
/// use std::path::Path;
///
/// fn checkpoint<R: QTableRepository>(
///     repo: &R,
///     saved: &SavedQTable,
///     path: &Path,
/// ) -> ttt_qlearn::Result<()> {
///     repo.save(saved, path)
/// }
/// ```
pub trait QTableRepository {
    /// Save a table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails.
    fn save(&self, saved: &SavedQTable, path: &Path) -> Result<()>;

    /// Load a table from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, corrupt, or was
    /// written by an incompatible format version. A partially decoded table
    /// is never returned.
    fn load(&self, path: &Path) -> Result<SavedQTable>;
}
