//! Versioned save format for trained Q-tables.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, q_learning::QLearningParams, q_learning::QTable};

/// Provenance stored alongside a table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Episodes of self-play the table has seen, across resumed runs
    pub episodes_trained: usize,
    /// Hyperparameters of the most recent run
    pub params: Option<QLearningParams>,
    /// Random seed of the most recent run
    pub seed: Option<u64>,
    /// Board literals tracked during the most recent run
    pub tracked_boards: Vec<String>,
}

/// A Q-table as written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    table: QTable,
    pub metadata: TrainingMetadata,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn new(table: QTable, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            table,
            metadata,
        }
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }

    /// Reject foreign versions and tables whose rows break the masking rule.
    pub fn verify(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedFormatVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        self.table
            .validate()
            .map_err(|e| Error::SerializationContext {
                operation: "validate loaded Q-table".to_string(),
                message: e.to_string(),
            })
    }
}
