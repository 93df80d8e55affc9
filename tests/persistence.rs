//! Saving and loading trained tables through the repository adapters

use std::fs;

use tempfile::TempDir;
use ttt_qlearn::{
    Error,
    adapters::{JsonRepository, MsgPackRepository, repository_for_path},
    pipeline::{Trainer, TrainingConfig},
    ports::QTableRepository,
    q_learning::{QLearningParams, QTablePolicy, SavedQTable},
    tictactoe::BoardState,
};

fn trained(episodes: usize) -> QTablePolicy {
    let mut policy = QTablePolicy::new(QLearningParams::default()).unwrap();
    Trainer::new(TrainingConfig::new(episodes, QLearningParams::default()).with_seed(12))
        .run(&mut policy)
        .unwrap();
    policy
}

fn assert_same_rows(saved: &SavedQTable, policy: &QTablePolicy) {
    assert_eq!(saved.table().len(), policy.table().len());
    for (key, row) in policy.table().iter() {
        let board = BoardState::from_key(key).unwrap();
        assert_eq!(saved.table().peek(&board), Some(row), "row {key} differs");
    }
}

#[test]
fn test_roundtrip_in_both_formats() {
    let temp_dir = TempDir::new().unwrap();
    let policy = trained(150);
    let config = TrainingConfig::new(150, QLearningParams::default()).with_seed(12);

    for name in ["table.msgpack", "table.json"] {
        let path = temp_dir.path().join(name);
        let repository = repository_for_path(&path).unwrap();
        let saved = SavedQTable::new(policy.table().clone(), config.metadata());
        repository.save(&saved, &path).unwrap();

        let loaded = repository.load(&path).unwrap();
        assert_eq!(loaded.version, SavedQTable::VERSION);
        assert_eq!(loaded.metadata.episodes_trained, 150);
        assert_eq!(loaded.metadata.seed, Some(12));
        assert_same_rows(&loaded, &policy);
    }
}

#[test]
fn test_trainer_checkpoint_writes_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("checkpoint.msgpack");

    let mut policy = QTablePolicy::new(QLearningParams::default()).unwrap();
    let config = TrainingConfig::new(40, QLearningParams::default())
        .with_seed(8)
        .with_prior_episodes(60);
    Trainer::new(config)
        .with_checkpoint(Box::new(MsgPackRepository::new()), &path)
        .run(&mut policy)
        .unwrap();

    let loaded = MsgPackRepository::new().load(&path).unwrap();
    assert_eq!(loaded.metadata.episodes_trained, 100);
    assert_same_rows(&loaded, &policy);
}

#[test]
fn test_loaded_table_keeps_learning() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("resume.json");
    let policy = trained(50);
    let rows_before = policy.table().len();

    let repository = JsonRepository::new();
    repository
        .save(
            &SavedQTable::new(policy.into_table(), Default::default()),
            &path,
        )
        .unwrap();

    let table = repository.load(&path).unwrap().into_table();
    let mut resumed = QTablePolicy::from_table(table, QLearningParams::default()).unwrap();
    Trainer::new(TrainingConfig::new(200, QLearningParams::default()).with_seed(13))
        .run(&mut resumed)
        .unwrap();

    assert!(resumed.table().len() >= rows_before);
    resumed.table().validate().unwrap();
}

#[test]
fn test_missing_and_corrupt_files_are_persistence_errors() {
    let temp_dir = TempDir::new().unwrap();

    let missing = temp_dir.path().join("missing.msgpack");
    let err = MsgPackRepository::new().load(&missing).unwrap_err();
    assert!(err.is_persistence());

    let corrupt = temp_dir.path().join("corrupt.json");
    fs::write(&corrupt, "not json at all").unwrap();
    let err = JsonRepository::new().load(&corrupt).unwrap_err();
    assert!(err.is_persistence());

    let corrupt = temp_dir.path().join("corrupt.msgpack");
    fs::write(&corrupt, [0xff, 0x00, 0x13]).unwrap();
    let err = MsgPackRepository::new().load(&corrupt).unwrap_err();
    assert!(err.is_persistence());
}

#[test]
fn test_row_with_wrong_mask_is_rejected_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tampered.json");
    let policy = trained(20);
    JsonRepository::new()
        .save(
            &SavedQTable::new(policy.table().clone(), Default::default()),
            &path,
        )
        .unwrap();

    // Give the empty-board row a hole at cell 4
    let mut json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    json["table"]["rows"]["0"][4] = serde_json::Value::Null;
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    let err = JsonRepository::new().load(&path).unwrap_err();
    assert!(matches!(err, Error::SerializationContext { .. }));
}
