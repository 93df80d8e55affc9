//! Learning behavior of the shared Q-table over self-play

use ttt_qlearn::{
    Policy,
    pipeline::{TrainingConfig, evaluate, evaluate_self, train},
    policies::RandomPolicy,
    q_learning::{QLearningParams, QTable, QTablePolicy},
    tictactoe::{BoardState, CELLS, GameEngine, Player},
};

#[test]
fn test_empty_board_row_is_fully_finite_after_training() {
    let config = TrainingConfig::new(100, QLearningParams::default())
        .with_seed(2024)
        .with_tracked_boards(vec![BoardState::new()]);
    let (policy, history) = train(config).unwrap();

    let row = policy.table().peek(&BoardState::new()).unwrap();
    assert_eq!(row.finite_count(), CELLS);
    assert!(row.masked_cells().is_empty());

    let series = history.series(0).unwrap();
    assert_eq!(series.len(), 100);
    assert_eq!(series[99], *row.values());
}

#[test]
fn test_every_row_is_masked_at_occupied_cells() {
    let config = TrainingConfig::new(500, QLearningParams::default()).with_seed(77);
    let (policy, _) = train(config).unwrap();

    assert!(policy.table().len() > 100);
    for (key, row) in policy.table().iter() {
        let board = BoardState::from_key(key).unwrap();
        assert!(row.matches_board(&board), "row {key} breaks masking");
        assert_eq!(row.finite_count(), CELLS - board.occupied_count());
    }
    policy.table().validate().unwrap();
}

#[test]
fn test_greedy_ties_break_to_lowest_cell() {
    let table = QTable::new().with_init_scale(0.0);
    let mut policy = QTablePolicy::from_table(table, QLearningParams::frozen()).unwrap();
    let board: BoardState = "X...O....".parse().unwrap();

    // Every empty cell holds 0.0, so both extrema tie everywhere
    assert_eq!(policy.select_move(&board, Player::X).unwrap(), 1);
    assert_eq!(policy.select_move(&board, Player::O).unwrap(), 1);

    let row = policy.table_mut().row(&board);
    row.set(5, 0.3).unwrap();
    row.set(7, 0.3).unwrap();
    assert_eq!(policy.select_move(&board, Player::X).unwrap(), 5);
}

#[test]
fn test_zero_learning_rate_leaves_table_unchanged() {
    let mut policy = QTablePolicy::new(QLearningParams::new(0.0, 0.8, 0.5).unwrap())
        .unwrap()
        .with_seed(5);
    let mut engine = GameEngine::new();
    engine.play_self(&mut policy).unwrap();
    let snapshot = policy.table().clone();

    for _ in 0..20 {
        engine.clear();
        engine.play_self(&mut policy).unwrap();
    }

    for (key, row) in snapshot.iter() {
        let board = BoardState::from_key(key).unwrap();
        assert_eq!(policy.table().peek(&board), Some(row));
    }
}

#[test]
fn test_same_seed_same_table() {
    let config = TrainingConfig::new(200, QLearningParams::default()).with_seed(31);
    let (first, _) = train(config.clone()).unwrap();
    let (second, _) = train(config).unwrap();

    assert_eq!(first.table().len(), second.table().len());
    for (key, row) in first.table().iter() {
        let board = BoardState::from_key(key).unwrap();
        assert_eq!(second.table().peek(&board), Some(row));
    }
}

#[test]
fn test_trained_table_beats_random_play() {
    let config = TrainingConfig::new(20_000, QLearningParams::default()).with_seed(99);
    let (mut policy, _) = train(config).unwrap();
    policy.set_params(QLearningParams::frozen()).unwrap();
    policy.set_rng_seed(3).unwrap();

    let mut random = RandomPolicy::with_seed("Random".to_string(), 4);
    let counts = evaluate(&mut policy, &mut random, 500).unwrap();
    assert_eq!(counts.total(), 500);
    assert!(
        counts.x_wins > counts.o_wins * 2,
        "trained X should dominate a random O: {counts:?}"
    );

    let self_play = evaluate_self(&mut policy, 50).unwrap();
    assert_eq!(self_play.total(), 50);
}
