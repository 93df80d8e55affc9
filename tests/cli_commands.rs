use clap::Parser;
use tempfile::tempdir;
use ttt_qlearn::{
    adapters::MsgPackRepository,
    cli::commands::{
        evaluate::{self, EvaluateArgs},
        inspect::{self, InspectArgs},
        train::{self, TrainArgs},
    },
    ports::QTableRepository,
};

#[test]
fn train_then_evaluate_and_inspect() {
    let tmp = tempdir().unwrap();
    let table = tmp.path().join("qtable.msgpack");
    let history = tmp.path().join("history.csv");

    let args = TrainArgs::parse_from([
        "train",
        "--episodes",
        "300",
        "--seed",
        "42",
        "--track",
        ".........",
        "--track",
        "X...O....",
        "--history",
        history.to_str().unwrap(),
        "--output",
        table.to_str().unwrap(),
        "--no-progress",
    ]);
    train::execute(args).expect("training should succeed");

    let saved = MsgPackRepository::new().load(&table).unwrap();
    assert_eq!(saved.metadata.episodes_trained, 300);
    assert_eq!(saved.metadata.seed, Some(42));
    assert_eq!(saved.metadata.tracked_boards, vec![".........", "X...O...."]);

    let csv = std::fs::read_to_string(&history).unwrap();
    // header + 2 boards x 300 episodes
    assert_eq!(csv.lines().count(), 601);
    assert!(csv.lines().nth(1).unwrap().starts_with(".........,0,"));

    let args = EvaluateArgs::parse_from([
        "evaluate",
        table.to_str().unwrap(),
        "--games",
        "40",
        "--opponent",
        "random",
        "--agent-player",
        "o",
        "--seed",
        "1",
        "--no-progress",
    ]);
    let counts = evaluate::run(&args).unwrap();
    assert_eq!(counts.total(), 40);
    evaluate::execute(args).unwrap();

    let args = InspectArgs::parse_from(["inspect", table.to_str().unwrap(), "........."]);
    inspect::execute(args).expect("empty board is always in a trained table");
}

#[test]
fn resume_accumulates_episodes() {
    let tmp = tempdir().unwrap();
    let first = tmp.path().join("first.json");
    let second = tmp.path().join("second.msgpack");

    train::execute(TrainArgs::parse_from([
        "train",
        "--episodes",
        "50",
        "--seed",
        "3",
        "--output",
        first.to_str().unwrap(),
        "--no-progress",
    ]))
    .unwrap();

    train::execute(TrainArgs::parse_from([
        "train",
        "--episodes",
        "70",
        "--input",
        first.to_str().unwrap(),
        "--output",
        second.to_str().unwrap(),
        "--epsilon",
        "0.2",
        "--no-progress",
    ]))
    .unwrap();

    let saved = MsgPackRepository::new().load(&second).unwrap();
    assert_eq!(saved.metadata.episodes_trained, 120);
    assert_eq!(saved.metadata.params.unwrap().epsilon, 0.2);
}

#[test]
fn inspect_unvisited_board_fails() {
    let tmp = tempdir().unwrap();
    let table = tmp.path().join("tiny.msgpack");

    train::execute(TrainArgs::parse_from([
        "train",
        "--episodes",
        "1",
        "--seed",
        "9",
        "--output",
        table.to_str().unwrap(),
        "--no-progress",
    ]))
    .unwrap();

    // Two X's and no O can never occur in play
    let args = InspectArgs::parse_from(["inspect", table.to_str().unwrap(), "XX......."]);
    let err = inspect::execute(args).unwrap_err();
    assert!(err.to_string().contains("never visited"));
}
