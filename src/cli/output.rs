//! Output formatting for CLI

use crate::{
    pipeline::OutcomeCounts,
    q_learning::QRow,
    tictactoe::{CELLS, Player},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Count with its share of all games, e.g. `1,234 (12.3%)`
pub fn format_share(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

/// Print the outcome tally of a run
pub fn print_outcomes(counts: &OutcomeCounts) {
    print_kv("Games", &format_number(counts.total()));
    print_kv(
        "X wins",
        &format_share(counts.x_wins, counts.win_rate(Player::X)),
    );
    print_kv(
        "O wins",
        &format_share(counts.o_wins, counts.win_rate(Player::O)),
    );
    print_kv("Draws", &format_share(counts.draws, counts.draw_rate()));
}

/// Print one finished window of an interval report
pub fn print_interval(episodes_seen: usize, counts: &OutcomeCounts) {
    println!(
        "  episodes {:>10}: X {:5.1}%  O {:5.1}%  draw {:5.1}%",
        format_number(episodes_seen),
        100.0 * counts.win_rate(Player::X),
        100.0 * counts.win_rate(Player::O),
        100.0 * counts.draw_rate(),
    );
}

/// Render a row as a 3x3 grid of values; masked cells show as `-`
pub fn format_row(row: &QRow) -> String {
    let cells: Vec<String> = (0..CELLS)
        .map(|cell| match row.get(cell) {
            Some(value) => format!("{value:+.4}"),
            None => "-".to_string(),
        })
        .collect();

    cells
        .chunks(3)
        .map(|line| {
            line.iter()
                .map(|cell| format!("{cell:>8}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
