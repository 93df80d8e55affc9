//! Winning line analysis for Tic-Tac-Toe

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// The winning lines as occupancy bit masks (bit `i` = cell `i`)
pub const LINE_MASKS: [u16; 8] = line_masks();

const fn line_masks() -> [u16; 8] {
    let mut masks = [0u16; 8];
    let mut i = 0;
    while i < WINNING_LINES.len() {
        let [a, b, c] = WINNING_LINES[i];
        masks[i] = (1 << a) | (1 << b) | (1 << c);
        i += 1;
    }
    masks
}

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if an occupancy set fully contains any winning line
    pub fn has_won(bits: u16) -> bool {
        Self::completed_line(bits).is_some()
    }

    /// First winning line fully contained in the occupancy set
    pub fn completed_line(bits: u16) -> Option<[usize; 3]> {
        LINE_MASKS
            .iter()
            .position(|&mask| bits & mask == mask)
            .map(|idx| WINNING_LINES[idx])
    }
}
