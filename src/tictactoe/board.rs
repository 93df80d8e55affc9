//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Number of cells on the board
pub const CELLS: usize = 9;

/// Bit mask with all nine cells set
pub(crate) const FULL_MASK: u16 = (1 << CELLS) - 1;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
///
/// `X` always opens and is the maximizing side of the shared value table;
/// `O` minimizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Whether this player picks the largest value of a row
    pub fn is_maximizer(self) -> bool {
        self == Player::X
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Canonical identity of a board.
///
/// The key packs the two occupancy sets into one 18-bit integer: X's cells
/// in the high nine bits, O's cells in the low nine bits, with bit `i`
/// standing for cell `i`. Two boards share a key iff they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardKey(u32);

impl BoardKey {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#07x}", self.0)
    }
}

/// Occupancy of the 3x3 board as two disjoint bit-sets, one per player.
///
/// Cells are numbered 0-8 in row-major order:
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
/// A cell is empty iff it is in neither set. Whose turn it is lives in the
/// game engine; [`BoardState::to_move`] derives it from occupancy parity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    x: u16,
    o: u16,
}

impl BoardState {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from raw occupancy sets.
    ///
    /// # Errors
    ///
    /// Returns an error if a set has bits outside cells 0-8 or the sets overlap.
    pub fn from_bits(x: u16, o: u16) -> Result<Self, crate::Error> {
        if (x | o) & !FULL_MASK != 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("occupancy bits {x:#b}/{o:#b} exceed the 3x3 board"),
            });
        }
        if x & o != 0 {
            let position = (x & o).trailing_zeros() as usize;
            return Err(crate::Error::InvalidConfiguration {
                message: format!("cell {position} is owned by both players"),
            });
        }
        Ok(Self { x, o })
    }

    /// Rebuild a board from its canonical key
    pub fn from_key(key: BoardKey) -> Result<Self, crate::Error> {
        let raw = key.value();
        if raw >> (2 * CELLS) != 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("board key {key} has more than 18 bits"),
            });
        }
        Self::from_bits((raw >> CELLS) as u16, raw as u16 & FULL_MASK)
    }

    /// Occupancy set of one player
    pub fn bits(&self, player: Player) -> u16 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Bit mask of every occupied cell
    pub fn occupied_mask(&self) -> u16 {
        self.x | self.o
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        let bit = 1 << pos;
        if self.x & bit != 0 {
            Cell::X
        } else if self.o & bit != 0 {
            Cell::O
        } else {
            Cell::Empty
        }
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        pos < CELLS && self.occupied_mask() & (1 << pos) == 0
    }

    /// Get all empty positions in ascending order
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELLS).filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.occupied_mask().count_ones() as usize
    }

    pub fn is_full(&self) -> bool {
        self.occupied_mask() == FULL_MASK
    }

    /// Place `player`'s marker on `pos`.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` if `pos` is outside 0-8, `InvalidMove` if the cell is
    /// already taken by either player. The board is unchanged on error.
    pub fn apply(&mut self, player: Player, pos: usize) -> Result<(), crate::Error> {
        if pos >= CELLS {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        match player {
            Player::X => self.x |= 1 << pos,
            Player::O => self.o |= 1 << pos,
        }
        Ok(())
    }

    /// Make a move and return a new board state
    #[must_use = "with_move returns a new board state; the original is unchanged"]
    pub fn with_move(&self, player: Player, pos: usize) -> Result<BoardState, crate::Error> {
        let mut next = *self;
        next.apply(player, pos)?;
        Ok(next)
    }

    /// Canonical identity used to index the Q-table
    pub fn key(&self) -> BoardKey {
        BoardKey((u32::from(self.x) << CELLS) | u32::from(self.o))
    }

    /// Player to move, derived from occupancy parity (X opens)
    pub fn to_move(&self) -> Player {
        if self.x.count_ones() > self.o.count_ones() {
            Player::O
        } else {
            Player::X
        }
    }

    /// Check if a player has completed a line
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(self.bits(player))
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Nine-character row-major literal, e.g. `"XO..X...O"`
    pub fn to_literal(&self) -> String {
        (0..CELLS).map(|pos| self.get(pos).to_char()).collect()
    }
}

impl FromStr for BoardState {
    type Err = crate::Error;

    /// Parse a row-major board literal.
    ///
    /// Whitespace is ignored. The remaining text must hold exactly nine
    /// symbols from `X`/`x`, `O`/`o` and `.`/`-` (empty).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != CELLS {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut board = BoardState::new();
        for (pos, &c) in chars.iter().enumerate() {
            let cell = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: pos,
                context: s.to_string(),
            })?;
            match cell {
                Cell::X => board.x |= 1 << pos,
                Cell::O => board.o |= 1 << pos,
                Cell::Empty => {}
            }
        }
        Ok(board)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "---------")?;
            }
            let cells: Vec<String> = (0..3)
                .map(|col| self.get(row * 3 + col).to_char().to_string())
                .collect();
            write!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}
