use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const BOARD_SIZE: usize = 9;

/// The computer always plays the second mark.
pub const COMPUTER_MARK: Mark = Mark::O;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Mark> {
        match symbol {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            '.' | '_' | '-' => Some(Mark::Empty),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Nine cells in row-major order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Board([Mark; BOARD_SIZE]);

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: &[Mark]) -> Result<Self> {
        let cells: [Mark; BOARD_SIZE] = cells.try_into().map_err(|_| {
            EngineError::InvalidBoardShape(format!(
                "expected {} cells, got {}",
                BOARD_SIZE,
                cells.len()
            ))
        })?;
        Ok(Self(cells))
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE] {
        &self.0
    }

    /// Panics if `index` is not below `BOARD_SIZE`.
    pub fn cell(&self, index: usize) -> Mark {
        self.0[index]
    }

    /// Returns a copy of the board with `mark` written at `index`.
    /// Panics if `index` is not below `BOARD_SIZE`.
    pub fn with_mark(mut self, index: usize, mark: Mark) -> Self {
        self.0[index] = mark;
        self
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.0[index] = mark;
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.0.iter().filter(|&&cell| cell == mark).count()
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Accepts nine cell symbols; whitespace and `|` separators are skipped.
    fn from_str(s: &str) -> Result<Self> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .map(|c| {
                Mark::from_symbol(c).ok_or_else(|| {
                    EngineError::InvalidBoardShape(format!("unknown cell symbol '{}'", c))
                })
            })
            .collect::<Result<Vec<Mark>>>()?;
        Self::from_cells(&cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.0.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{}{}{}", cells[0], cells[1], cells[2])?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line([usize; 3]);

impl Line {
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.0[0], self.0[1], self.0[2])
    }
}

/// Rows, then columns, then diagonals. Order decides which line is reported
/// and which heuristic move is taken first.
pub const LINES: [Line; 8] = [
    Line([0, 1, 2]),
    Line([3, 4, 5]),
    Line([6, 7, 8]),
    Line([0, 3, 6]),
    Line([1, 4, 7]),
    Line([2, 5, 8]),
    Line([0, 4, 8]),
    Line([2, 4, 6]),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win { mark: Mark, line: Line },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opponent {
    Human,
    Computer(Difficulty),
}

impl Opponent {
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            Opponent::Human => None,
            Opponent::Computer(difficulty) => Some(*difficulty),
        }
    }
}
