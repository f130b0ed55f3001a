use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
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
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Mark),
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(*mark),
            _ => None,
        }
    }
}

/// Row/column coordinates of a cell; rows grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn from_index(index: usize, size: usize) -> Self {
        Self::new(index / size, index % size)
    }

    /// `None` when the position lies outside a `size`×`size` board.
    pub fn to_index(&self, size: usize) -> Option<usize> {
        if self.row >= size || self.col >= size {
            return None;
        }
        Some(self.row * size + self.col)
    }
}

/// The run of cells that decided a game, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: Vec<usize>,
}

impl WinningLine {
    pub fn new(mark: Mark, cells: Vec<usize>) -> Self {
        Self { mark, cells }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    HumanVsHuman,
    HumanVsAi,
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pvp" | "human" | "human_vs_human" => Ok(GameMode::HumanVsHuman),
            "pvc" | "ai" | "computer" | "human_vs_ai" => Ok(GameMode::HumanVsAi),
            other => Err(format!("Unknown game mode '{}', expected pvp or pvc", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
    ];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::VeryHard => "very-hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace('_', "-").as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "very-hard" | "veryhard" => Ok(Difficulty::VeryHard),
            other => Err(format!(
                "Unknown difficulty '{}', expected easy, medium, hard or very-hard",
                other
            )),
        }
    }
}
