use std::fmt;
use std::ops::{Deref, DerefMut};

use super::error::GameError;
use super::types::{Mark, Position};

pub const MIN_BOARD_SIZE: usize = 3;
pub const MIN_WIN_LENGTH: usize = 3;
pub const CLASSIC_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 20;

/// Square grid stored row-major; index `row * size + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: Vec<Mark>,
}

pub fn validate_geometry(size: usize, win_length: usize) -> Result<(), GameError> {
    if size < MIN_BOARD_SIZE {
        return Err(GameError::InvalidConfig(format!(
            "board size must be at least {}, got {}",
            MIN_BOARD_SIZE, size
        )));
    }
    if size > MAX_BOARD_SIZE {
        return Err(GameError::InvalidConfig(format!(
            "board size must not exceed {}, got {}",
            MAX_BOARD_SIZE, size
        )));
    }
    if win_length < MIN_WIN_LENGTH {
        return Err(GameError::InvalidConfig(format!(
            "win length must be at least {}, got {}",
            MIN_WIN_LENGTH, win_length
        )));
    }
    if win_length > size {
        return Err(GameError::InvalidConfig(format!(
            "win length ({}) cannot exceed board size ({})",
            win_length, size
        )));
    }
    Ok(())
}

impl Board {
    pub fn new(size: usize, win_length: usize) -> Result<Self, GameError> {
        validate_geometry(size, win_length)?;
        Ok(Self {
            size,
            win_length,
            cells: vec![Mark::Empty; size * size],
        })
    }

    /// Builds a board from an existing position, e.g. one captured from a snapshot.
    pub fn from_cells(size: usize, win_length: usize, cells: Vec<Mark>) -> Result<Self, GameError> {
        validate_geometry(size, win_length)?;
        if cells.len() != size * size {
            return Err(GameError::InvalidConfig(format!(
                "expected {} cells for a {}x{} board, got {}",
                size * size,
                size,
                size,
                cells.len()
            )));
        }
        Ok(Self {
            size,
            win_length,
            cells,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub(crate) fn at(&self, row: usize, col: usize) -> Mark {
        self.cells[row * self.size + col]
    }

    pub fn is_empty(&self, index: usize) -> Result<bool, GameError> {
        self.get(index)
            .map(|mark| mark == Mark::Empty)
            .ok_or(GameError::OutOfRange {
                index,
                cell_count: self.cells.len(),
            })
    }

    pub fn set(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        if mark == Mark::Empty {
            return Err(GameError::IllegalMove(
                "cannot place an empty mark".to_string(),
            ));
        }
        if !self.is_empty(index)? {
            return Err(GameError::OccupiedCell(index));
        }
        self.cells[index] = mark;
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Mark::Empty).count()
    }

    /// The 3×3, three-in-a-row configuration the positional heuristics are defined for.
    pub fn is_classic(&self) -> bool {
        self.size == CLASSIC_SIZE && self.win_length == CLASSIC_SIZE
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::from_index(index, self.size)
    }

    pub fn index_of(&self, position: Position) -> Option<usize> {
        position.to_index(self.size)
    }

    pub fn available_moves(&self) -> Vec<usize> {
        get_available_moves(self)
    }

    pub fn clear(&mut self) {
        self.cells.fill(Mark::Empty);
    }

    /// Places `mark` on an empty cell until the returned guard is dropped.
    pub(crate) fn speculate(&mut self, index: usize, mark: Mark) -> Speculation<'_> {
        debug_assert_eq!(self.cells[index], Mark::Empty);
        self.cells[index] = mark;
        Speculation { board: self, index }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(self.size).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = chunk.iter().map(|mark| mark.symbol().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// A hypothetical move. The cell is restored to empty on drop, whichever way
/// the caller leaves its scope.
pub(crate) struct Speculation<'a> {
    board: &'a mut Board,
    index: usize,
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Speculation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = Mark::Empty;
    }
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == Mark::Empty)
        .map(|(index, _)| index)
        .collect()
}
