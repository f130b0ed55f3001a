use super::board::Board;
use super::types::{Mark, Outcome, WinningLine};

/// Row/column steps, in scan order: horizontal, vertical, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,
    pub winning_line: Option<WinningLine>,
}

impl Evaluation {
    pub fn winning_cells(&self) -> Option<&[usize]> {
        self.winning_line.as_ref().map(|line| line.cells.as_slice())
    }
}

pub fn evaluate(board: &Board) -> Evaluation {
    if let Some(line) = check_win_with_line(board) {
        return Evaluation {
            outcome: Outcome::Win(line.mark),
            winning_line: Some(line),
        };
    }

    let outcome = if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    };
    Evaluation {
        outcome,
        winning_line: None,
    }
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

/// First complete run found, sweeping each direction over all start cells row by row.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let size = board.size();
    for (d_row, d_col) in DIRECTIONS {
        for row in 0..size {
            for col in 0..size {
                if let Some(line) = run_from(board, row, col, d_row, d_col) {
                    return Some(line);
                }
            }
        }
    }
    None
}

fn run_from(board: &Board, row: usize, col: usize, d_row: isize, d_col: isize) -> Option<WinningLine> {
    let size = board.size() as isize;
    let last = board.win_length() as isize - 1;
    let end_row = row as isize + d_row * last;
    let end_col = col as isize + d_col * last;
    if end_row < 0 || end_col < 0 || end_row >= size || end_col >= size {
        return None;
    }

    let mark = board.at(row, col);
    if mark == Mark::Empty {
        return None;
    }

    let mut cells = Vec::with_capacity(board.win_length());
    for i in 0..=last {
        let r = (row as isize + d_row * i) as usize;
        let c = (col as isize + d_col * i) as usize;
        if board.at(r, c) != mark {
            return None;
        }
        cells.push(r * board.size() + c);
    }
    Some(WinningLine::new(mark, cells))
}

/// Whether the mark on `index` is part of a complete run. Only runs through
/// that cell are inspected, so this is the cheap check after a single move.
pub fn check_win_at(board: &Board, index: usize) -> Option<Mark> {
    let mark = board.get(index)?;
    if mark == Mark::Empty {
        return None;
    }

    let size = board.size() as isize;
    let row = (index / board.size()) as isize;
    let col = (index % board.size()) as isize;
    let win_length = board.win_length();

    for (d_row, d_col) in DIRECTIONS {
        let mut count = 1;
        for sign in [1isize, -1] {
            let mut step = 1isize;
            while count < win_length {
                let r = row + sign * d_row * step;
                let c = col + sign * d_col * step;
                if r < 0 || c < 0 || r >= size || c >= size {
                    break;
                }
                if board.at(r as usize, c as usize) != mark {
                    break;
                }
                count += 1;
                step += 1;
            }
        }
        if count >= win_length {
            return Some(mark);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use Mark::{Empty as E, O, X};

    fn board(size: usize, win_length: usize, cells: &[Mark]) -> Board {
        Board::from_cells(size, win_length, cells.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_board_in_progress() {
        let evaluation = evaluate(&Board::new(3, 3).unwrap());
        assert_eq!(evaluation.outcome, Outcome::InProgress);
        assert_eq!(evaluation.winning_cells(), None);
    }

    #[test]
    fn test_row_win_reports_cells() {
        let b = board(3, 3, &[E, E, E, O, O, O, X, X, E]);
        let evaluation = evaluate(&b);
        assert_eq!(evaluation.outcome, Outcome::Win(O));
        assert_eq!(evaluation.winning_cells(), Some(&[3, 4, 5][..]));
    }

    #[test]
    fn test_column_win() {
        let b = board(3, 3, &[X, O, E, X, O, E, X, E, E]);
        assert_eq!(check_win_with_line(&b), Some(WinningLine::new(X, vec![0, 3, 6])));
    }

    #[test]
    fn test_classic_draw() {
        let b = board(3, 3, &[X, O, X, O, X, O, O, X, O]);
        let evaluation = evaluate(&b);
        assert_eq!(evaluation.outcome, Outcome::Draw);
        assert_eq!(evaluation.winning_line, None);
    }

    #[test]
    fn test_full_board_with_win_is_not_draw() {
        let b = board(3, 3, &[X, X, X, O, O, X, X, O, O]);
        assert_eq!(evaluate(&b).outcome, Outcome::Win(X));
    }

    #[test]
    fn test_both_diagonals_on_5x5() {
        let mut down_right = Board::new(5, 5).unwrap();
        for i in 0..5 {
            down_right.set(i * 6, X).unwrap();
        }
        let evaluation = evaluate(&down_right);
        assert_eq!(evaluation.outcome, Outcome::Win(X));
        assert_eq!(evaluation.winning_cells(), Some(&[0, 6, 12, 18, 24][..]));

        let mut down_left = Board::new(5, 5).unwrap();
        for i in 0..5 {
            down_left.set(4 + i * 4, O).unwrap();
        }
        let evaluation = evaluate(&down_left);
        assert_eq!(evaluation.outcome, Outcome::Win(O));
        assert_eq!(evaluation.winning_cells(), Some(&[4, 8, 12, 16, 20][..]));
    }

    #[test]
    fn test_broken_diagonal_is_rejected() {
        let mut b = Board::new(5, 5).unwrap();
        for i in [0, 6, 18, 24] {
            b.set(i, X).unwrap();
        }
        b.set(12, O).unwrap();
        assert_eq!(evaluate(&b).outcome, Outcome::InProgress);
        assert_eq!(check_win_at(&b, 18), None);
    }

    #[test]
    fn test_run_shorter_than_win_length() {
        let mut b = Board::new(6, 4).unwrap();
        for i in [0, 1, 2] {
            b.set(i, X).unwrap();
        }
        assert_eq!(check_win(&b), None);
        b.set(3, X).unwrap();
        assert_eq!(check_win(&b), Some(X));
        assert_eq!(check_win_at(&b, 1), Some(X));
    }

    #[test]
    fn test_horizontal_scanned_before_vertical() {
        // X completes row 0 and column 0 at once.
        let b = board(3, 3, &[X, X, X, X, O, O, X, O, O]);
        assert_eq!(check_win_with_line(&b).unwrap().cells, vec![0, 1, 2]);
    }

    #[test]
    fn test_never_win_and_draw_together() {
        let positions = [
            [X, O, X, O, X, O, O, X, O],
            [X, X, X, O, O, X, X, O, O],
            [O, X, X, X, O, O, X, X, O],
            [E, E, E, E, E, E, E, E, E],
        ];
        for cells in positions {
            let evaluation = evaluate(&board(3, 3, &cells));
            match evaluation.outcome {
                Outcome::Win(_) => assert!(evaluation.winning_line.is_some()),
                Outcome::Draw | Outcome::InProgress => assert!(evaluation.winning_line.is_none()),
            }
        }
    }

    #[test]
    fn test_check_win_at_agrees_with_full_scan() {
        let b = board(3, 3, &[O, X, E, X, O, E, E, E, O]);
        assert_eq!(check_win_at(&b, 8), Some(O));
        assert_eq!(check_win_at(&b, 1), None);
        assert_eq!(check_win_at(&b, 2), None);
        assert_eq!(check_win(&b), Some(O));
    }
}
