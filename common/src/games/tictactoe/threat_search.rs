//! Depth-limited alpha-beta search for boards too large for exhaustive minimax.
//!
//! Candidate moves are restricted to empty cells touching an existing mark, and
//! leaves are scored by counting open windows of `win_length` cells.

use super::board::Board;
use super::types::Mark;
use super::win_detector::check_win_at;

const WIN_SCORE: i32 = 100_000_000;
const NEAR_WIN_THREAT: i32 = 1 << 12;
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

pub fn search_move(board: &Board, ai_mark: Mark) -> Option<usize> {
    let opponent = ai_mark.opponent()?;
    let candidates = candidate_moves(board);
    if candidates.is_empty() {
        return None;
    }

    let depth_limit = calculate_depth_limit(candidates.len());
    let mut scratch = board.clone();
    let mut best_move = None;
    let mut best_score = i32::MIN;
    let mut alpha = i32::MIN;

    for index in candidates {
        let mut trial = scratch.speculate(index, ai_mark);
        let score = alpha_beta(
            &mut trial,
            index,
            1,
            depth_limit,
            false,
            ai_mark,
            opponent,
            alpha,
            i32::MAX,
        );
        drop(trial);

        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
        alpha = alpha.max(score);
    }

    best_move
}

fn calculate_depth_limit(candidate_count: usize) -> usize {
    match candidate_count {
        0..=8 => 4,
        9..=24 => 3,
        _ => 2,
    }
}

/// Empty cells in the 8-neighbourhood of any mark; the centre on an empty board.
fn candidate_moves(board: &Board) -> Vec<usize> {
    let size = board.size();
    if board.occupied_count() == 0 {
        return vec![(size / 2) * size + size / 2];
    }

    let mut candidates = Vec::new();
    for index in board.available_moves() {
        let row = (index / size) as isize;
        let col = (index % size) as isize;
        let touches_mark = (-1..=1).any(|d_row: isize| {
            (-1..=1).any(|d_col: isize| {
                let r = row + d_row;
                let c = col + d_col;
                r >= 0
                    && c >= 0
                    && (r as usize) < size
                    && (c as usize) < size
                    && board.at(r as usize, c as usize) != Mark::Empty
            })
        });
        if touches_mark {
            candidates.push(index);
        }
    }
    candidates
}

fn alpha_beta(
    board: &mut Board,
    last_move: usize,
    depth: usize,
    max_depth: usize,
    is_maximizing: bool,
    ai_mark: Mark,
    opponent: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if let Some(winner) = check_win_at(board, last_move) {
        return if winner == ai_mark {
            WIN_SCORE - depth as i32
        } else {
            depth as i32 - WIN_SCORE
        };
    }

    if depth >= max_depth || board.is_full() {
        return evaluate_position(board, ai_mark, opponent);
    }

    let candidates = candidate_moves(board);

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in candidates {
            let mut trial = board.speculate(index, ai_mark);
            let eval = alpha_beta(
                &mut trial, index, depth + 1, max_depth, false, ai_mark, opponent, alpha, beta,
            );
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in candidates {
            let mut trial = board.speculate(index, opponent);
            let eval = alpha_beta(
                &mut trial, index, depth + 1, max_depth, true, ai_mark, opponent, alpha, beta,
            );
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}

fn evaluate_position(board: &Board, ai_mark: Mark, opponent: Mark) -> i32 {
    count_threats(board, ai_mark) - count_threats(board, opponent)
}

fn count_threats(board: &Board, mark: Mark) -> i32 {
    let size = board.size();
    let mut score = 0;
    for row in 0..size {
        for col in 0..size {
            for (d_row, d_col) in DIRECTIONS {
                score += window_threat(board, row, col, d_row, d_col, mark);
            }
        }
    }
    score
}

/// Value of the `win_length` window starting at (`row`, `col`) for `mark`:
/// zero if blocked by the other side, growing fast with the number of marks.
fn window_threat(board: &Board, row: usize, col: usize, d_row: isize, d_col: isize, mark: Mark) -> i32 {
    let size = board.size() as isize;
    let win_length = board.win_length();
    let last = win_length as isize - 1;
    let end_row = row as isize + d_row * last;
    let end_col = col as isize + d_col * last;
    if end_row < 0 || end_col < 0 || end_row >= size || end_col >= size {
        return 0;
    }

    let mut count = 0;
    for i in 0..=last {
        let cell = board.at(
            (row as isize + d_row * i) as usize,
            (col as isize + d_col * i) as usize,
        );
        if cell == mark {
            count += 1;
        } else if cell != Mark::Empty {
            return 0;
        }
    }

    match count {
        0 => 0,
        c if c + 1 == win_length => NEAR_WIN_THREAT,
        c => 1 << (2 * c.min(5)),
    }
}
