//! Exhaustive game-tree search for the classic 3×3 board.
//!
//! The full tree is at most 9! leaves, so no pruning or depth limit is used.

use super::board::Board;
use super::types::{Mark, Outcome};
use super::win_detector::evaluate;

const WIN_SCORE: i32 = 10;

/// Optimal cell for `ai_mark`, or `None` when the board is not 3×3 classic,
/// is already decided, or `ai_mark` is empty.
pub fn best_move(board: &Board, ai_mark: Mark) -> Option<usize> {
    if !board.is_classic() || ai_mark.opponent().is_none() {
        return None;
    }
    if evaluate(board).outcome.is_terminal() {
        return None;
    }

    let mut scratch = board.clone();
    let mut best: Option<(usize, i32)> = None;

    for index in board.available_moves() {
        let mut trial = scratch.speculate(index, ai_mark);
        let score = score(&mut trial, 1, false, ai_mark);
        drop(trial);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

/// Minimax value of `board` from `ai_mark`'s point of view.
///
/// `depth` counts plies already played below the root; wins are worth
/// `10 - depth`, losses `depth - 10`, so quicker wins and slower losses rank higher.
pub fn score(board: &mut Board, depth: i32, maximizing: bool, ai_mark: Mark) -> i32 {
    match evaluate(board).outcome {
        Outcome::Win(mark) if mark == ai_mark => return WIN_SCORE - depth,
        Outcome::Win(_) => return depth - WIN_SCORE,
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    let Some(opponent) = ai_mark.opponent() else {
        return 0;
    };

    if maximizing {
        let mut max_eval = i32::MIN;
        for index in board.available_moves() {
            let mut trial = board.speculate(index, ai_mark);
            max_eval = max_eval.max(score(&mut trial, depth + 1, false, ai_mark));
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for index in board.available_moves() {
            let mut trial = board.speculate(index, opponent);
            min_eval = min_eval.min(score(&mut trial, depth + 1, true, ai_mark));
        }
        min_eval
    }
}
