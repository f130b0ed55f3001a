use crate::games::SessionRng;
use super::board::Board;
use super::minimax;
use super::threat_search;
use super::types::{Difficulty, Mark};
use super::win_detector::check_win_at;

const CENTRE: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// A move-selection policy for one difficulty tier.
pub trait MoveSelector {
    fn difficulty(&self) -> Difficulty;

    /// A legal cell for `ai_mark`, or `None` if the board has no empty cell.
    fn select_move(&self, board: &Board, ai_mark: Mark, rng: &mut SessionRng) -> Option<usize>;
}

pub struct RandomSelector;
pub struct MediumSelector;
pub struct HardSelector;
pub struct VeryHardSelector;

pub fn selector_for(difficulty: Difficulty) -> &'static dyn MoveSelector {
    match difficulty {
        Difficulty::Easy => &RandomSelector,
        Difficulty::Medium => &MediumSelector,
        Difficulty::Hard => &HardSelector,
        Difficulty::VeryHard => &VeryHardSelector,
    }
}

pub fn calculate_move(
    difficulty: Difficulty,
    board: &Board,
    ai_mark: Mark,
    rng: &mut SessionRng,
) -> Option<usize> {
    selector_for(difficulty).select_move(board, ai_mark, rng)
}

impl MoveSelector for RandomSelector {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn select_move(&self, board: &Board, _ai_mark: Mark, rng: &mut SessionRng) -> Option<usize> {
        rng.choose(&board.available_moves())
    }
}

impl MoveSelector for MediumSelector {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn select_move(&self, board: &Board, ai_mark: Mark, rng: &mut SessionRng) -> Option<usize> {
        let available_moves = board.available_moves();
        find_tactical_move(board, ai_mark, &available_moves)
            .or_else(|| rng.choose(&available_moves))
    }
}

impl MoveSelector for HardSelector {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    fn select_move(&self, board: &Board, ai_mark: Mark, rng: &mut SessionRng) -> Option<usize> {
        let available_moves = board.available_moves();
        if let Some(index) = find_tactical_move(board, ai_mark, &available_moves) {
            return Some(index);
        }

        if board.is_classic() {
            if available_moves.contains(&CENTRE) {
                return Some(CENTRE);
            }
            let open_corners: Vec<usize> = CORNERS
                .into_iter()
                .filter(|corner| available_moves.contains(corner))
                .collect();
            if let Some(corner) = rng.choose(&open_corners) {
                return Some(corner);
            }
        }

        rng.choose(&available_moves)
    }
}

impl MoveSelector for VeryHardSelector {
    fn difficulty(&self) -> Difficulty {
        Difficulty::VeryHard
    }

    fn select_move(&self, board: &Board, ai_mark: Mark, rng: &mut SessionRng) -> Option<usize> {
        if board.is_classic() {
            return minimax::best_move(board, ai_mark).or_else(|| rng.choose(&board.available_moves()));
        }

        let available_moves = board.available_moves();
        find_tactical_move(board, ai_mark, &available_moves)
            .or_else(|| threat_search::search_move(board, ai_mark))
            .or_else(|| rng.choose(&available_moves))
    }
}

/// Win-in-one for `ai_mark`, else the cell that stops the opponent's win-in-one.
fn find_tactical_move(board: &Board, ai_mark: Mark, moves: &[usize]) -> Option<usize> {
    let opponent_mark = ai_mark.opponent()?;
    let mut scratch = board.clone();

    find_winning_move(&mut scratch, ai_mark, moves)
        .or_else(|| find_winning_move(&mut scratch, opponent_mark, moves))
}

/// First cell, in the given order, where `mark` completes a run.
fn find_winning_move(board: &mut Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    moves.iter().copied().find(|&index| {
        let trial = board.speculate(index, mark);
        check_win_at(&trial, index) == Some(mark)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::win_detector::evaluate;
    use crate::games::tictactoe::Outcome;
    use Mark::{Empty as E, O, X};

    fn board(cells: &[Mark]) -> Board {
        Board::from_cells(3, 3, cells.to_vec()).unwrap()
    }

    #[test]
    fn test_selector_for_matches_difficulty() {
        for difficulty in Difficulty::ALL {
            assert_eq!(selector_for(difficulty).difficulty(), difficulty);
        }
    }

    #[test]
    fn test_easy_returns_only_available_moves() {
        let b = board(&[X, O, X, O, E, O, X, E, X]);
        let mut rng = SessionRng::new(7);
        for _ in 0..30 {
            let index = calculate_move(Difficulty::Easy, &b, O, &mut rng).unwrap();
            assert!(index == 4 || index == 7);
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let b = board(&[X, O, X, O, X, O, O, X, O]);
        let mut rng = SessionRng::new(1);
        for difficulty in Difficulty::ALL {
            assert_eq!(calculate_move(difficulty, &b, O, &mut rng), None);
        }
    }

    #[test]
    fn test_medium_and_hard_take_the_win() {
        let b = board(&[X, X, E, O, O, E, E, E, E]);
        let mut rng = SessionRng::new(3);
        for difficulty in [Difficulty::Medium, Difficulty::Hard, Difficulty::VeryHard] {
            assert_eq!(calculate_move(difficulty, &b, O, &mut rng), Some(5));
        }
    }

    #[test]
    fn test_medium_and_hard_block() {
        let b = board(&[X, X, E, O, E, E, E, E, E]);
        let mut rng = SessionRng::new(3);
        for difficulty in [Difficulty::Medium, Difficulty::Hard, Difficulty::VeryHard] {
            assert_eq!(calculate_move(difficulty, &b, O, &mut rng), Some(2));
        }
    }

    #[test]
    fn test_win_is_preferred_over_block() {
        // Both sides threaten; O wins on 8 rather than blocking X on 2.
        let b = board(&[X, X, E, X, E, E, O, O, E]);
        let mut rng = SessionRng::new(3);
        assert_eq!(calculate_move(Difficulty::Medium, &b, O, &mut rng), Some(8));
    }

    #[test]
    fn test_hard_prefers_centre_then_corner() {
        let mut rng = SessionRng::new(11);
        let empty = Board::new(3, 3).unwrap();
        assert_eq!(calculate_move(Difficulty::Hard, &empty, O, &mut rng), Some(CENTRE));

        let centre_taken = board(&[E, E, E, E, X, E, E, E, E]);
        for _ in 0..20 {
            let index = calculate_move(Difficulty::Hard, &centre_taken, O, &mut rng).unwrap();
            assert!(CORNERS.contains(&index));
        }
    }

    #[test]
    fn test_block_follows_index_order() {
        // X threatens 3 (column 0) and 7 (bottom row); the lower index is blocked.
        let b = board(&[X, E, O, E, O, E, X, E, X]);
        let mut rng = SessionRng::new(5);
        assert_eq!(calculate_move(Difficulty::Hard, &b, O, &mut rng), Some(3));
    }

    #[test]
    fn test_hard_random_fallback_on_large_board() {
        let mut b = Board::new(4, 3).unwrap();
        b.set(5, X).unwrap();
        let mut rng = SessionRng::new(8);
        let index = calculate_move(Difficulty::Hard, &b, O, &mut rng).unwrap();
        assert_ne!(index, 5);
        assert!(index < 16);
    }

    #[test]
    fn test_hard_on_large_board_uses_win_and_block() {
        let mut b = Board::new(6, 4).unwrap();
        for index in [0, 1, 2] {
            b.set(index, X).unwrap();
        }
        b.set(10, O).unwrap();
        let mut rng = SessionRng::new(9);
        assert_eq!(calculate_move(Difficulty::Hard, &b, O, &mut rng), Some(3));
    }

    #[test]
    fn test_tactical_search_does_not_modify_board() {
        let b = board(&[X, X, E, O, E, E, E, E, E]);
        let before = b.clone();
        let mut rng = SessionRng::new(2);
        calculate_move(Difficulty::Medium, &b, O, &mut rng);
        assert_eq!(b, before);
    }

    fn play_out(mut b: Board, x_difficulty: Difficulty, o_difficulty: Difficulty, rng: &mut SessionRng) -> Outcome {
        let mut mark = if b.occupied_count() % 2 == 0 { X } else { O };
        loop {
            let outcome = evaluate(&b).outcome;
            if outcome.is_terminal() {
                return outcome;
            }
            let difficulty = if mark == X { x_difficulty } else { o_difficulty };
            let index = calculate_move(difficulty, &b, mark, rng).unwrap();
            b.set(index, mark).unwrap();
            mark = mark.opponent().unwrap();
        }
    }

    #[test]
    fn test_very_hard_self_play_is_a_draw() {
        let mut rng = SessionRng::new(0);
        let outcome = play_out(Board::new(3, 3).unwrap(), Difficulty::VeryHard, Difficulty::VeryHard, &mut rng);
        assert_eq!(outcome, Outcome::Draw);
    }

    #[test]
    fn test_very_hard_never_loses_after_any_opening() {
        let mut rng = SessionRng::new(21);
        for opening in 0..9 {
            let mut b = Board::new(3, 3).unwrap();
            b.set(opening, X).unwrap();
            let outcome = play_out(b, Difficulty::VeryHard, Difficulty::VeryHard, &mut rng);
            assert_ne!(outcome, Outcome::Win(X), "lost after opening {}", opening);
        }
    }

    #[test]
    fn test_very_hard_never_loses_to_random_play() {
        let mut rng = SessionRng::new(1234);
        for _ in 0..10 {
            let outcome = play_out(Board::new(3, 3).unwrap(), Difficulty::Easy, Difficulty::VeryHard, &mut rng);
            assert_ne!(outcome, Outcome::Win(X));
        }
    }

    #[test]
    fn test_very_hard_on_large_board_blocks() {
        let mut b = Board::new(6, 4).unwrap();
        for index in [7, 8, 9] {
            b.set(index, X).unwrap();
        }
        for index in [14, 20] {
            b.set(index, O).unwrap();
        }
        let mut rng = SessionRng::new(4);
        let index = calculate_move(Difficulty::VeryHard, &b, O, &mut rng).unwrap();
        assert!(index == 6 || index == 10, "unexpected move {}", index);
    }
}
