mod board;
mod bot_controller;
mod error;
mod minimax;
mod session;
mod settings;
mod threat_search;
mod types;
mod win_detector;

pub use board::{Board, CLASSIC_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, MIN_WIN_LENGTH, get_available_moves, validate_geometry};
pub use bot_controller::{
    HardSelector, MediumSelector, MoveSelector, RandomSelector, VeryHardSelector, calculate_move,
    selector_for,
};
pub use error::GameError;
pub use minimax::best_move;
pub use session::{AI_MARK, FIRST_MARK, GameSession, GameSnapshot, Phase};
pub use settings::{GameConfig, SessionSettings, default_win_length};
pub use threat_search::search_move;
pub use types::{Difficulty, GameMode, Mark, Outcome, Position, WinningLine};
pub use win_detector::{Evaluation, check_win, check_win_at, check_win_with_line, evaluate};
