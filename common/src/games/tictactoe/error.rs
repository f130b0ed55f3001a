use super::types::Mark;

/// Recoverable rejections; the board or session is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cell {index} is outside the board ({cell_count} cells)")]
    OutOfRange { index: usize, cell_count: usize },

    #[error("cell {0} is already occupied")]
    OccupiedCell(usize),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("not your turn: {0} is to move")]
    NotYourTurn(Mark),
}
