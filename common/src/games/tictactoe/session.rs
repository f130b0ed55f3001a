use crate::games::SessionRng;
use crate::log;
use super::board::Board;
use super::bot_controller::calculate_move;
use super::error::GameError;
use super::settings::{GameConfig, SessionSettings};
use super::types::{Difficulty, GameMode, Mark, Outcome, WinningLine};
use super::win_detector::evaluate;

/// X always moves first; against the computer the human holds X.
pub const FIRST_MARK: Mark = Mark::X;
pub const AI_MARK: Mark = Mark::O;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    InProgress,
    Terminal,
}

/// What the front end needs to redraw after a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub size: usize,
    pub win_length: usize,
    pub cells: Vec<Mark>,
    pub turn: Mark,
    pub outcome: Outcome,
    pub winning_cells: Option<Vec<usize>>,
    pub last_move: Option<usize>,
}

#[derive(Debug)]
pub struct GameSession {
    settings: SessionSettings,
    board: Board,
    turn: Mark,
    phase: Phase,
    outcome: Outcome,
    winning_line: Option<WinningLine>,
    last_move: Option<usize>,
    rng: SessionRng,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, SessionRng::from_random())
    }

    /// Same as [`GameSession::new`] but with reproducible AI choices.
    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, SessionRng::new(seed))
    }

    pub fn with_rng(config: &GameConfig, rng: SessionRng) -> Result<Self, GameError> {
        let settings = config.resolve()?;
        let board = Board::new(settings.size, settings.win_length)?;

        log!(
            "New {}x{} game (win length {}), {:?}{}, seed {}",
            settings.size,
            settings.size,
            settings.win_length,
            settings.mode,
            settings
                .difficulty
                .map(|d| format!(" on {}", d))
                .unwrap_or_default(),
            rng.seed()
        );

        Ok(Self {
            settings,
            board,
            turn: FIRST_MARK,
            phase: Phase::InProgress,
            outcome: Outcome::InProgress,
            winning_line: None,
            last_move: None,
            rng,
        })
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn mode(&self) -> GameMode {
        self.settings.mode
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.settings.difficulty
    }

    pub fn winning_cells(&self) -> Option<&[usize]> {
        self.winning_line.as_ref().map(|line| line.cells.as_slice())
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.board.occupied_count()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.phase == Phase::InProgress
            && self.settings.mode == GameMode::HumanVsAi
            && self.turn == AI_MARK
    }

    pub fn player_name(&self, mark: Mark) -> &str {
        match mark {
            Mark::O => &self.settings.player_o_name,
            _ => &self.settings.player_x_name,
        }
    }

    pub fn current_player_name(&self) -> &str {
        self.player_name(self.turn)
    }

    pub fn status_message(&self) -> String {
        match (self.phase, self.outcome) {
            (Phase::Setup, _) => "Waiting for a new game".to_string(),
            (_, Outcome::Win(mark)) => format!("{} wins!", self.player_name(mark)),
            (_, Outcome::Draw) => "Draw!".to_string(),
            (_, Outcome::InProgress) => format!("Turn: {} ({})", self.current_player_name(), self.turn),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            size: self.board.size(),
            win_length: self.board.win_length(),
            cells: self.board.cells().to_vec(),
            turn: self.turn,
            outcome: self.outcome,
            winning_cells: self.winning_cells().map(<[usize]>::to_vec),
            last_move: self.last_move,
        }
    }

    pub fn apply_human_move(&mut self, index: usize) -> Result<GameSnapshot, GameError> {
        self.ensure_in_progress()?;
        if self.is_ai_turn() {
            return Err(GameError::NotYourTurn(self.turn));
        }
        self.place(index)
    }

    pub fn apply_ai_move(&mut self) -> Result<GameSnapshot, GameError> {
        self.ensure_in_progress()?;
        if !self.is_ai_turn() {
            return Err(GameError::NotYourTurn(self.turn));
        }
        let Some(difficulty) = self.settings.difficulty else {
            return Err(GameError::InvalidConfig(
                "computer opponent has no difficulty".to_string(),
            ));
        };

        let index = calculate_move(difficulty, &self.board, AI_MARK, &mut self.rng).ok_or_else(|| {
            GameError::IllegalMove("no empty cell left for the computer".to_string())
        })?;
        log!("Computer ({}) chose cell {}", difficulty, index);

        self.place(index)
    }

    /// Fresh board with the same configuration; valid from any phase.
    pub fn restart(&mut self) {
        self.board.clear();
        self.turn = FIRST_MARK;
        self.phase = Phase::InProgress;
        self.outcome = Outcome::InProgress;
        self.winning_line = None;
        self.last_move = None;
        log!("Game restarted");
    }

    /// Back to setup; moves are rejected until [`GameSession::start`] is called.
    pub fn reconfigure(&mut self) {
        self.phase = Phase::Setup;
        self.outcome = Outcome::InProgress;
        self.winning_line = None;
        self.last_move = None;
        self.board.clear();
    }

    pub fn start(&mut self, config: &GameConfig) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::IllegalMove(
                "a game is already running; reconfigure first".to_string(),
            ));
        }
        let settings = config.resolve()?;
        self.board = Board::new(settings.size, settings.win_length)?;
        self.settings = settings;
        self.restart();
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::InProgress => Ok(()),
            Phase::Setup => Err(GameError::IllegalMove("the game has not started".to_string())),
            Phase::Terminal => Err(GameError::IllegalMove("the game is already over".to_string())),
        }
    }

    fn place(&mut self, index: usize) -> Result<GameSnapshot, GameError> {
        self.board.set(index, self.turn).map_err(|err| match err {
            GameError::OccupiedCell(index) => {
                GameError::IllegalMove(format!("cell {} is already occupied", index))
            }
            other => other,
        })?;
        self.last_move = Some(index);

        let evaluation = evaluate(&self.board);
        self.outcome = evaluation.outcome;
        self.winning_line = evaluation.winning_line;

        match self.outcome {
            Outcome::InProgress => {
                self.turn = self.turn.opponent().unwrap_or(FIRST_MARK);
            }
            Outcome::Win(mark) => {
                self.phase = Phase::Terminal;
                log!("{} ({}) won after {} moves", self.player_name(mark), mark, self.move_count());
            }
            Outcome::Draw => {
                self.phase = Phase::Terminal;
                log!("Game drawn");
            }
        }

        Ok(self.snapshot())
    }
}
