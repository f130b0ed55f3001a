use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::board::validate_geometry;
use super::error::GameError;
use super::types::{Difficulty, GameMode};

pub const DEFAULT_PLAYER_X_NAME: &str = "Player X";
pub const DEFAULT_PLAYER_O_NAME: &str = "Player O";
pub const DEFAULT_COMPUTER_NAME: &str = "Computer";

/// What the front end collects before a game starts. Optional fields fall
/// back to defaults when the config is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: usize,
    pub win_length: Option<usize>,
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub player_x_name: Option<String>,
    pub player_o_name: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 3,
            win_length: None,
            mode: GameMode::HumanVsHuman,
            difficulty: None,
            player_x_name: None,
            player_o_name: None,
        }
    }
}

impl GameConfig {
    pub fn human_vs_human(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn human_vs_ai(size: usize, difficulty: Difficulty) -> Self {
        Self {
            size,
            mode: GameMode::HumanVsAi,
            difficulty: Some(difficulty),
            ..Self::default()
        }
    }

    pub fn with_win_length(mut self, win_length: usize) -> Self {
        self.win_length = Some(win_length);
        self
    }

    pub fn with_names(mut self, player_x: impl Into<String>, player_o: impl Into<String>) -> Self {
        self.player_x_name = Some(player_x.into());
        self.player_o_name = Some(player_o.into());
        self
    }

    pub fn resolve(&self) -> Result<SessionSettings, GameError> {
        let win_length = self
            .win_length
            .unwrap_or_else(|| default_win_length(self.size));
        validate_geometry(self.size, win_length)?;

        let difficulty = match (self.mode, self.difficulty) {
            (GameMode::HumanVsAi, None) => {
                return Err(GameError::InvalidConfig(
                    "a difficulty is required when playing against the computer".to_string(),
                ));
            }
            (GameMode::HumanVsAi, Some(difficulty)) => Some(difficulty),
            (GameMode::HumanVsHuman, _) => None,
        };

        let default_o_name = match self.mode {
            GameMode::HumanVsAi => DEFAULT_COMPUTER_NAME,
            GameMode::HumanVsHuman => DEFAULT_PLAYER_O_NAME,
        };

        Ok(SessionSettings {
            size: self.size,
            win_length,
            mode: self.mode,
            difficulty,
            player_x_name: non_blank_or(&self.player_x_name, DEFAULT_PLAYER_X_NAME),
            player_o_name: non_blank_or(&self.player_o_name, default_o_name),
        })
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        self.resolve().map(|_| ()).map_err(|e| e.to_string())
    }
}

/// 3×3 plays three in a row, 6×6 four, everything else five (or the whole
/// side on boards smaller than that).
pub fn default_win_length(size: usize) -> usize {
    match size {
        3 => 3,
        6 => 4,
        _ => size.min(5),
    }
}

fn non_blank_or(name: &Option<String>, fallback: &str) -> String {
    match name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback.to_string(),
    }
}

/// A validated [`GameConfig`]; everything a session needs to (re)start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub size: usize,
    pub win_length: usize,
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub player_x_name: String,
    pub player_o_name: String,
}
