use std::path::PathBuf;
use nrow_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use nrow_common::games::tictactoe::GameConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "nrow_config.yaml";
pub const DEFAULT_AI_DELAY_MS: u64 = 500;
pub const MAX_AI_DELAY_MS: u64 = 10_000;

fn get_default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or_else(get_default_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub game: GameConfig,
    /// Pause before the computer answers, so the turn change is visible.
    pub ai_delay_ms: u64,
    pub log: bool,
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.ai_delay_ms > MAX_AI_DELAY_MS {
            return Err(format!(
                "ai_delay_ms must not exceed {}, got {}",
                MAX_AI_DELAY_MS, self.ai_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
            log: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nrow_common::games::tictactoe::{Difficulty, GameMode};

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_nrow_client_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(ClientConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_missing_file_gives_default() {
        let manager = get_config_manager(Some(get_temp_file_path()));
        assert_eq!(manager.get_config(), Ok(ClientConfig::default()));
    }

    #[test]
    fn test_save_and_reload() {
        let path = get_temp_file_path();
        let config = ClientConfig {
            game: GameConfig::human_vs_ai(9, Difficulty::VeryHard).with_names("Sari", "Bot"),
            ai_delay_ms: 0,
            log: true,
        };

        get_config_manager(Some(path.clone())).set_config(&config).unwrap();
        let reloaded = get_config_manager(Some(path.clone())).get_config().unwrap();
        assert_eq!(reloaded, config);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let path = get_temp_file_path();
        std::fs::write(&path, "game:\n  size: 6\n  mode: human_vs_ai\n  difficulty: hard\n").unwrap();

        let config = get_config_manager(Some(path.clone())).get_config().unwrap();
        assert_eq!(config.game.size, 6);
        assert_eq!(config.game.mode, GameMode::HumanVsAi);
        assert_eq!(config.ai_delay_ms, DEFAULT_AI_DELAY_MS);
        assert!(!config.log);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = ClientConfig {
            ai_delay_ms: MAX_AI_DELAY_MS + 1,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        config.ai_delay_ms = 0;
        config.game.size = 2;
        assert!(config.validate().is_err());
    }
}
