use std::path::Path;

use serde::{Deserialize, Serialize};
use tictactoe_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_engine::games::tictactoe::{Difficulty, Opponent};

pub const CONFIG_FILE: &str = "tictactoe_terminal_config.yaml";

const MAX_COMPUTER_MOVE_DELAY_MS: u32 = 5000;

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    Human,
    Computer,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub display: DisplayConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.display.validate()
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub opponent: OpponentKind,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opponent: OpponentKind::Computer,
            difficulty: Difficulty::Medium,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn opponent(&self) -> Opponent {
        match self.opponent {
            OpponentKind::Human => Opponent::Human,
            OpponentKind::Computer => Opponent::Computer(self.difficulty),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub computer_move_delay_ms: u32,
    pub show_analytics_after_game: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            computer_move_delay_ms: 500,
            show_analytics_after_game: true,
        }
    }
}

impl Validate for DisplayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.computer_move_delay_ms > MAX_COMPUTER_MOVE_DELAY_MS {
            return Err(format!(
                "computer_move_delay_ms must not exceed {}",
                MAX_COMPUTER_MOVE_DELAY_MS
            ));
        }
        Ok(())
    }
}
