//! Game configuration with documented constants
//!
//! The values here only seed a new game. Once a game is running, the economy
//! parameters live in the game state and are changed through commands, so
//! they are undoable and survive an export/restore cycle.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::ConfigError;

/// Configuration for a new game
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === SETUP ===
    /// Number of players the game starts with
    ///
    /// Usually left at 0 and raised with `set-player-count`, since a restored
    /// state file carries its own player count.
    pub initial_player_count: usize,

    // === ECONOMY ===
    /// Interest paid per economy step for bonds created without an explicit rate
    ///
    /// At 10, a bond of 100 gold pays 10 gold each round while locked.
    pub default_rate_percent: u32,

    // === BATTLE ===
    /// Share of soldiers lost by attackers with no land route to their target
    ///
    /// Applied per attacker, floored, before casualties are computed.
    pub water_die_percentage: u32,

    // === PERSISTENCE ===
    /// File the binary replays on start and rewrites after every command
    pub state_file: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_player_count: 0,
            default_rate_percent: 10,
            water_die_percentage: 10,
            state_file: None,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML, missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.water_die_percentage > 100 {
            return Err(ConfigError::Invalid(format!(
                "water_die_percentage ({}) must be at most 100",
                self.water_die_percentage
            )));
        }

        Ok(())
    }
}
