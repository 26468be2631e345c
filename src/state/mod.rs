//! Game state - the mutable data every command works on
//!
//! Players have no entity object of their own: gold and soldiers are parallel
//! arrays keyed by player index. The state is owned by the command engine and
//! lent to one command at a time.

pub mod battle_phase;
pub mod bonds;
pub mod map;

use crate::core::config::GameConfig;
use crate::core::error::ValidationError;
use crate::core::types::{Gold, PlayerIndex, Soldiers};

pub use battle_phase::{BattlePhase, Declarations};
pub use bonds::{Bond, BondBook};
pub use map::LandMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub gold: Vec<Gold>,
    pub soldiers: Vec<Soldiers>,
    pub bonds: BondBook,
    pub map: LandMap,
    pub battle: BattlePhase,
    /// Rate used by `invest` when none is given
    pub default_rate_percent: u32,
    /// Sea attrition for attackers without a land route
    pub water_die_percentage: u32,
}

impl GameState {
    /// Fresh state seeded from the configuration
    pub fn new(config: &GameConfig) -> Self {
        let mut state = Self {
            default_rate_percent: config.default_rate_percent,
            water_die_percentage: config.water_die_percentage,
            ..Self::default()
        };
        state.grow_players(config.initial_player_count);
        state
    }

    pub fn player_count(&self) -> usize {
        self.gold.len()
    }

    /// Fails unless `player` indexes an existing player
    pub fn check_player(&self, player: PlayerIndex) -> Result<(), ValidationError> {
        if player < self.player_count() {
            Ok(())
        } else {
            Err(ValidationError::UnknownPlayer {
                player,
                count: self.player_count(),
            })
        }
    }

    /// Extend every per-player table to `count` entries
    pub fn grow_players(&mut self, count: usize) {
        if count > self.gold.len() {
            self.gold.resize(count, 0);
            self.soldiers.resize(count, 0);
        }
        self.map.grow_to(count);
    }

    /// Soldiers of a player, zero for an index outside the game
    pub fn soldiers_of(&self, player: PlayerIndex) -> Soldiers {
        self.soldiers.get(player).copied().unwrap_or(0)
    }

    pub fn gold_of(&self, player: PlayerIndex) -> Gold {
        self.gold.get(player).copied().unwrap_or(0)
    }

    /// Snapshot of one player's wallet, for reverting later
    pub fn wallet(&self, player: PlayerIndex) -> Wallet {
        Wallet {
            player,
            gold: self.gold_of(player),
            soldiers: self.soldiers_of(player),
        }
    }

    /// Put a wallet snapshot back
    pub fn restore_wallet(&mut self, wallet: &Wallet) {
        if let Some(gold) = self.gold.get_mut(wallet.player) {
            *gold = wallet.gold;
        }
        if let Some(soldiers) = self.soldiers.get_mut(wallet.player) {
            *soldiers = wallet.soldiers;
        }
    }
}

/// Gold and soldiers of one player at some point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallet {
    pub player: PlayerIndex,
    pub gold: Gold,
    pub soldiers: Soldiers,
}
