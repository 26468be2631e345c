//! Setup commands: player count, land map and economy parameters

use std::collections::BTreeSet;

use crate::command::args;
use crate::command::mutation::{Applied, Mutation};
use crate::command::undo::Backup;
use crate::core::error::ValidationError;
use crate::core::types::PlayerIndex;
use crate::state::{GameState, LandMap};

/// `set-player-count <count>`; the count may only grow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPlayerCount {
    pub count: usize,
}

impl SetPlayerCount {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 1, 1, "1")?;
        Ok(Self {
            count: args::player(raw[0])?,
        })
    }

    pub fn describe(state: &GameState) -> Vec<String> {
        if state.player_count() == 0 {
            return Vec::new();
        }
        vec![format!("set-player-count {}", state.player_count())]
    }
}

impl Mutation for SetPlayerCount {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        if self.count < state.player_count() {
            return Err(ValidationError::ShrinkingPlayerCount {
                requested: self.count,
                current: state.player_count(),
            });
        }
        Ok(())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let backup = Backup::PlayerCount {
            players: state.player_count(),
            map_len: state.map.len(),
        };
        state.grow_players(self.count);
        Applied::new(backup, format!("The game now has {} players", self.count))
    }
}

/// `set-map [[links of 0], [links of 1], ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetMap {
    pub links: Vec<BTreeSet<PlayerIndex>>,
}

impl SetMap {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 1, 1, "1")?;
        Ok(Self {
            links: args::payload(raw[0], "a list of linked player lists")?,
        })
    }

    pub fn describe(state: &GameState) -> Vec<String> {
        if state.map.is_empty() {
            return Vec::new();
        }
        vec![format!("set-map {}", state.map.to_payload())]
    }
}

impl Mutation for SetMap {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        LandMap::check(&self.links, state.player_count())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let map = LandMap::from_checked(self.links.clone());
        let previous = std::mem::replace(&mut state.map, map);
        Applied::new(
            Backup::Map(previous),
            format!("Loaded a map of {} territories", self.links.len()),
        )
    }
}

/// `set-return-rate <percent>`: rate for bonds invested without one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetReturnRate {
    pub percent: u32,
}

impl SetReturnRate {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 1, 1, "1")?;
        Ok(Self {
            percent: args::small(raw[0])?,
        })
    }

    pub fn describe(state: &GameState) -> Vec<String> {
        vec![format!("set-return-rate {}", state.default_rate_percent)]
    }
}

impl Mutation for SetReturnRate {
    fn validate(&self, _state: &GameState) -> Result<(), ValidationError> {
        Ok(())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let previous = std::mem::replace(&mut state.default_rate_percent, self.percent);
        Applied::new(
            Backup::ReturnRate(previous),
            format!("Bank return rate is now {}%", self.percent),
        )
    }
}

/// `set-water-die <percent>`: sea attrition for overseas attackers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetWaterDie {
    pub percent: u32,
}

impl SetWaterDie {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 1, 1, "1")?;
        Ok(Self {
            percent: args::small(raw[0])?,
        })
    }

    pub fn describe(state: &GameState) -> Vec<String> {
        vec![format!("set-water-die {}", state.water_die_percentage)]
    }
}

impl Mutation for SetWaterDie {
    fn validate(&self, _state: &GameState) -> Result<(), ValidationError> {
        if self.percent > 100 {
            return Err(ValidationError::PercentageTooLarge(self.percent));
        }
        Ok(())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let previous = std::mem::replace(&mut state.water_die_percentage, self.percent);
        Applied::new(
            Backup::WaterDie(previous),
            format!("Overseas attackers now lose {}% of their soldiers", self.percent),
        )
    }
}
