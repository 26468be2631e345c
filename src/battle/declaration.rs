//! Opening the battle phase and declaring attacks and supports

use crate::command::args;
use crate::command::mutation::{Applied, Mutation};
use crate::command::undo::Backup;
use crate::core::error::ValidationError;
use crate::core::types::{PlayerIndex, Stance};
use crate::state::GameState;

/// `start-battle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartBattle;

impl StartBattle {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 0, 0, "no")?;
        Ok(Self)
    }

    pub fn describe(state: &GameState) -> Vec<String> {
        if state.battle.in_battle {
            vec!["start-battle".to_string()]
        } else {
            Vec::new()
        }
    }
}

impl Mutation for StartBattle {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        if state.battle.in_battle {
            return Err(ValidationError::BattleAlreadyOpen);
        }
        Ok(())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        state.battle.open();
        Applied::new(Backup::BattleOpened, "Battle planning has begun")
    }
}

/// `declare-attack <actor> <target>` or `declare-support <actor> <target>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declare {
    pub stance: Stance,
    pub actor: PlayerIndex,
    pub target: PlayerIndex,
}

impl Declare {
    pub fn parse(stance: Stance, raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 2, 2, "2")?;
        Ok(Self {
            stance,
            actor: args::player(raw[0])?,
            target: args::player(raw[1])?,
        })
    }

    pub fn describe(stance: Stance, state: &GameState) -> Vec<String> {
        state
            .battle
            .declarations(stance)
            .iter()
            .map(|(actor, target)| format!("declare-{} {} {}", stance, actor, target))
            .collect()
    }
}

impl Mutation for Declare {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        self.validate_replay(state)?;
        if state.soldiers_of(self.actor) == 0 {
            return Err(ValidationError::NoSoldiers(self.actor));
        }
        Ok(())
    }

    /// Soldiers only matter at declaration time; a declared actor may have
    /// lost them since
    fn validate_replay(&self, state: &GameState) -> Result<(), ValidationError> {
        if !state.battle.in_battle {
            return Err(ValidationError::BattleNotOpen);
        }
        state.check_player(self.actor)?;
        state.check_player(self.target)?;
        if self.actor == self.target {
            return Err(ValidationError::SelfTarget(self.actor));
        }
        if let Some(stance) = state.battle.declared(self.actor) {
            return Err(ValidationError::AlreadyDeclared {
                player: self.actor,
                stance,
            });
        }
        Ok(())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        state
            .battle
            .declarations_mut(self.stance)
            .insert(self.actor, self.target);
        let verb = match self.stance {
            Stance::Attack => "attacks",
            Stance::Support => "supports",
        };
        Applied::new(
            Backup::Declared {
                stance: self.stance,
                actor: self.actor,
            },
            format!("Player {} {} player {}", self.actor, verb, self.target),
        )
    }
}
