//! Direct gold and soldier bookkeeping: overwrites, transfers and purchases

use crate::command::args;
use crate::command::mutation::{Applied, Mutation};
use crate::command::undo::Backup;
use crate::core::error::ValidationError;
use crate::core::types::{Gold, PlayerIndex, Soldiers};
use crate::state::GameState;

fn require_positive(amount: u64) -> Result<(), ValidationError> {
    if amount == 0 {
        return Err(ValidationError::NonPositiveAmount(0));
    }
    Ok(())
}

fn require_gold(state: &GameState, player: PlayerIndex, needs: Gold) -> Result<(), ValidationError> {
    let has = state.gold_of(player);
    if has < needs {
        return Err(ValidationError::InsufficientGold { player, has, needs });
    }
    Ok(())
}

/// `set-gold <player> <value>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetGold {
    pub player: PlayerIndex,
    pub value: Gold,
}

impl SetGold {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 2, 2, "2")?;
        Ok(Self {
            player: args::player(raw[0])?,
            value: args::non_negative(raw[1])?,
        })
    }

    pub fn describe(state: &GameState) -> Vec<String> {
        state
            .gold
            .iter()
            .enumerate()
            .map(|(player, gold)| format!("set-gold {} {}", player, gold))
            .collect()
    }
}

impl Mutation for SetGold {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        state.check_player(self.player)
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let backup = Backup::Wallets(vec![state.wallet(self.player)]);
        state.gold[self.player] = self.value;
        Applied::new(
            backup,
            format!("Player {} now has {} gold", self.player, self.value),
        )
    }
}

/// `set-soldiers <player> <value>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSoldiers {
    pub player: PlayerIndex,
    pub value: Soldiers,
}

impl SetSoldiers {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 2, 2, "2")?;
        Ok(Self {
            player: args::player(raw[0])?,
            value: args::non_negative(raw[1])?,
        })
    }

    pub fn describe(state: &GameState) -> Vec<String> {
        state
            .soldiers
            .iter()
            .enumerate()
            .map(|(player, soldiers)| format!("set-soldiers {} {}", player, soldiers))
            .collect()
    }
}

impl Mutation for SetSoldiers {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        state.check_player(self.player)
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let backup = Backup::Wallets(vec![state.wallet(self.player)]);
        state.soldiers[self.player] = self.value;
        Applied::new(
            backup,
            format!("Player {} now has {} soldiers", self.player, self.value),
        )
    }
}

/// `transfer-gold <from> <to> <amount>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferGold {
    pub from: PlayerIndex,
    pub to: PlayerIndex,
    pub amount: Gold,
}

impl TransferGold {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 3, 3, "3")?;
        Ok(Self {
            from: args::player(raw[0])?,
            to: args::player(raw[1])?,
            amount: args::amount(raw[2])?,
        })
    }
}

impl Mutation for TransferGold {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        state.check_player(self.from)?;
        state.check_player(self.to)?;
        require_positive(self.amount)?;
        require_gold(state, self.from, self.amount)
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let backup = Backup::Wallets(vec![state.wallet(self.from), state.wallet(self.to)]);
        state.gold[self.from] -= self.amount;
        state.gold[self.to] = state.gold[self.to].saturating_add(self.amount);
        Applied::new(
            backup,
            format!(
                "Player {} paid {} gold to player {}",
                self.from, self.amount, self.to
            ),
        )
    }
}

/// `buy-soldiers <player> <amount>`, one gold per soldier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuySoldiers {
    pub player: PlayerIndex,
    pub amount: Gold,
}

impl BuySoldiers {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 2, 2, "2")?;
        Ok(Self {
            player: args::player(raw[0])?,
            amount: args::amount(raw[1])?,
        })
    }
}

impl Mutation for BuySoldiers {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        state.check_player(self.player)?;
        require_positive(self.amount)?;
        require_gold(state, self.player, self.amount)
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let backup = Backup::Wallets(vec![state.wallet(self.player)]);
        state.gold[self.player] -= self.amount;
        state.soldiers[self.player] = state.soldiers[self.player].saturating_add(self.amount);
        Applied::new(
            backup,
            format!("Player {} bought {} soldiers", self.player, self.amount),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let mut state = GameState::default();
        state.grow_players(3);
        state.gold = vec![100, 0, 5];
        state
    }

    #[test]
    fn test_transfer_moves_gold() {
        let mut state = state();
        let cmd = TransferGold::parse(&["0", "1", "40"]).unwrap();
        cmd.validate(&state).unwrap();
        let applied = cmd.run(&mut state);
        assert_eq!(state.gold, vec![60, 40, 5]);

        applied.backup.revert(&mut state);
        assert_eq!(state.gold, vec![100, 0, 5]);
    }

    #[test]
    fn test_transfer_to_self_reverts_cleanly() {
        let mut state = state();
        let cmd = TransferGold {
            from: 2,
            to: 2,
            amount: 5,
        };
        cmd.validate(&state).unwrap();
        let applied = cmd.run(&mut state);
        assert_eq!(state.gold[2], 5);
        applied.backup.revert(&mut state);
        assert_eq!(state.gold[2], 5);
    }

    #[test]
    fn test_transfer_requires_funds() {
        let state = state();
        let cmd = TransferGold {
            from: 2,
            to: 0,
            amount: 6,
        };
        assert_eq!(
            cmd.validate(&state),
            Err(ValidationError::InsufficientGold {
                player: 2,
                has: 5,
                needs: 6
            })
        );
    }

    #[test]
    fn test_transfer_rejects_zero_and_negative() {
        let state = state();
        let zero = TransferGold::parse(&["0", "1", "0"]).unwrap();
        assert_eq!(
            zero.validate(&state),
            Err(ValidationError::NonPositiveAmount(0))
        );
        assert_eq!(
            TransferGold::parse(&["0", "1", "-3"]),
            Err(ValidationError::NonPositiveAmount(-3))
        );
    }

    #[test]
    fn test_buy_soldiers_converts_gold() {
        let mut state = state();
        let cmd = BuySoldiers::parse(&["0", "30"]).unwrap();
        cmd.validate(&state).unwrap();
        cmd.run(&mut state);
        assert_eq!(state.gold[0], 70);
        assert_eq!(state.soldiers[0], 30);
    }

    #[test]
    fn test_set_gold_checks_player() {
        let state = state();
        let cmd = SetGold::parse(&["7", "1"]).unwrap();
        assert!(matches!(
            cmd.validate(&state),
            Err(ValidationError::UnknownPlayer { player: 7, .. })
        ));
    }

    #[test]
    fn test_describe_lists_every_player() {
        let state = state();
        assert_eq!(
            SetGold::describe(&state),
            vec!["set-gold 0 100", "set-gold 1 0", "set-gold 2 5"]
        );
    }
}
