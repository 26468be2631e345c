//! Bond commands: investing gold, retracting it and setting holdings directly

use crate::command::args;
use crate::command::mutation::{Applied, Mutation};
use crate::command::undo::Backup;
use crate::core::error::ValidationError;
use crate::core::types::{BondId, Gold, PlayerIndex};
use crate::state::{Bond, GameState};

/// `invest <player> <amount> <lock rounds> [rate percent]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invest {
    pub player: PlayerIndex,
    pub amount: Gold,
    pub locked_rounds: u32,
    /// Falls back to the game's default rate
    pub rate_percent: Option<u32>,
}

impl Invest {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 3, 4, "3-4")?;
        Ok(Self {
            player: args::player(raw[0])?,
            amount: args::amount(raw[1])?,
            locked_rounds: args::small(raw[2])?,
            rate_percent: raw.get(3).map(|r| args::small(r)).transpose()?,
        })
    }
}

impl Mutation for Invest {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        state.check_player(self.player)?;
        if self.amount == 0 {
            return Err(ValidationError::NonPositiveAmount(0));
        }
        let has = state.gold_of(self.player);
        if has < self.amount {
            return Err(ValidationError::InsufficientGold {
                player: self.player,
                has,
                needs: self.amount,
            });
        }
        Ok(())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let wallet = state.wallet(self.player);
        let next_id = state.bonds.next_id();
        let rate = self.rate_percent.unwrap_or(state.default_rate_percent);

        state.gold[self.player] -= self.amount;
        let bond = state
            .bonds
            .issue(Bond::new(self.player, self.amount, self.locked_rounds, rate));

        Applied::new(
            Backup::Invest {
                wallet,
                bond,
                next_id,
            },
            format!(
                "Player {} locked {} gold for {} rounds at {}% ({})",
                self.player, self.amount, self.locked_rounds, rate, bond
            ),
        )
    }
}

/// `retract <player> <amount> <fee>`
///
/// Whole bonds are liquidated in creation order until the requested amount is
/// reached and the fee can be paid; the remainder goes to the player's gold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retract {
    pub player: PlayerIndex,
    pub amount: Gold,
    pub fee: Gold,
}

impl Retract {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 3, 3, "3")?;
        Ok(Self {
            player: args::player(raw[0])?,
            amount: args::amount(raw[1])?,
            fee: args::non_negative(raw[2])?,
        })
    }
}

impl Mutation for Retract {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        state.check_player(self.player)?;
        if self.amount == 0 {
            return Err(ValidationError::NonPositiveAmount(0));
        }
        let held = state.bonds.held_by(self.player);
        if held < self.amount {
            return Err(ValidationError::InsufficientBonds {
                player: self.player,
                has: held,
                needs: self.amount,
            });
        }
        let available = state.gold_of(self.player).saturating_add(held);
        if available < self.fee {
            return Err(ValidationError::FeeNotCovered {
                player: self.player,
                available,
                fee: self.fee,
            });
        }
        Ok(())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let wallet = state.wallet(self.player);
        let ids: Vec<BondId> = state.bonds.owned_by(self.player).map(|(id, _)| id).collect();

        let mut taken: Gold = 0;
        let mut liquidated = Vec::new();
        for id in ids {
            if taken >= self.amount && wallet.gold.saturating_add(taken) >= self.fee {
                break;
            }
            if let Some(bond) = state.bonds.remove(id) {
                taken = taken.saturating_add(bond.amount);
                liquidated.push((id, bond));
            }
        }

        state.gold[self.player] = wallet.gold.saturating_add(taken).saturating_sub(self.fee);

        Applied::new(
            Backup::Retract { wallet, liquidated },
            format!(
                "Player {} retracted {} gold from bonds and paid a fee of {}",
                self.player, taken, self.fee
            ),
        )
    }
}

/// `set-bonds <owner> [[amount, lock rounds, rate percent], ...]`
///
/// Replaces every bond the owner holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetBonds {
    pub owner: PlayerIndex,
    pub bonds: Vec<(Gold, u32, u32)>,
}

impl SetBonds {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 2, 2, "2")?;
        let owner = args::player(raw[0])?;
        let triples: Vec<(i128, i128, i128)> =
            args::payload(raw[1], "a list of [amount, lock rounds, rate] triples")?;

        let mut bonds = Vec::with_capacity(triples.len());
        for (amount, rounds, rate) in triples {
            if amount <= 0 {
                return Err(ValidationError::NonPositiveAmount(amount));
            }
            let amount = Gold::try_from(amount).map_err(|_| ValidationError::BadArgument {
                value: amount.to_string(),
                expected: "a bond amount below 2^64",
            })?;
            bonds.push((amount, to_small(rounds)?, to_small(rate)?));
        }

        Ok(Self { owner, bonds })
    }

    pub fn describe(state: &GameState) -> Vec<String> {
        (0..state.player_count())
            .filter_map(|owner| {
                let triples: Vec<String> = state
                    .bonds
                    .owned_by(owner)
                    .map(|(_, b)| format!("[{},{},{}]", b.amount, b.locked_rounds, b.rate_percent))
                    .collect();
                if triples.is_empty() {
                    return None;
                }
                Some(format!("set-bonds {} [{}]", owner, triples.join(",")))
            })
            .collect()
    }
}

fn to_small(value: i128) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeValue(value));
    }
    u32::try_from(value).map_err(|_| ValidationError::BadArgument {
        value: value.to_string(),
        expected: "a number below 2^32",
    })
}

impl Mutation for SetBonds {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        state.check_player(self.owner)
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let next_id = state.bonds.next_id();
        let removed: Vec<(BondId, Bond)> = state
            .bonds
            .owned_by(self.owner)
            .map(|(id, bond)| (id, *bond))
            .collect();
        for (id, _) in &removed {
            state.bonds.remove(*id);
        }

        let issued: Vec<BondId> = self
            .bonds
            .iter()
            .map(|&(amount, rounds, rate)| {
                state
                    .bonds
                    .issue(Bond::new(self.owner, amount, rounds, rate))
            })
            .collect();

        Applied::new(
            Backup::OwnerBonds {
                removed,
                issued,
                next_id,
            },
            format!(
                "Player {} now holds {} bond(s) worth {} gold",
                self.owner,
                self.bonds.len(),
                state.bonds.held_by(self.owner)
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let mut state = GameState::default();
        state.grow_players(2);
        state.default_rate_percent = 10;
        state
    }

    #[test]
    fn test_invest_creates_bond_with_default_rate() {
        let mut state = state();
        state.gold[0] = 100;
        let cmd = Invest::parse(&["0", "60", "3"]).unwrap();
        cmd.validate(&state).unwrap();
        let applied = cmd.run(&mut state);

        assert_eq!(state.gold[0], 40);
        let (_, bond) = state.bonds.owned_by(0).next().unwrap();
        assert_eq!(*bond, Bond::new(0, 60, 3, 10));

        let before_id = BondId::default();
        applied.backup.revert(&mut state);
        assert_eq!(state.gold[0], 100);
        assert!(state.bonds.is_empty());
        assert_eq!(state.bonds.next_id(), before_id);
    }

    #[test]
    fn test_invest_requires_gold() {
        let state = state();
        let cmd = Invest::parse(&["1", "5", "2", "20"]).unwrap();
        assert!(matches!(
            cmd.validate(&state),
            Err(ValidationError::InsufficientGold { .. })
        ));
    }

    #[test]
    fn test_retract_liquidates_whole_bonds() {
        let mut state = state();
        state.bonds.issue(Bond::new(0, 50, 2, 10));
        state.bonds.issue(Bond::new(0, 30, 2, 10));

        let cmd = Retract::parse(&["0", "60", "5"]).unwrap();
        cmd.validate(&state).unwrap();
        let applied = cmd.run(&mut state);

        assert_eq!(state.gold[0], 75);
        assert!(state.bonds.is_empty());

        applied.backup.revert(&mut state);
        assert_eq!(state.gold[0], 0);
        assert_eq!(state.bonds.held_by(0), 80);
    }

    #[test]
    fn test_retract_stops_once_request_is_met() {
        let mut state = state();
        state.gold[0] = 10;
        state.bonds.issue(Bond::new(0, 50, 2, 10));
        state.bonds.issue(Bond::new(0, 30, 2, 10));

        let cmd = Retract {
            player: 0,
            amount: 40,
            fee: 0,
        };
        cmd.validate(&state).unwrap();
        cmd.run(&mut state);

        assert_eq!(state.gold[0], 60);
        assert_eq!(state.bonds.held_by(0), 30);
    }

    #[test]
    fn test_retract_keeps_liquidating_to_cover_fee() {
        let mut state = state();
        state.bonds.issue(Bond::new(0, 10, 2, 10));
        state.bonds.issue(Bond::new(0, 30, 2, 10));

        let cmd = Retract {
            player: 0,
            amount: 5,
            fee: 20,
        };
        cmd.validate(&state).unwrap();
        cmd.run(&mut state);

        assert_eq!(state.gold[0], 20);
        assert!(state.bonds.is_empty());
    }

    #[test]
    fn test_retract_validation() {
        let mut state = state();
        state.bonds.issue(Bond::new(0, 10, 2, 10));
        let too_much = Retract {
            player: 0,
            amount: 11,
            fee: 0,
        };
        assert!(matches!(
            too_much.validate(&state),
            Err(ValidationError::InsufficientBonds { has: 10, .. })
        ));

        let big_fee = Retract {
            player: 0,
            amount: 10,
            fee: 11,
        };
        assert!(matches!(
            big_fee.validate(&state),
            Err(ValidationError::FeeNotCovered { available: 10, .. })
        ));
    }

    #[test]
    fn test_set_bonds_replaces_owner_holdings() {
        let mut state = state();
        state.bonds.issue(Bond::new(0, 99, 1, 1));
        state.bonds.issue(Bond::new(1, 7, 1, 1));

        let cmd = SetBonds::parse(&["0", "[[50, 2, 10], [30, 1, 5]]"]).unwrap();
        cmd.validate(&state).unwrap();
        let applied = cmd.run(&mut state);
        assert_eq!(state.bonds.held_by(0), 80);
        assert_eq!(state.bonds.held_by(1), 7);
        assert_eq!(
            SetBonds::describe(&state),
            vec!["set-bonds 0 [[50,2,10],[30,1,5]]", "set-bonds 1 [[7,1,1]]"]
        );

        applied.backup.revert(&mut state);
        assert_eq!(state.bonds.held_by(0), 99);
        assert_eq!(state.bonds.len(), 2);
    }

    #[test]
    fn test_set_bonds_rejects_empty_bond() {
        assert_eq!(
            SetBonds::parse(&["0", "[[0, 2, 10]]"]),
            Err(ValidationError::NonPositiveAmount(0))
        );
        assert_eq!(
            SetBonds::parse(&["0", "[[5, -2, 10]]"]),
            Err(ValidationError::NegativeValue(-2))
        );
    }

    #[test]
    fn test_huge_holdings_saturate_instead_of_overflowing() {
        let mut state = state();
        let max = i64::MAX;
        let payload = format!("[[{m},1,10],[{m},1,10],[{m},1,10]]", m = max);
        let cmd = SetBonds::parse(&["0", &payload]).unwrap();
        cmd.validate(&state).unwrap();
        cmd.run(&mut state);
        assert_eq!(state.bonds.held_by(0), u64::MAX);

        let retract = Retract::parse(&["0", "1", "0"]).unwrap();
        retract.validate(&state).unwrap();
        retract.run(&mut state);
        assert_eq!(state.gold[0], max as u64);
        assert_eq!(state.bonds.len(), 2);
    }

    #[test]
    fn test_set_bonds_accepts_full_u64_amounts() {
        let cmd = SetBonds::parse(&["0", "[[18446744073709551615, 1, 10]]"]).unwrap();
        assert_eq!(cmd.bonds, vec![(u64::MAX, 1, 10)]);
        assert!(matches!(
            SetBonds::parse(&["0", "[[18446744073709551616, 1, 10]]"]),
            Err(ValidationError::BadArgument { .. })
        ));
    }
}
