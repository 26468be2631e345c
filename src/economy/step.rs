//! Periodic economy step: bond interest and maturity

use std::collections::BTreeSet;

use crate::command::args;
use crate::command::mutation::{Applied, Mutation};
use crate::command::undo::Backup;
use crate::core::error::ValidationError;
use crate::core::types::{percent_of, BondId, Gold, PlayerIndex};
use crate::state::GameState;

/// `run-economy-step`
///
/// Every bond pays `floor(amount * rate / 100)` to its owner. A bond on its
/// last lock round also returns its principal and is removed; the others
/// count down one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunEconomyStep;

impl RunEconomyStep {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 0, 0, "no")?;
        Ok(Self)
    }
}

impl Mutation for RunEconomyStep {
    fn validate(&self, _state: &GameState) -> Result<(), ValidationError> {
        Ok(())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let owners: BTreeSet<PlayerIndex> = state.bonds.iter().map(|(_, b)| b.owner).collect();
        let wallets = owners.iter().map(|&owner| state.wallet(owner)).collect();
        let bonds = state.bonds.clone();

        let mut interest: Gold = 0;
        let mut released: Gold = 0;
        let ids: Vec<BondId> = state.bonds.iter().map(|(id, _)| id).collect();
        for id in ids {
            let Some(bond) = state.bonds.get(id).copied() else {
                continue;
            };

            let mut payout = percent_of(bond.amount, bond.rate_percent);
            interest = interest.saturating_add(payout);

            if bond.matures_next_step() {
                state.bonds.remove(id);
                payout = payout.saturating_add(bond.amount);
                released = released.saturating_add(bond.amount);
            } else if let Some(live) = state.bonds.get_mut(id) {
                live.locked_rounds -= 1;
            }

            if let Some(gold) = state.gold.get_mut(bond.owner) {
                *gold = gold.saturating_add(payout);
            }
        }

        tracing::info!(
            "Economy step paid {} interest and released {} principal",
            interest,
            released
        );

        Applied::new(
            Backup::EconomyStep { wallets, bonds },
            format!(
                "Bonds paid {} gold in interest and released {} gold",
                interest, released
            ),
        )
    }
}
