//! Loot: the losing side surrenders half its wealth to the winners

use crate::battle::resolution::BattleSnapshot;
use crate::core::types::{Gold, PlayerIndex};
use crate::state::GameState;

/// Wealth taken from one losing side and how it was shared
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plunder {
    pub pool: Gold,
    /// `(winner, share)` in winning side order
    pub shares: Vec<(PlayerIndex, Gold)>,
}

/// Split a pool evenly, the remainder going to the lead winner
pub fn split_pool(pool: Gold, winners: &[PlayerIndex]) -> Vec<(PlayerIndex, Gold)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let count = winners.len() as Gold;
    let share = pool / count;
    let remainder = pool % count;
    winners
        .iter()
        .enumerate()
        .map(|(i, &winner)| (winner, if i == 0 { share + remainder } else { share }))
        .collect()
}

/// Strip the losers and pay the winners
///
/// Claims are computed from the snapshot taken before the battle began: half
/// the loser's gold and half of every bond it held then. A claim never takes
/// more than what is still there, since a player can lose several
/// engagements in one battle. Bonds shrink in place; one drained to zero is
/// removed.
pub fn plunder(
    state: &mut GameState,
    before: &BattleSnapshot,
    losers: &[PlayerIndex],
    winners: &[PlayerIndex],
) -> Plunder {
    let mut pool: Gold = 0;

    for &loser in losers {
        let claim = before.gold.get(loser).copied().unwrap_or(0) / 2;
        if let Some(gold) = state.gold.get_mut(loser) {
            let taken = claim.min(*gold);
            *gold -= taken;
            pool = pool.saturating_add(taken);
        }

        for (id, bond) in before.bonds.owned_by(loser) {
            let claim = bond.amount / 2;
            if claim == 0 {
                continue;
            }
            let Some(live) = state.bonds.get_mut(id) else {
                continue;
            };
            let taken = claim.min(live.amount);
            live.amount -= taken;
            pool = pool.saturating_add(taken);
            if live.amount == 0 {
                state.bonds.remove(id);
            }
        }
    }

    let shares = split_pool(pool, winners);
    for &(winner, share) in &shares {
        if let Some(gold) = state.gold.get_mut(winner) {
            *gold = gold.saturating_add(share);
        }
    }

    Plunder { pool, shares }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Bond;

    #[test]
    fn test_split_remainder_goes_to_lead() {
        assert_eq!(split_pool(10, &[4, 1, 2]), vec![(4, 4), (1, 3), (2, 3)]);
        assert_eq!(split_pool(9, &[0, 1, 2]), vec![(0, 3), (1, 3), (2, 3)]);
        assert!(split_pool(9, &[]).is_empty());
    }

    #[test]
    fn test_losers_surrender_half_of_gold_and_bonds() {
        let mut state = GameState::default();
        state.grow_players(3);
        state.gold = vec![11, 0, 0];
        let bond = state.bonds.issue(Bond::new(0, 9, 2, 10));
        let before = BattleSnapshot::capture(&state);

        let loot = plunder(&mut state, &before, &[0], &[1, 2]);

        // 5 gold + 4 from the bond
        assert_eq!(loot.pool, 9);
        assert_eq!(state.gold, vec![6, 5, 4]);
        assert_eq!(state.bonds.get(bond).unwrap().amount, 5);
    }

    #[test]
    fn test_claims_use_prebattle_values() {
        let mut state = GameState::default();
        state.grow_players(3);
        state.gold = vec![10, 0, 0];
        let before = BattleSnapshot::capture(&state);

        plunder(&mut state, &before, &[0], &[1]);
        plunder(&mut state, &before, &[0], &[2]);
        plunder(&mut state, &before, &[0], &[1]);

        // 5, then 5, then nothing left
        assert_eq!(state.gold, vec![0, 5, 5]);
    }

    #[test]
    fn test_drained_bond_is_removed() {
        let mut state = GameState::default();
        state.grow_players(2);
        let bond = state.bonds.issue(Bond::new(0, 4, 2, 10));
        let before = BattleSnapshot::capture(&state);

        plunder(&mut state, &before, &[0], &[1]);
        assert_eq!(state.bonds.get(bond).unwrap().amount, 2);
        plunder(&mut state, &before, &[0], &[1]);
        assert!(state.bonds.get(bond).is_none());
        assert_eq!(state.gold[1], 4);
    }
}
