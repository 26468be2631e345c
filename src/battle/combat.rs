//! Combat within one engagement: sea attrition and casualty distribution

use crate::core::types::{percent_of, PlayerIndex, Soldiers};

/// Combined soldiers of one side; wide enough that no side total overflows
pub type Strength = u128;

/// Outcome of a single engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    AttackerVictory,
    DefenderVictory,
    /// Equal strength, nobody is looted
    Draw,
    /// Attackers had no soldiers left after crossing the sea
    Retreat,
}

impl BattleOutcome {
    /// Compare the two sides' strength before casualties
    pub fn decide(attackers: Strength, defenders: Strength) -> Self {
        match attackers.cmp(&defenders) {
            std::cmp::Ordering::Greater => BattleOutcome::AttackerVictory,
            std::cmp::Ordering::Less => BattleOutcome::DefenderVictory,
            std::cmp::Ordering::Equal => BattleOutcome::Draw,
        }
    }
}

/// Total soldiers of the listed players
pub fn side_strength(soldiers: &[Soldiers], members: &[PlayerIndex]) -> Strength {
    members
        .iter()
        .map(|&m| Strength::from(soldiers.get(m).copied().unwrap_or(0)))
        .sum()
}

/// Every listed attacker loses `floor(count * percent / 100)` at sea
///
/// Returns the total lost.
pub fn sea_attrition(soldiers: &mut [Soldiers], members: &[PlayerIndex], percent: u32) -> Strength {
    let mut lost: Strength = 0;
    for &member in members {
        if let Some(count) = soldiers.get_mut(member) {
            let drowned = percent_of(*count, percent.min(100));
            *count -= drowned;
            lost += Strength::from(drowned);
        }
    }
    lost
}

/// Spread `casualties` over a side in proportion to each member's soldiers
///
/// Each member first loses `floor(own * casualties / total)`. The units lost
/// to flooring are then handed out one at a time, in list order, to members
/// that still have soldiers. Returns the loss per member, in list order.
pub fn distribute_casualties(
    soldiers: &mut [Soldiers],
    members: &[PlayerIndex],
    casualties: Strength,
) -> Vec<Soldiers> {
    let total = side_strength(soldiers, members);
    let casualties = casualties.min(total);
    if casualties == 0 {
        return vec![0; members.len()];
    }

    let strength = |m: PlayerIndex| soldiers.get(m).copied().unwrap_or(0);
    // own * casualties / total <= own, so every share fits back into Soldiers
    let mut losses: Vec<Soldiers> = members
        .iter()
        .map(|&m| {
            let own = Strength::from(strength(m));
            Soldiers::try_from(own.saturating_mul(casualties) / total).unwrap_or(strength(m))
        })
        .collect();

    let assigned: Strength = losses.iter().map(|&l| Strength::from(l)).sum();
    let mut remainder = casualties.saturating_sub(assigned);
    while remainder > 0 {
        let mut progressed = false;
        for (loss, &member) in losses.iter_mut().zip(members) {
            if remainder == 0 {
                break;
            }
            if strength(member) > *loss {
                *loss += 1;
                remainder -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    for (&loss, &member) in losses.iter().zip(members) {
        if let Some(count) = soldiers.get_mut(member) {
            *count -= loss;
        }
    }

    losses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_decided_by_strength() {
        assert_eq!(BattleOutcome::decide(11, 10), BattleOutcome::AttackerVictory);
        assert_eq!(BattleOutcome::decide(9, 10), BattleOutcome::DefenderVictory);
        assert_eq!(BattleOutcome::decide(10, 10), BattleOutcome::Draw);
    }

    #[test]
    fn test_sea_attrition_floors_per_attacker() {
        let mut soldiers = vec![100, 15, 7];
        let lost = sea_attrition(&mut soldiers, &[0, 1, 2], 10);
        assert_eq!(soldiers, vec![90, 14, 7]);
        assert_eq!(lost, 11);
    }

    #[test]
    fn test_exact_proportional_split() {
        let mut soldiers = vec![6, 4, 10];
        let attacker_losses = distribute_casualties(&mut soldiers, &[0, 1], 10);
        let defender_losses = distribute_casualties(&mut soldiers, &[2], 10);
        assert_eq!(attacker_losses, vec![6, 4]);
        assert_eq!(defender_losses, vec![10]);
        assert_eq!(soldiers, vec![0, 0, 0]);
    }

    #[test]
    fn test_remainder_assigned_in_list_order() {
        // 3 casualties over [1, 1, 1]: exact. 2 casualties: floors to 0 each
        let mut soldiers = vec![1, 1, 1];
        let losses = distribute_casualties(&mut soldiers, &[0, 1, 2], 2);
        assert_eq!(losses, vec![1, 1, 0]);
        assert_eq!(soldiers, vec![0, 0, 1]);
    }

    #[test]
    fn test_remainder_skips_exhausted_members() {
        // floors: 5*4/7=2, 1*4/7=0, 1*4/7=0 -> remainder 2
        let mut soldiers = vec![5, 1, 1];
        let losses = distribute_casualties(&mut soldiers, &[0, 1, 2], 4);
        assert_eq!(losses.iter().sum::<u64>(), 4);
        assert_eq!(losses, vec![3, 1, 0]);
    }

    #[test]
    fn test_huge_sides_do_not_overflow() {
        let max = i64::MAX as u64;
        let mut soldiers = vec![max, max, max, 5];
        let attack = side_strength(&soldiers, &[0, 1, 2]);
        assert_eq!(attack, 3 * Strength::from(max));

        let defence = side_strength(&soldiers, &[3]);
        let losses = distribute_casualties(&mut soldiers, &[0, 1, 2], defence);
        assert_eq!(losses.iter().map(|&l| Strength::from(l)).sum::<Strength>(), 5);
        assert_eq!(BattleOutcome::decide(attack, defence), BattleOutcome::AttackerVictory);
    }

    #[test]
    fn test_sea_attrition_total_is_wide() {
        let mut soldiers = vec![u64::MAX, u64::MAX];
        let lost = sea_attrition(&mut soldiers, &[0, 1], 100);
        assert_eq!(lost, 2 * Strength::from(u64::MAX));
        assert_eq!(soldiers, vec![0, 0]);
    }

    #[test]
    fn test_empty_side_takes_no_losses() {
        let mut soldiers = vec![0, 0];
        let losses = distribute_casualties(&mut soldiers, &[0, 1], 5);
        assert_eq!(losses, vec![0, 0]);
    }
}
