//! Support chains decide which side a non-combatant ends up on
//!
//! A player supporting someone who supports someone else follows the chain
//! until it reaches a participant of the engagement. Chains that loop or run
//! out pick no side.

use ahash::AHashSet;

use crate::battle::grouping::Engagement;
use crate::core::types::PlayerIndex;
use crate::state::Declarations;

/// Where a support chain ends for one engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allegiance {
    Defender,
    Attacker,
    Unresolved,
}

/// Follow support declarations from `start` until they reach a side
///
/// The primary defender is checked before the attackers at every step, so a
/// chain touching both resolves to the defender. The walk never takes more
/// than `player_count` steps.
pub fn trace_allegiance(
    start: PlayerIndex,
    engagement: &Engagement,
    supports: &Declarations,
    player_count: usize,
) -> Allegiance {
    let mut visited = AHashSet::new();
    let mut current = start;

    for _ in 0..=player_count {
        if current == engagement.primary_defender() {
            return Allegiance::Defender;
        }
        if engagement.attackers.contains(&current) {
            return Allegiance::Attacker;
        }
        if !visited.insert(current) {
            return Allegiance::Unresolved;
        }
        match supports.target_of(current) {
            Some(next) => current = next,
            None => return Allegiance::Unresolved,
        }
    }

    Allegiance::Unresolved
}

/// Add every player whose chain resolves to a side of an engagement
pub fn enlist_supporters(
    engagements: &mut [Engagement],
    supports: &Declarations,
    player_count: usize,
) {
    for player in 0..player_count {
        for engagement in engagements.iter_mut() {
            match trace_allegiance(player, engagement, supports, player_count) {
                Allegiance::Defender if player != engagement.primary_defender() => {
                    engagement.defenders.push(player);
                }
                Allegiance::Attacker if !engagement.attackers.contains(&player) => {
                    engagement.attackers.push(player);
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_support_joins_defender() {
        let engagement = Engagement::new(1, 0);
        let mut supports = Declarations::new();
        supports.insert(2, 0);
        assert_eq!(
            trace_allegiance(2, &engagement, &supports, 3),
            Allegiance::Defender
        );
    }

    #[test]
    fn test_chain_reaches_attacker() {
        let engagement = Engagement::new(1, 0);
        let mut supports = Declarations::new();
        supports.insert(3, 2);
        supports.insert(2, 1);
        assert_eq!(
            trace_allegiance(3, &engagement, &supports, 4),
            Allegiance::Attacker
        );
    }

    #[test]
    fn test_mutual_support_cycle_is_unresolved() {
        let engagement = Engagement::new(1, 0);
        let mut supports = Declarations::new();
        supports.insert(2, 3);
        supports.insert(3, 2);
        assert_eq!(
            trace_allegiance(2, &engagement, &supports, 4),
            Allegiance::Unresolved
        );
        assert_eq!(
            trace_allegiance(3, &engagement, &supports, 4),
            Allegiance::Unresolved
        );
    }

    #[test]
    fn test_undeclared_player_is_unresolved() {
        let engagement = Engagement::new(1, 0);
        let supports = Declarations::new();
        assert_eq!(
            trace_allegiance(2, &engagement, &supports, 3),
            Allegiance::Unresolved
        );
    }

    #[test]
    fn test_enlist_extends_both_sides() {
        let mut engagements = vec![Engagement::new(1, 0)];
        let mut supports = Declarations::new();
        supports.insert(2, 0);
        supports.insert(3, 1);
        supports.insert(4, 5);
        supports.insert(5, 4);

        enlist_supporters(&mut engagements, &supports, 6);
        assert_eq!(engagements[0].attackers, vec![1, 3]);
        assert_eq!(engagements[0].defenders, vec![0, 2]);
    }

    #[test]
    fn test_defender_wins_the_tie() {
        // the defender itself supports the attacker; 2 reaches the defender first
        let engagement = Engagement::new(1, 0);
        let mut supports = Declarations::new();
        supports.insert(2, 0);
        supports.insert(0, 1);
        assert_eq!(
            trace_allegiance(2, &engagement, &supports, 4),
            Allegiance::Defender
        );
    }
}
