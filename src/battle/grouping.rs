//! Merging declared attacks into engagements around a primary defender

use crate::core::types::PlayerIndex;
use crate::state::{Declarations, LandMap};

/// One fight: attackers converging on a primary defender, plus whoever
/// joins either side through support
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engagement {
    /// Lead attacker first
    pub attackers: Vec<PlayerIndex>,
    /// Primary defender first
    pub defenders: Vec<PlayerIndex>,
}

impl Engagement {
    pub fn new(attacker: PlayerIndex, target: PlayerIndex) -> Self {
        Self {
            attackers: vec![attacker],
            defenders: vec![target],
        }
    }

    pub fn primary_defender(&self) -> PlayerIndex {
        self.defenders[0]
    }

    pub fn lead_attacker(&self) -> PlayerIndex {
        self.attackers[0]
    }
}

/// Group attack declarations by target, in declaration order
///
/// Attackers with a land link to the target strike first, so they go to the
/// front of the attacker list; overseas attackers queue at the back.
pub fn group_attacks(attacks: &Declarations, map: &LandMap) -> Vec<Engagement> {
    let mut engagements: Vec<Engagement> = Vec::new();

    for (attacker, target) in attacks.iter() {
        match engagements
            .iter_mut()
            .find(|e| e.primary_defender() == target)
        {
            Some(engagement) if map.linked(attacker, target) => {
                engagement.attackers.insert(0, attacker);
            }
            Some(engagement) => engagement.attackers.push(attacker),
            None => engagements.push(Engagement::new(attacker, target)),
        }
    }

    engagements
}
