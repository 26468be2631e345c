//! Bond book - locked investments keyed by generated id

use std::collections::BTreeMap;

use crate::core::types::{BondId, Gold, PlayerIndex};

/// A locked investment returning interest until its lock runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub owner: PlayerIndex,
    pub amount: Gold,
    /// Economy steps left before the principal is returned
    pub locked_rounds: u32,
    pub rate_percent: u32,
}

impl Bond {
    pub fn new(owner: PlayerIndex, amount: Gold, locked_rounds: u32, rate_percent: u32) -> Self {
        Self {
            owner,
            amount,
            locked_rounds,
            rate_percent,
        }
    }

    /// True when the next economy step releases the principal
    pub fn matures_next_step(&self) -> bool {
        self.locked_rounds <= 1
    }
}

/// All bonds in the game, iterated in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondBook {
    bonds: BTreeMap<BondId, Bond>,
    next_id: BondId,
}

impl BondBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new bond under a fresh id
    pub fn issue(&mut self, bond: Bond) -> BondId {
        let id = self.next_id;
        self.next_id = id.next();
        self.bonds.insert(id, bond);
        id
    }

    /// Put a bond back under a known id (used when reverting)
    pub fn restore(&mut self, id: BondId, bond: Bond) {
        self.bonds.insert(id, bond);
    }

    pub fn remove(&mut self, id: BondId) -> Option<Bond> {
        self.bonds.remove(&id)
    }

    pub fn get(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(&id)
    }

    pub fn get_mut(&mut self, id: BondId) -> Option<&mut Bond> {
        self.bonds.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BondId, &Bond)> {
        self.bonds.iter().map(|(id, bond)| (*id, bond))
    }

    /// Bonds of one owner, in creation order
    pub fn owned_by(&self, owner: PlayerIndex) -> impl Iterator<Item = (BondId, &Bond)> {
        self.iter().filter(move |(_, bond)| bond.owner == owner)
    }

    /// Total principal an owner holds in bonds
    pub fn held_by(&self, owner: PlayerIndex) -> Gold {
        self.owned_by(owner)
            .fold(0, |held: Gold, (_, bond)| held.saturating_add(bond.amount))
    }

    pub fn next_id(&self) -> BondId {
        self.next_id
    }

    /// Rewind the id counter (used when reverting an issue)
    pub fn set_next_id(&mut self, id: BondId) {
        self.next_id = id;
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }
}
