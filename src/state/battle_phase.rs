//! Battle phase - the open/closed flag and the declared attacks and supports

use ahash::AHashMap;
use crate::core::types::{PlayerIndex, Stance};

/// Insertion-ordered mapping from actor to declared target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    order: Vec<PlayerIndex>,
    targets: AHashMap<PlayerIndex, PlayerIndex>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `actor -> target`, returns false if the actor already declared
    pub fn insert(&mut self, actor: PlayerIndex, target: PlayerIndex) -> bool {
        if self.targets.contains_key(&actor) {
            return false;
        }
        self.order.push(actor);
        self.targets.insert(actor, target);
        true
    }

    pub fn remove(&mut self, actor: PlayerIndex) -> Option<PlayerIndex> {
        let target = self.targets.remove(&actor)?;
        if self.order.last() == Some(&actor) {
            self.order.pop();
        } else {
            self.order.retain(|a| *a != actor);
        }
        Some(target)
    }

    pub fn contains(&self, actor: PlayerIndex) -> bool {
        self.targets.contains_key(&actor)
    }

    pub fn target_of(&self, actor: PlayerIndex) -> Option<PlayerIndex> {
        self.targets.get(&actor).copied()
    }

    /// `(actor, target)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (PlayerIndex, PlayerIndex)> + '_ {
        self.order
            .iter()
            .filter_map(move |actor| self.targets.get(actor).map(|target| (*actor, *target)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.targets.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattlePhase {
    pub in_battle: bool,
    pub attacks: Declarations,
    pub supports: Declarations,
}

impl BattlePhase {
    /// Which list, if any, already holds this actor
    pub fn declared(&self, actor: PlayerIndex) -> Option<Stance> {
        if self.attacks.contains(actor) {
            Some(Stance::Attack)
        } else if self.supports.contains(actor) {
            Some(Stance::Support)
        } else {
            None
        }
    }

    pub fn declarations_mut(&mut self, stance: Stance) -> &mut Declarations {
        match stance {
            Stance::Attack => &mut self.attacks,
            Stance::Support => &mut self.supports,
        }
    }

    pub fn declarations(&self, stance: Stance) -> &Declarations {
        match stance {
            Stance::Attack => &self.attacks,
            Stance::Support => &self.supports,
        }
    }

    pub fn open(&mut self) {
        self.in_battle = true;
    }

    /// Close the phase and drop every declaration
    pub fn close(&mut self) {
        self.in_battle = false;
        self.attacks.clear();
        self.supports.clear();
    }
}
