//! Core type definitions used throughout the codebase

use derive_more::Display;

/// Index of a player, `0..player_count`
pub type PlayerIndex = usize;

/// Amount of gold held by a player or locked in a bond
pub type Gold = u64;

/// Number of soldiers a player commands
pub type Soldiers = u64;

/// Unique identifier for bonds
///
/// Ids are handed out in increasing order, so ordering by id is creation order.
#[derive(
    Debug,
    Display,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[display(fmt = "bond#{}", _0)]
pub struct BondId(pub u64);

impl BondId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The id that follows this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// Which declaration list an actor belongs to during the battle phase
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stance {
    #[display(fmt = "attack")]
    Attack,
    #[display(fmt = "support")]
    Support,
}

/// Floor of `value * percent / 100` without intermediate overflow
///
/// Results past `u64::MAX` (rates above 100%) saturate.
pub fn percent_of(value: u64, percent: u32) -> u64 {
    let scaled = u128::from(value) * u128::from(percent) / 100;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
