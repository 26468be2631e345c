//! Battle system - declared attacks resolved into alliance engagements
//!
//! A battle is planned in phases:
//! - `start-battle` opens the phase
//! - players declare attacks on a target or support for another player
//! - `resolve-battle` merges attacks by target, follows support chains to
//!   pick sides, fights each engagement and hands out loot
//!
//! Attackers without a land link to their target pay a sea toll first.

pub mod combat;
pub mod declaration;
pub mod grouping;
pub mod loot;
pub mod resolution;
pub mod support;

// Re-exports for convenient access
pub use combat::{distribute_casualties, sea_attrition, side_strength, BattleOutcome};
pub use declaration::{Declare, StartBattle};
pub use grouping::{group_attacks, Engagement};
pub use loot::{plunder, split_pool, Plunder};
pub use resolution::{
    fight, plan_engagements, resolve, BattleReport, BattleSnapshot, EngagementReport,
    ResolveBattle,
};
pub use support::{enlist_supporters, trace_allegiance, Allegiance};
