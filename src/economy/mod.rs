//! Economy operations
//!
//! Gold, soldier and bond commands plus the setup commands that size the
//! game. Every command validates first and only then mutates, returning the
//! backup the engine keeps for undo.

pub mod bonds;
pub mod ledger;
pub mod setup;
pub mod step;

pub use bonds::{Invest, Retract, SetBonds};
pub use ledger::{BuySoldiers, SetGold, SetSoldiers, TransferGold};
pub use setup::{SetMap, SetPlayerCount, SetReturnRate, SetWaterDie};
pub use step::RunEconomyStep;
