//! Bondwar - turn-based economy and war game with reversible commands

pub mod battle;
pub mod command;
pub mod core;
pub mod economy;
pub mod state;
