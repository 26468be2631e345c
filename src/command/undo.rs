//! Undo log entries and the backups that revert them

use crate::battle::resolution::BattleSnapshot;
use crate::core::types::{BondId, PlayerIndex, Stance};
use crate::state::{Bond, BondBook, GameState, LandMap, Wallet};

/// Minimal slice of state captured before a command mutated it
#[derive(Debug, Clone)]
pub enum Backup {
    /// Previous player count and map length
    PlayerCount { players: usize, map_len: usize },
    Map(LandMap),
    /// Wallets in the order they were captured
    Wallets(Vec<Wallet>),
    Invest {
        wallet: Wallet,
        bond: BondId,
        next_id: BondId,
    },
    Retract {
        wallet: Wallet,
        liquidated: Vec<(BondId, Bond)>,
    },
    OwnerBonds {
        removed: Vec<(BondId, Bond)>,
        issued: Vec<BondId>,
        next_id: BondId,
    },
    EconomyStep {
        wallets: Vec<Wallet>,
        bonds: BondBook,
    },
    ReturnRate(u32),
    WaterDie(u32),
    BattleOpened,
    Declared { stance: Stance, actor: PlayerIndex },
    BattleResolved(Box<BattleSnapshot>),
}

impl Backup {
    /// Undo the command this backup was captured for
    pub fn revert(self, state: &mut GameState) {
        match self {
            Backup::PlayerCount { players, map_len } => {
                state.gold.truncate(players);
                state.soldiers.truncate(players);
                state.map.truncate(map_len);
            }
            Backup::Map(previous) => state.map = previous,
            Backup::Wallets(wallets) => {
                for wallet in wallets.iter().rev() {
                    state.restore_wallet(wallet);
                }
            }
            Backup::Invest {
                wallet,
                bond,
                next_id,
            } => {
                state.bonds.remove(bond);
                state.bonds.set_next_id(next_id);
                state.restore_wallet(&wallet);
            }
            Backup::Retract { wallet, liquidated } => {
                for (id, bond) in liquidated {
                    state.bonds.restore(id, bond);
                }
                state.restore_wallet(&wallet);
            }
            Backup::OwnerBonds {
                removed,
                issued,
                next_id,
            } => {
                for id in issued {
                    state.bonds.remove(id);
                }
                for (id, bond) in removed {
                    state.bonds.restore(id, bond);
                }
                state.bonds.set_next_id(next_id);
            }
            Backup::EconomyStep { wallets, bonds } => {
                state.bonds = bonds;
                for wallet in wallets.iter().rev() {
                    state.restore_wallet(wallet);
                }
            }
            Backup::ReturnRate(previous) => state.default_rate_percent = previous,
            Backup::WaterDie(previous) => state.water_die_percentage = previous,
            Backup::BattleOpened => state.battle.close(),
            Backup::Declared { stance, actor } => {
                state.battle.declarations_mut(stance).remove(actor);
            }
            Backup::BattleResolved(snapshot) => snapshot.restore(state),
        }
    }
}

/// One entry of the undo log
#[derive(Debug, Clone)]
pub enum UndoRecord {
    /// Nothing observable changed: a rejected command or an `undo` itself
    Transparent { command: &'static str },
    Substantive {
        command: &'static str,
        backup: Backup,
    },
}

impl UndoRecord {
    pub fn command(&self) -> &'static str {
        match self {
            UndoRecord::Transparent { command } | UndoRecord::Substantive { command, .. } => command,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, UndoRecord::Transparent { .. })
    }
}
