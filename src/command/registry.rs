//! Command registry - maps command names to their kinds
//!
//! The set of kinds is closed: each one knows how to parse its arguments
//! into a typed command and how to describe the part of the state it owns,
//! so that replaying every kind's description rebuilds the game.

use ahash::AHashMap;

use crate::battle::{Declare, ResolveBattle, StartBattle};
use crate::command::mutation::Mutation;
use crate::core::error::ValidationError;
use crate::core::types::Stance;
use crate::economy::{
    BuySoldiers, Invest, Retract, RunEconomyStep, SetBonds, SetGold, SetMap, SetPlayerCount,
    SetReturnRate, SetSoldiers, SetWaterDie, TransferGold,
};
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    SetPlayerCount,
    SetMap,
    SetGold,
    SetSoldiers,
    SetBonds,
    SetReturnRate,
    SetWaterDie,
    TransferGold,
    BuySoldiers,
    Invest,
    Retract,
    RunEconomyStep,
    StartBattle,
    DeclareAttack,
    DeclareSupport,
    ResolveBattle,
    Undo,
}

impl CommandKind {
    /// Every kind, in the order their state descriptions are exported
    pub const ALL: [CommandKind; 17] = [
        CommandKind::SetPlayerCount,
        CommandKind::SetMap,
        CommandKind::SetGold,
        CommandKind::SetSoldiers,
        CommandKind::SetBonds,
        CommandKind::SetReturnRate,
        CommandKind::SetWaterDie,
        CommandKind::TransferGold,
        CommandKind::BuySoldiers,
        CommandKind::Invest,
        CommandKind::Retract,
        CommandKind::RunEconomyStep,
        CommandKind::StartBattle,
        CommandKind::DeclareAttack,
        CommandKind::DeclareSupport,
        CommandKind::ResolveBattle,
        CommandKind::Undo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::SetPlayerCount => "set-player-count",
            CommandKind::SetMap => "set-map",
            CommandKind::SetGold => "set-gold",
            CommandKind::SetSoldiers => "set-soldiers",
            CommandKind::SetBonds => "set-bonds",
            CommandKind::SetReturnRate => "set-return-rate",
            CommandKind::SetWaterDie => "set-water-die",
            CommandKind::TransferGold => "transfer-gold",
            CommandKind::BuySoldiers => "buy-soldiers",
            CommandKind::Invest => "invest",
            CommandKind::Retract => "retract",
            CommandKind::RunEconomyStep => "run-economy-step",
            CommandKind::StartBattle => "start-battle",
            CommandKind::DeclareAttack => "declare-attack",
            CommandKind::DeclareSupport => "declare-support",
            CommandKind::ResolveBattle => "resolve-battle",
            CommandKind::Undo => "undo",
        }
    }

    /// One-line usage shown by `help`
    pub fn summary(&self) -> &'static str {
        match self {
            CommandKind::SetPlayerCount => "<count>: grow the number of players",
            CommandKind::SetMap => "[[links]...]: load a symmetric land map, e.g. [[1],[0]]",
            CommandKind::SetGold => "<player> <gold>: set a player's gold",
            CommandKind::SetSoldiers => "<player> <soldiers>: set a player's soldiers",
            CommandKind::SetBonds => {
                "<player> [[amount,rounds,rate]...]: replace a player's bond holdings"
            }
            CommandKind::SetReturnRate => "<percent>: default interest for new bonds",
            CommandKind::SetWaterDie => "<percent>: soldiers lost by attackers crossing the sea",
            CommandKind::TransferGold => "<from> <to> <amount>: move gold between players",
            CommandKind::BuySoldiers => "<player> <amount>: buy soldiers at one gold each",
            CommandKind::Invest => "<player> <amount> <rounds> [rate]: lock gold in a bond",
            CommandKind::Retract => "<player> <amount> <fee>: cash in bonds early",
            CommandKind::RunEconomyStep => "pay bond interest and release matured bonds",
            CommandKind::StartBattle => "begin planning a battle",
            CommandKind::DeclareAttack => "<player> <target>: attack a player",
            CommandKind::DeclareSupport => "<player> <ally>: support another player",
            CommandKind::ResolveBattle => "fight every declared engagement",
            CommandKind::Undo => "undo the last command that changed something",
        }
    }

    /// Turn raw arguments into a typed command
    pub fn parse(&self, raw: &[&str]) -> Result<Command, ValidationError> {
        Ok(match self {
            CommandKind::SetPlayerCount => Command::SetPlayerCount(SetPlayerCount::parse(raw)?),
            CommandKind::SetMap => Command::SetMap(SetMap::parse(raw)?),
            CommandKind::SetGold => Command::SetGold(SetGold::parse(raw)?),
            CommandKind::SetSoldiers => Command::SetSoldiers(SetSoldiers::parse(raw)?),
            CommandKind::SetBonds => Command::SetBonds(SetBonds::parse(raw)?),
            CommandKind::SetReturnRate => Command::SetReturnRate(SetReturnRate::parse(raw)?),
            CommandKind::SetWaterDie => Command::SetWaterDie(SetWaterDie::parse(raw)?),
            CommandKind::TransferGold => Command::TransferGold(TransferGold::parse(raw)?),
            CommandKind::BuySoldiers => Command::BuySoldiers(BuySoldiers::parse(raw)?),
            CommandKind::Invest => Command::Invest(Invest::parse(raw)?),
            CommandKind::Retract => Command::Retract(Retract::parse(raw)?),
            CommandKind::RunEconomyStep => Command::RunEconomyStep(RunEconomyStep::parse(raw)?),
            CommandKind::StartBattle => Command::StartBattle(StartBattle::parse(raw)?),
            CommandKind::DeclareAttack => Command::Declare(Declare::parse(Stance::Attack, raw)?),
            CommandKind::DeclareSupport => {
                Command::Declare(Declare::parse(Stance::Support, raw)?)
            }
            CommandKind::ResolveBattle => Command::ResolveBattle(ResolveBattle::parse(raw)?),
            CommandKind::Undo => {
                crate::command::args::arity(raw, 0, 0, "no")?;
                Command::Undo
            }
        })
    }

    /// Command lines that rebuild the part of the state this kind owns
    pub fn describe(&self, state: &GameState) -> Vec<String> {
        match self {
            CommandKind::SetPlayerCount => SetPlayerCount::describe(state),
            CommandKind::SetMap => SetMap::describe(state),
            CommandKind::SetGold => SetGold::describe(state),
            CommandKind::SetSoldiers => SetSoldiers::describe(state),
            CommandKind::SetBonds => SetBonds::describe(state),
            CommandKind::SetReturnRate => SetReturnRate::describe(state),
            CommandKind::SetWaterDie => SetWaterDie::describe(state),
            CommandKind::StartBattle => StartBattle::describe(state),
            CommandKind::DeclareAttack => Declare::describe(Stance::Attack, state),
            CommandKind::DeclareSupport => Declare::describe(Stance::Support, state),
            CommandKind::TransferGold
            | CommandKind::BuySoldiers
            | CommandKind::Invest
            | CommandKind::Retract
            | CommandKind::RunEconomyStep
            | CommandKind::ResolveBattle
            | CommandKind::Undo => Vec::new(),
        }
    }
}

/// A parsed command, ready to validate and run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetPlayerCount(SetPlayerCount),
    SetMap(SetMap),
    SetGold(SetGold),
    SetSoldiers(SetSoldiers),
    SetBonds(SetBonds),
    SetReturnRate(SetReturnRate),
    SetWaterDie(SetWaterDie),
    TransferGold(TransferGold),
    BuySoldiers(BuySoldiers),
    Invest(Invest),
    Retract(Retract),
    RunEconomyStep(RunEconomyStep),
    StartBattle(StartBattle),
    Declare(Declare),
    ResolveBattle(ResolveBattle),
    Undo,
}

impl Command {
    /// The state-changing half of the command; `None` for `undo`
    pub fn as_mutation(&self) -> Option<&dyn Mutation> {
        let mutation: &dyn Mutation = match self {
            Command::SetPlayerCount(cmd) => cmd,
            Command::SetMap(cmd) => cmd,
            Command::SetGold(cmd) => cmd,
            Command::SetSoldiers(cmd) => cmd,
            Command::SetBonds(cmd) => cmd,
            Command::SetReturnRate(cmd) => cmd,
            Command::SetWaterDie(cmd) => cmd,
            Command::TransferGold(cmd) => cmd,
            Command::BuySoldiers(cmd) => cmd,
            Command::Invest(cmd) => cmd,
            Command::Retract(cmd) => cmd,
            Command::RunEconomyStep(cmd) => cmd,
            Command::StartBattle(cmd) => cmd,
            Command::Declare(cmd) => cmd,
            Command::ResolveBattle(cmd) => cmd,
            Command::Undo => return None,
        };
        Some(mutation)
    }
}

/// Name lookup over the registered command kinds
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    by_name: AHashMap<&'static str, CommandKind>,
    order: Vec<CommandKind>,
}

impl CommandRegistry {
    /// A registry with no commands
    pub fn empty() -> Self {
        Self {
            by_name: AHashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a kind; registering twice keeps the first position
    pub fn register(&mut self, kind: CommandKind) {
        if self.by_name.insert(kind.name(), kind).is_none() {
            self.order.push(kind);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<CommandKind> {
        self.by_name.get(name).copied()
    }

    /// Registered kinds in registration order
    pub fn kinds(&self) -> &[CommandKind] {
        &self.order
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for kind in CommandKind::ALL {
            registry.register(kind);
        }
        registry
    }
}
