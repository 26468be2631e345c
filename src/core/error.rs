use thiserror::Error;

use crate::core::types::{Gold, PlayerIndex, Stance};

/// A command was understood but may not run against the current state.
///
/// Validation errors never leave partial mutations behind: the command is
/// recorded as a transparent undo entry and the state is untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("expected {expected} argument(s), got {got}")]
    Arity { expected: &'static str, got: usize },

    #[error("could not read argument `{value}` as {expected}")]
    BadArgument { value: String, expected: &'static str },

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i128),

    #[error("value must not be negative, got {0}")]
    NegativeValue(i128),

    #[error("player {player} does not exist ({count} players)")]
    UnknownPlayer { player: PlayerIndex, count: usize },

    #[error("player count may only grow: {requested} < {current}")]
    ShrinkingPlayerCount { requested: usize, current: usize },

    #[error("player {player} has only {has} gold, needs {needs}")]
    InsufficientGold {
        player: PlayerIndex,
        has: Gold,
        needs: Gold,
    },

    #[error("player {player} holds only {has} in bonds, needs {needs}")]
    InsufficientBonds {
        player: PlayerIndex,
        has: Gold,
        needs: Gold,
    },

    #[error("player {player} cannot cover a fee of {fee} with {available}")]
    FeeNotCovered {
        player: PlayerIndex,
        available: Gold,
        fee: Gold,
    },

    #[error("map covers {entries} players, needs at least {required}")]
    MapTooShort { entries: usize, required: usize },

    #[error("map links {from} to {to}, which is outside the map")]
    MapLinkOutOfRange { from: usize, to: usize },

    #[error("map links {from} to {to} but not {to} to {from}")]
    MapAsymmetric { from: usize, to: usize },

    #[error("percentage {0} is above 100")]
    PercentageTooLarge(u32),

    #[error("a battle is already being planned")]
    BattleAlreadyOpen,

    #[error("no battle is being planned")]
    BattleNotOpen,

    #[error("player {player} already declared {stance}")]
    AlreadyDeclared { player: PlayerIndex, stance: Stance },

    #[error("player {0} has no soldiers")]
    NoSoldiers(PlayerIndex),

    #[error("player {0} cannot target itself")]
    SelfTarget(PlayerIndex),
}

/// Errors reported by the command engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),

    #[error("could not parse command line: {0}")]
    Parse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("nothing left to undo")]
    LogEmpty,
}

/// Errors loading or checking a [`GameConfig`](crate::core::config::GameConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A replayed state line was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line} (`{text}`): {message}")]
pub struct RestoreError {
    pub line: usize,
    pub text: String,
    pub message: String,
}

pub type Result<T> = std::result::Result<T, CommandError>;
