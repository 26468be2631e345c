//! The validate/run contract shared by every state-changing command

use crate::command::undo::Backup;
use crate::core::error::ValidationError;
use crate::state::GameState;

/// A parsed command that can check itself and then change the game state
///
/// `validate` must not mutate anything; `run` is only called after
/// `validate` succeeded and always completes, returning the backup that
/// reverts exactly what it touched.
pub trait Mutation {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError>;

    /// Checks applied when an exported game is replayed
    ///
    /// Preconditions that only have to hold when a command is first issued
    /// are relaxed here, since the state may have moved on since then.
    fn validate_replay(&self, state: &GameState) -> Result<(), ValidationError> {
        self.validate(state)
    }

    fn run(&self, state: &mut GameState) -> Applied;
}

/// Result of a successful `run`
#[derive(Debug)]
pub struct Applied {
    pub backup: Backup,
    pub summary: String,
}

impl Applied {
    pub fn new(backup: Backup, summary: impl Into<String>) -> Self {
        Self {
            backup,
            summary: summary.into(),
        }
    }
}
