//! Command engine - dispatch, execution and the undo log
//!
//! The engine owns the game state. A command is looked up by name, parsed,
//! validated and run; whatever happens, a record goes on the undo log.
//! Rejected commands leave a transparent record that `undo` steps over.

use std::fs;
use std::io;
use std::path::Path;

use crate::command::parser::tokenize;
use crate::command::registry::{Command, CommandKind, CommandRegistry};
use crate::command::undo::UndoRecord;
use crate::core::config::GameConfig;
use crate::core::error::{CommandError, RestoreError, Result};
use crate::state::GameState;

/// Feedback for one submitted command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl From<Result<String>> for Outcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(message) => Outcome::ok(message),
            Err(err) => Outcome::failed(format!("Error: {}", err)),
        }
    }
}

/// Whether a command is issued now or replayed from an exported game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Live,
    Replay,
}

#[derive(Debug, Clone)]
pub struct CommandEngine {
    state: GameState,
    log: Vec<UndoRecord>,
    registry: CommandRegistry,
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl CommandEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: GameState::new(config),
            log: Vec::new(),
            registry: CommandRegistry::default(),
        }
    }

    /// Rebuild an engine from exported state lines
    ///
    /// Blank lines and `#` comments are skipped. The undo log starts empty.
    pub fn restore<'a>(
        config: &GameConfig,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> std::result::Result<Self, RestoreError> {
        let mut engine = Self::new(config);
        for (index, line) in lines.into_iter().enumerate() {
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            engine.replay_line(text).map_err(|err| RestoreError {
                line: index + 1,
                text: text.to_string(),
                message: err.to_string(),
            })?;
        }
        engine.log.clear();
        tracing::info!(
            "Restored a game of {} players",
            engine.state.player_count()
        );
        Ok(engine)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Number of records on the undo log
    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// Apply a command by name
    pub fn apply(&mut self, name: &str, args: &[&str]) -> Outcome {
        self.execute(name, args).into()
    }

    /// Tokenize a raw line and apply it
    pub fn apply_line(&mut self, line: &str) -> Outcome {
        self.execute_line(line).into()
    }

    /// Reverse the most recent command that changed something
    pub fn undo(&mut self) -> Outcome {
        self.revert_last().into()
    }

    pub fn execute_line(&mut self, line: &str) -> Result<String> {
        self.dispatch_line(line, Mode::Live)
    }

    fn replay_line(&mut self, line: &str) -> Result<String> {
        self.dispatch_line(line, Mode::Replay)
    }

    fn dispatch_line(&mut self, line: &str, mode: Mode) -> Result<String> {
        let tokens = tokenize(line)?;
        let Some((name, args)) = tokens.split_first() else {
            return Err(CommandError::Parse("empty command line".to_string()));
        };
        self.dispatch(name, args, mode)
    }

    /// Run a command and record it on the undo log
    ///
    /// Unknown names are reported without touching the log. Anything else
    /// leaves exactly one record: substantive on success, transparent when
    /// the command was rejected.
    pub fn execute(&mut self, name: &str, args: &[&str]) -> Result<String> {
        self.dispatch(name, args, Mode::Live)
    }

    fn dispatch(&mut self, name: &str, args: &[&str], mode: Mode) -> Result<String> {
        let Some(kind) = self.registry.lookup(name) else {
            tracing::debug!("Unknown command '{}'", name);
            return Err(CommandError::UnknownCommand(name.to_string()));
        };
        let command = kind.name();
        tracing::debug!("Running {} {:?}", command, args);

        let parsed = match kind.parse(args) {
            Ok(parsed) => parsed,
            Err(err) => return Err(self.reject(command, err.into())),
        };

        let Some(mutation) = parsed.as_mutation() else {
            debug_assert!(matches!(parsed, Command::Undo));
            self.log.push(UndoRecord::Transparent { command });
            return self.revert_last();
        };

        let checked = match mode {
            Mode::Live => mutation.validate(&self.state),
            Mode::Replay => mutation.validate_replay(&self.state),
        };
        if let Err(err) = checked {
            return Err(self.reject(command, err.into()));
        }

        let applied = mutation.run(&mut self.state);
        tracing::info!("{}: {}", command, applied.summary);
        self.log.push(UndoRecord::Substantive {
            command,
            backup: applied.backup,
        });
        Ok(applied.summary)
    }

    fn reject(&mut self, command: &'static str, err: CommandError) -> CommandError {
        tracing::warn!("{} rejected: {}", command, err);
        self.log.push(UndoRecord::Transparent { command });
        err
    }

    /// Pop records until one actually reverts something
    fn revert_last(&mut self) -> Result<String> {
        let mut skipped = 0;
        while let Some(record) = self.log.pop() {
            match record {
                UndoRecord::Transparent { .. } => skipped += 1,
                UndoRecord::Substantive { command, backup } => {
                    backup.revert(&mut self.state);
                    tracing::info!("Undid {} (skipped {} transparent)", command, skipped);
                    return Ok(format!("Undid {}", command));
                }
            }
        }
        tracing::warn!("Undo log exhausted after skipping {}", skipped);
        Err(CommandError::LogEmpty)
    }

    /// Command lines that rebuild the current state, kind by kind
    pub fn export_state(&self) -> Vec<String> {
        self.registry
            .kinds()
            .iter()
            .flat_map(|kind| kind.describe(&self.state))
            .collect()
    }

    /// Rewrite `path` with the current export, one command per line
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut saved = self.export_state().join("\n");
        saved.push('\n');
        fs::write(path, saved)?;
        tracing::debug!("Saved game to {}", path.display());
        Ok(())
    }

    /// `name: usage` for every registered command
    pub fn help(&self) -> Vec<String> {
        self.registry
            .kinds()
            .iter()
            .map(|kind: &CommandKind| format!("{}: {}", kind.name(), kind.summary()))
            .collect()
    }
}
