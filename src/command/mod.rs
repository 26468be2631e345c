//! Command execution pipeline
//!
//! Turns textual commands into reversible state changes:
//! line -> tokenize -> CommandRegistry lookup -> parse -> validate -> run -> UndoRecord

pub mod args;
pub mod engine;
pub mod mutation;
pub mod parser;
pub mod registry;
pub mod undo;

pub use engine::{CommandEngine, Outcome};
pub use mutation::{Applied, Mutation};
pub use registry::{Command, CommandKind, CommandRegistry};
pub use undo::{Backup, UndoRecord};
