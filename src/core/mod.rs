pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{CommandError, ConfigError, RestoreError, ValidationError};
pub use types::{BondId, Gold, PlayerIndex, Soldiers, Stance};
