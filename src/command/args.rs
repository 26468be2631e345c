//! Positional argument readers shared by every command kind
//!
//! Each reader turns a raw token into a typed value or a
//! [`ValidationError`], so a badly typed command is recorded like any other
//! rejected command.

use serde::de::DeserializeOwned;

use crate::core::error::ValidationError;
use crate::core::types::{Gold, PlayerIndex};

/// Require between `min` and `max` arguments
pub fn arity(
    args: &[&str],
    min: usize,
    max: usize,
    expected: &'static str,
) -> Result<(), ValidationError> {
    if args.len() < min || args.len() > max {
        return Err(ValidationError::Arity {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn integer(arg: &str) -> Result<i128, ValidationError> {
    arg.trim().parse::<i128>().map_err(|_| ValidationError::BadArgument {
        value: arg.to_string(),
        expected: "an integer",
    })
}

/// A player index (any non-negative integer, range is checked by validation)
pub fn player(arg: &str) -> Result<PlayerIndex, ValidationError> {
    let value = integer(arg)?;
    PlayerIndex::try_from(value).map_err(|_| ValidationError::BadArgument {
        value: arg.to_string(),
        expected: "a player index",
    })
}

/// A quantity that must be strictly positive once validated
///
/// Negative input is rejected here; zero is left for the command's own
/// validation so the error names the amount.
pub fn amount(arg: &str) -> Result<Gold, ValidationError> {
    let value = integer(arg)?;
    if value < 0 {
        return Err(ValidationError::NonPositiveAmount(value));
    }
    to_u64(arg, value)
}

/// A value that may be zero but not negative
pub fn non_negative(arg: &str) -> Result<u64, ValidationError> {
    let value = integer(arg)?;
    if value < 0 {
        return Err(ValidationError::NegativeValue(value));
    }
    to_u64(arg, value)
}

fn to_u64(arg: &str, value: i128) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_| ValidationError::BadArgument {
        value: arg.to_string(),
        expected: "a number below 2^64",
    })
}

/// A small non-negative count such as lock rounds or a percentage
pub fn small(arg: &str) -> Result<u32, ValidationError> {
    let value = non_negative(arg)?;
    u32::try_from(value).map_err(|_| ValidationError::BadArgument {
        value: arg.to_string(),
        expected: "a number below 2^32",
    })
}

/// A bracketed payload such as `[[1],[0]]`
pub fn payload<T: DeserializeOwned>(arg: &str, expected: &'static str) -> Result<T, ValidationError> {
    serde_json::from_str(arg).map_err(|_| ValidationError::BadArgument {
        value: arg.to_string(),
        expected,
    })
}
