//! Command line tokenizer
//!
//! Splits a line on whitespace, except inside brackets: `set-map [[1], [0]]`
//! yields `set-map` and `[[1], [0]]`. Brackets may nest and must balance.

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{all_consuming, recognize};
use nom::multi::{many0, separated_list0};
use nom::sequence::delimited;
use nom::{IResult, Parser};

use crate::core::error::CommandError;

fn bracketed(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('['),
        many0(alt((take_while1(|c: char| c != '[' && c != ']'), bracketed))),
        char(']'),
    ))
    .parse(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '[' && c != ']').parse(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    alt((bracketed, word)).parse(input)
}

/// Split a command line into its name and arguments
pub fn tokenize(line: &str) -> Result<Vec<&str>, CommandError> {
    all_consuming(delimited(
        multispace0,
        separated_list0(multispace1, token),
        multispace0,
    ))
    .parse(line)
    .map(|(_, tokens)| tokens)
    .map_err(|e| CommandError::Parse(e.to_string()))
}
