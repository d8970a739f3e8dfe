use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{one_of, space0, space1},
    combinator::{opt, recognize},
    sequence::{delimited, preceded},
};

use super::ParseResult;

pub fn rawuint(input: &str) -> ParseResult<&str> {
    take_while1(|c: char| c.is_digit(10))(input)
}

pub fn rawint(input: &str) -> ParseResult<&str> {
    recognize(preceded(opt(tag("-")), rawuint))(input)
}

/// Separator between list items: a dash, en dash or comma with optional padding, or bare whitespace.
pub fn list_separator(input: &str) -> ParseResult<&str> {
    alt((recognize(delimited(space0, one_of("-–,"), space0)), space1))(input)
}
