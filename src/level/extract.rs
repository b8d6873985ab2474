//! Structured extraction of level fields
//!
//! Each field is located by its key, then its value is parsed with nom
//! combinators. Trailing commas, single or double quotes and `//` / `/* */`
//! comments inside the literals are accepted. Field order does not matter.

use crate::{level::LevelDefinition, LevelError, Result};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while1},
    character::complete::{char, digit1, multispace1, not_line_ending},
    combinator::{map, map_res, opt, recognize, value},
    error::ErrorKind,
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, separated_pair, terminated, tuple},
    IResult,
};
use std::collections::BTreeMap;

pub const SIZE_KEY: &str = "size";
pub const REGIONS_KEY: &str = "colorRegions";
pub const COLORS_KEY: &str = "regionColors";

/// Extract a level definition from source text
pub fn extract_level(contents: &str) -> Result<LevelDefinition> {
    let size = parse_field(contents, SIZE_KEY, size_value)?;
    let color_regions = parse_field(contents, REGIONS_KEY, grid_value)?;
    let region_colors = parse_field(contents, COLORS_KEY, color_map_value)?;

    Ok(LevelDefinition {
        size,
        color_regions,
        region_colors,
    })
}

/// Run `parser` after each occurrence of `key:` and keep the first value that
/// parses. When every occurrence fails, the first failure is reported.
fn parse_field<'a, O, F>(contents: &'a str, key: &'static str, mut parser: F) -> Result<O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    let mut first_error = None;

    for start in field_positions(contents, key) {
        let error = match parser(&contents[start..]) {
            Ok((_, parsed)) => return Ok(parsed),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => LevelError::MalformedField {
                field: key,
                offset: contents.len() - e.input.len(),
                reason: describe(e.code),
            },
            Err(nom::Err::Incomplete(_)) => LevelError::MalformedField {
                field: key,
                offset: contents.len(),
                reason: "unexpected end of input".to_string(),
            },
        };
        if first_error.is_none() {
            first_error = Some(error);
        }
    }

    Err(first_error.unwrap_or(LevelError::MissingField(key)))
}

fn describe(code: ErrorKind) -> String {
    match code {
        ErrorKind::Char => "unexpected character".to_string(),
        ErrorKind::Digit => "expected an integer".to_string(),
        ErrorKind::MapRes => "integer out of range".to_string(),
        ErrorKind::SeparatedList => "expected at least one entry".to_string(),
        other => format!("unexpected input ({})", other.description()),
    }
}

/// Byte offsets just past every `key:` where `key` stands as its own
/// (optionally quoted) property name rather than as part of a longer identifier.
fn field_positions<'a>(contents: &'a str, key: &'a str) -> impl Iterator<Item = usize> + 'a {
    contents.match_indices(key).filter_map(move |(start, _)| {
        let before = contents[..start].chars().next_back();
        if before.is_some_and(is_ident_char) {
            return None;
        }

        let mut after = &contents[start + key.len()..];
        if let Some(quote) = before.filter(|c| *c == '"' || *c == '\'') {
            after = after.strip_prefix(quote)?;
        }

        let rest = after.trim_start().strip_prefix(':')?;
        Some(contents.len() - rest.len())
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn ws(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((multispace1, line_comment, block_comment))))(input)
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("//"), not_line_ending))(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

fn lexeme<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(ws, inner, ws)
}

/// `[ item, item, ... ]` with an optional trailing comma; at least one item
fn bracketed_list<'a, O, F>(item: F) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<O>>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(
        lexeme(char('[')),
        terminated(
            separated_list1(lexeme(char(',')), item),
            opt(lexeme(char(','))),
        ),
        lexeme(char(']')),
    )
}

fn string_literal(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), is_not("\""), char('"')),
        delimited(char('\''), is_not("'"), char('\'')),
    ))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(is_ident_char)(input)
}

/// `name` or `colors.name`
fn identifier_path(input: &str) -> IResult<&str, &str> {
    recognize(pair(identifier, many0(pair(char('.'), identifier))))(input)
}

fn size_value(input: &str) -> IResult<&str, usize> {
    lexeme(map_res(digit1, str::parse::<usize>))(input)
}

fn grid_row(input: &str) -> IResult<&str, Vec<String>> {
    bracketed_list(map(lexeme(string_literal), str::to_string))(input)
}

fn grid_value(input: &str) -> IResult<&str, Vec<Vec<String>>> {
    bracketed_list(grid_row)(input)
}

fn color_entry(input: &str) -> IResult<&str, (String, String)> {
    map(
        separated_pair(
            lexeme(alt((string_literal, identifier))),
            char(':'),
            lexeme(alt((string_literal, identifier_path))),
        ),
        |(letter, color): (&str, &str)| (letter.to_string(), color.to_string()),
    )(input)
}

/// `{ A: red, B: "blue", }`; later duplicates overwrite earlier ones
fn color_map_value(input: &str) -> IResult<&str, BTreeMap<String, String>> {
    map(
        delimited(
            lexeme(char('{')),
            terminated(
                separated_list0(lexeme(char(',')), color_entry),
                opt(lexeme(char(','))),
            ),
            lexeme(char('}')),
        ),
        |entries: Vec<(String, String)>| entries.into_iter().collect(),
    )(input)
}
