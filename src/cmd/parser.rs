use crate::cmd::{Command, Operands};

use nom::{
  bytes::complete::take_till1, character::complete::multispace1, multi::separated_list0,
  IResult,
};

fn token(i: &str) -> IResult<&str, &str> {
  take_till1(char::is_whitespace)(i)
}

fn tokens(i: &str) -> IResult<&str, Vec<&str>> {
  separated_list0(multispace1, token)(i)
}

fn sanitize(line: &str) -> String {
  line.replace('\t', " ").trim().to_string()
}

/// Turns one input line into a `Command`.
///
/// The verb is upper-cased; key and member are kept verbatim. Everything after
/// the key is the member, its words rejoined with single spaces.
pub fn parse(line: &str) -> Command {
  let line = sanitize(line);
  // separated_list0 yields an empty list rather than failing on a trimmed line
  let words = tokens(&line).map(|(_, words)| words).unwrap_or_default();

  let mut words = words.into_iter();
  let verb = words.next().unwrap_or_default().to_uppercase();
  let key = words.next();
  let member = words.collect::<Vec<_>>().join(" ");

  let operands = match key {
    None => Operands::None,
    Some(key) if member.is_empty() => Operands::Key(key.to_string()),
    Some(key) => Operands::KeyMember(key.to_string(), member),
  };

  Command { verb, operands }
}
