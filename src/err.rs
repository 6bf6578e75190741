use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug, PartialEq, Eq)]
pub enum MultimapError {
  /// A known verb with the wrong arguments.
  Syntax(String),
  /// A verb missing from the command table; reported as a syntax error that
  /// names the verb.
  Unknown(String),
  KeyNotFound(String),
  MemberNotFound(String, String),
  AlreadyExists(String, String),
  IO(String),
}

impl fmt::Display for MultimapError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MultimapError::Syntax(verb) => write!(f, "{verb} syntax is invalid."),
      MultimapError::Unknown(verb) => write!(f, "{verb} is not a recognized command."),
      MultimapError::KeyNotFound(key) => write!(f, "Key {key} was not found."),
      MultimapError::MemberNotFound(key, member) => {
        write!(f, "Key {key} Member {member} was not found.")
      }
      MultimapError::AlreadyExists(key, member) => {
        write!(f, "Key {key} Member {member} already exists.")
      }
      MultimapError::IO(message) => write!(f, "{message}"),
    }
  }
}

impl Error for MultimapError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    None
  }
}

impl From<io::Error> for MultimapError {
  fn from(value: io::Error) -> Self {
    MultimapError::IO(format!("IO error: {value}"))
  }
}
