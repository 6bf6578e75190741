use crate::err::MultimapError;

/// What a dispatched command hands back to the session.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
  Ok,
  Exit,
  Info(String),
  Error(MultimapError),
  List(Vec<String>),
}

impl Reply {
  /// The status line shown to the user, if any.
  pub fn message(&self) -> Option<String> {
    match self {
      Reply::Info(message) => Some(format!("INFO: {message}")),
      Reply::Error(e) => Some(format!("ERROR: {e}")),
      Reply::Ok | Reply::Exit | Reply::List(_) => None,
    }
  }
}

impl From<Result<(), MultimapError>> for Reply {
  fn from(value: Result<(), MultimapError>) -> Self {
    match value {
      Ok(()) => Reply::Ok,
      Err(e) => Reply::Error(e),
    }
  }
}

impl From<Vec<String>> for Reply {
  fn from(value: Vec<String>) -> Self {
    Reply::List(value)
  }
}

impl From<MultimapError> for Reply {
  fn from(value: MultimapError) -> Self {
    Reply::Error(value)
  }
}
