pub mod parser;

/// Arguments that followed the verb. The variant is the command's arity, so a
/// member can never be present without a key.
#[derive(Debug, PartialEq, Eq)]
pub enum Operands {
  None,
  Key(String),
  KeyMember(String, String),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Command {
  pub verb: String,
  pub operands: Operands,
}

impl Command {
  pub fn arity(&self) -> u8 {
    match self.operands {
      Operands::None => 0,
      Operands::Key(_) => 1,
      Operands::KeyMember(_, _) => 2,
    }
  }

  pub fn key(&self) -> Option<&str> {
    match &self.operands {
      Operands::None => None,
      Operands::Key(key) | Operands::KeyMember(key, _) => Some(key.as_str()),
    }
  }

  pub fn member(&self) -> Option<&str> {
    match &self.operands {
      Operands::KeyMember(_, member) => Some(member.as_str()),
      _ => None,
    }
  }
}
