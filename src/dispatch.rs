use crate::cmd::{Command, Operands};
use crate::err::MultimapError;
use crate::store::Store;
use crate::value::Reply;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
  /// Changes or checks the store and answers with a status.
  Action,
  /// Answers with a list of strings.
  List,
}

/// The handler's shape is the arity the verb accepts.
enum Handler {
  Nullary(fn(&mut Store) -> Reply),
  Unary(fn(&mut Store, &str) -> Reply),
  Binary(fn(&mut Store, &str, &str) -> Reply),
  Any(fn() -> Reply),
}

struct Entry {
  verb: &'static str,
  kind: Kind,
  handler: Handler,
  usage: &'static str,
}

static COMMANDS: &[Entry] = &[
  Entry {
    verb: "ADD",
    kind: Kind::Action,
    handler: Handler::Binary(add),
    usage: "ADD <key> <member>        add a member to a key",
  },
  Entry {
    verb: "REMOVE",
    kind: Kind::Action,
    handler: Handler::Binary(remove),
    usage: "REMOVE <key> <member>     remove a member, and the key with its last member",
  },
  Entry {
    verb: "KEYEXISTS",
    kind: Kind::Action,
    handler: Handler::Unary(key_exists),
    usage: "KEYEXISTS <key>           check that a key exists",
  },
  Entry {
    verb: "MEMBEREXISTS",
    kind: Kind::Action,
    handler: Handler::Binary(member_exists),
    usage: "MEMBEREXISTS <key> <member> check that a key holds a member",
  },
  Entry {
    verb: "REMOVEALL",
    kind: Kind::Action,
    handler: Handler::Unary(remove_all),
    usage: "REMOVEALL <key>           remove a key and all of its members",
  },
  Entry {
    verb: "CLEAR",
    kind: Kind::Action,
    handler: Handler::Nullary(clear),
    usage: "CLEAR                     remove every key",
  },
  Entry {
    verb: "HELP",
    kind: Kind::Action,
    handler: Handler::Any(help),
    usage: "HELP                      show this list",
  },
  Entry {
    verb: "EXIT",
    kind: Kind::Action,
    handler: Handler::Nullary(exit),
    usage: "EXIT                      leave the session",
  },
  Entry {
    verb: "KEYS",
    kind: Kind::List,
    handler: Handler::Nullary(keys),
    usage: "KEYS                      list every key",
  },
  Entry {
    verb: "MEMBERS",
    kind: Kind::List,
    handler: Handler::Unary(members),
    usage: "MEMBERS <key>             list the members of a key",
  },
  Entry {
    verb: "ALLMEMBERS",
    kind: Kind::List,
    handler: Handler::Nullary(all_members),
    usage: "ALLMEMBERS                list the members of every key",
  },
  Entry {
    verb: "ITEMS",
    kind: Kind::List,
    handler: Handler::Nullary(items),
    usage: "ITEMS                     list every key and member pair",
  },
  Entry {
    verb: "INTERSECTION",
    kind: Kind::List,
    handler: Handler::Binary(intersection),
    usage: "INTERSECTION <key> <key>  list the members two keys share",
  },
];

fn find_command(verb: &str) -> Option<&'static Entry> {
  COMMANDS.iter().find(|entry| entry.verb == verb)
}

fn add(store: &mut Store, key: &str, member: &str) -> Reply {
  store.add_member(key, member).into()
}

fn remove(store: &mut Store, key: &str, member: &str) -> Reply {
  store.remove_member(key, member).into()
}

fn key_exists(store: &mut Store, key: &str) -> Reply {
  store.key_exists(key).into()
}

fn member_exists(store: &mut Store, key: &str, member: &str) -> Reply {
  store.member_exists(key, member).into()
}

fn remove_all(store: &mut Store, key: &str) -> Reply {
  store.remove_all_members(key).into()
}

fn clear(store: &mut Store) -> Reply {
  store.clear();
  Reply::Ok
}

fn exit(_: &mut Store) -> Reply {
  Reply::Exit
}

fn help() -> Reply {
  let mut text = String::from("verbs are case-insensitive, keys and members are not.");
  for kind in [Kind::Action, Kind::List] {
    text.push_str(match kind {
      Kind::Action => "\nActions:",
      Kind::List => "\nLists:",
    });
    for entry in COMMANDS.iter().filter(|entry| entry.kind == kind) {
      text.push_str("\n  ");
      text.push_str(entry.usage);
    }
  }
  Reply::Info(text)
}

fn keys(store: &mut Store) -> Reply {
  store.all_keys().into()
}

fn members(store: &mut Store, key: &str) -> Reply {
  let members = store.key_members(key);
  if members.is_empty() {
    return MultimapError::KeyNotFound(key.to_string()).into();
  }
  members.into()
}

fn all_members(store: &mut Store) -> Reply {
  store.all_members().into()
}

fn items(store: &mut Store) -> Reply {
  store.all_items().into()
}

fn intersection(store: &mut Store, key: &str, other: &str) -> Reply {
  // the member slot carries a second key, which is a single word
  if other.contains(' ') {
    return MultimapError::Syntax("INTERSECTION".to_string()).into();
  }
  store.intersection(key, other).into()
}

/// Owns the session's store and routes parsed commands to it.
pub struct Dispatcher {
  store: Store,
}

impl Dispatcher {
  pub fn new(store: Store) -> Dispatcher {
    Dispatcher { store }
  }

  pub fn store(&self) -> &Store {
    &self.store
  }

  pub fn dispatch(&mut self, cmd: &Command) -> Reply {
    let Some(entry) = find_command(&cmd.verb) else {
      debug!("rejected unknown verb {:?}", cmd.verb);
      return MultimapError::Unknown(cmd.verb.clone()).into();
    };

    let store = &mut self.store;
    let reply = match (&entry.handler, &cmd.operands) {
      (Handler::Any(f), _) => f(),
      (Handler::Nullary(f), Operands::None) => f(store),
      (Handler::Unary(f), Operands::Key(key)) => f(store, key),
      (Handler::Binary(f), Operands::KeyMember(key, member)) => f(store, key, member),
      _ => {
        debug!("rejected {} with arity {}", entry.verb, cmd.arity());
        return MultimapError::Syntax(entry.verb.to_string()).into();
      }
    };

    debug!(
      "dispatched {:?} command {} key={:?} member={:?}",
      entry.kind,
      entry.verb,
      cmd.key(),
      cmd.member()
    );
    reply
  }
}

#[cfg(test)]
mod tests {
  use super::Dispatcher;
  use crate::cmd::parser::parse;
  use crate::err::MultimapError;
  use crate::store::Store;
  use crate::value::Reply;

  fn run(dispatcher: &mut Dispatcher, line: &str) -> Reply {
    dispatcher.dispatch(&parse(line))
  }

  fn dispatcher_with(lines: &[&str]) -> Dispatcher {
    let mut dispatcher = Dispatcher::new(Store::new());
    for line in lines {
      assert_eq!(run(&mut dispatcher, line), Reply::Ok, "{line}");
    }
    dispatcher
  }

  #[test]
  fn test_adds_succeed_silently() {
    let d = dispatcher_with(&["ADD Key1 Mbr1", "ADD Key1 Mbr2", "ADD Key2 Mbr1"]);

    assert_eq!(d.store().all_keys(), vec!["Key1", "Key2"]);
    assert_eq!(d.store().all_members().len(), 3);
  }

  #[test]
  fn test_duplicate_add() {
    let mut d = dispatcher_with(&["ADD Key1 Mbr1"]);
    let reply = run(&mut d, "ADD Key1 Mbr1");

    assert!(reply.message().unwrap().contains("already exists"));
    assert_eq!(d.store().key_members("Key1").len(), 1);
  }

  #[test]
  fn test_remove_last_member() {
    let mut d = dispatcher_with(&["ADD Key1 Mbr1", "REMOVE Key1 Mbr1"]);

    assert_eq!(
      run(&mut d, "KEYEXISTS Key1"),
      Reply::Error(MultimapError::KeyNotFound("Key1".into()))
    );
    assert_eq!(run(&mut d, "KEYS"), Reply::List(vec![]));
  }

  #[test]
  fn test_removeall() {
    let d = dispatcher_with(&[
      "ADD Key1 Mbr1",
      "ADD Key1 Mbr2",
      "ADD Key2 Mbr1",
      "REMOVEALL Key1",
    ]);

    assert_eq!(d.store().all_keys(), vec!["Key2"]);
  }

  #[test]
  fn test_intersection_with_unknown_key() {
    let mut d = dispatcher_with(&["ADD Key1 Mbr1"]);

    assert_eq!(run(&mut d, "INTERSECTION Key1 KeyX"), Reply::List(vec![]));
  }

  #[test]
  fn test_intersection_rejects_multi_word_key() {
    let mut d = dispatcher_with(&["ADD Key1 Mbr1"]);

    assert_eq!(
      run(&mut d, "INTERSECTION Key1 Key 2"),
      Reply::Error(MultimapError::Syntax("INTERSECTION".into()))
    );
  }

  #[test]
  fn test_intersection_lists_shared_members() {
    let mut d = dispatcher_with(&["ADD a x", "ADD a y", "ADD b y", "ADD b z"]);

    assert_eq!(
      run(&mut d, "intersection a b"),
      Reply::List(vec!["y".to_string()])
    );
  }

  #[test]
  fn test_wrong_arity_is_a_syntax_error() {
    let mut d = Dispatcher::new(Store::new());
    let cases = [
      ("ADD Key1", "ADD"),
      ("REMOVE", "REMOVE"),
      ("KEYEXISTS Key1 Mbr1", "KEYEXISTS"),
      ("MEMBEREXISTS Key1", "MEMBEREXISTS"),
      ("REMOVEALL Key1 Mbr1", "REMOVEALL"),
      ("CLEAR Key1", "CLEAR"),
      ("EXIT now", "EXIT"),
      ("KEYS Key1", "KEYS"),
      ("MEMBERS", "MEMBERS"),
      ("ALLMEMBERS Key1", "ALLMEMBERS"),
      ("ITEMS Key1 Mbr1", "ITEMS"),
      ("INTERSECTION Key1", "INTERSECTION"),
    ];

    for (line, verb) in cases {
      assert_eq!(
        run(&mut d, line),
        Reply::Error(MultimapError::Syntax(verb.to_string())),
        "{line}"
      );
    }
    assert_eq!(d.store().len(), 0);
  }

  #[test]
  fn test_unknown_verb() {
    let mut d = Dispatcher::new(Store::new());
    let reply = run(&mut d, "frobnicate Key1");

    assert_eq!(
      reply,
      Reply::Error(MultimapError::Unknown("FROBNICATE".into()))
    );
    assert!(reply.message().unwrap().starts_with("ERROR: FROBNICATE"));
  }

  #[test]
  fn test_help_accepts_any_arity() {
    let mut d = Dispatcher::new(Store::new());

    for line in ["HELP", "help ADD", "Help ADD Key1 Mbr1"] {
      let message = run(&mut d, line).message().unwrap();
      assert!(message.starts_with("INFO: "), "{line}");
      assert!(message.contains("INTERSECTION"));
    }
  }

  #[test]
  fn test_exit() {
    let mut d = Dispatcher::new(Store::new());

    assert_eq!(run(&mut d, "exit"), Reply::Exit);
  }

  #[test]
  fn test_members_of_absent_key_is_an_error() {
    let mut d = dispatcher_with(&["ADD Key1 Mbr1"]);

    assert_eq!(
      run(&mut d, "MEMBERS key1"),
      Reply::Error(MultimapError::KeyNotFound("key1".into()))
    );
    assert_eq!(
      run(&mut d, "MEMBERS Key1"),
      Reply::List(vec!["Mbr1".to_string()])
    );
  }

  #[test]
  fn test_member_exists() {
    let mut d = dispatcher_with(&["ADD Key1 Mbr One"]);

    assert_eq!(run(&mut d, "MEMBEREXISTS Key1 Mbr One"), Reply::Ok);
    assert_eq!(
      run(&mut d, "MEMBEREXISTS Key1 mbr one"),
      Reply::Error(MultimapError::MemberNotFound(
        "Key1".into(),
        "mbr one".into()
      ))
    );
  }

  #[test]
  fn test_list_verbs() {
    let mut d = dispatcher_with(&["ADD Key1 Mbr1", "ADD Key2 Mbr1"]);

    assert_eq!(
      run(&mut d, "ALLMEMBERS"),
      Reply::List(vec!["Mbr1".to_string(), "Mbr1".to_string()])
    );
    assert_eq!(
      run(&mut d, "ITEMS"),
      Reply::List(vec!["Key1 Mbr1".to_string(), "Key2 Mbr1".to_string()])
    );
  }

  #[test]
  fn test_clear() {
    let mut d = dispatcher_with(&["ADD Key1 Mbr1", "ADD Key2 Mbr1", "clear"]);

    assert_eq!(run(&mut d, "KEYS"), Reply::List(vec![]));
    assert_eq!(run(&mut d, "CLEAR"), Reply::Ok);
  }
}
