use crate::err::MultimapError;
use log::{debug, info};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

static INITIAL_CAPACITY: usize = 256;

/// Ordered multimap: every key maps to a duplicate-free sequence of members.
///
/// Keys are kept in insertion order in `order`, members in insertion order
/// inside their `Vec`. A key is present iff it has at least one member.
pub struct Store {
  dict: HashMap<String, Vec<String>>,
  order: Vec<String>,
}

impl Store {
  pub fn new() -> Store {
    Store {
      dict: HashMap::with_capacity(INITIAL_CAPACITY),
      order: Vec::with_capacity(INITIAL_CAPACITY),
    }
  }

  pub fn add_member(&mut self, key: &str, member: &str) -> Result<(), MultimapError> {
    let members = match self.dict.entry(key.to_string()) {
      Entry::Occupied(entry) => entry.into_mut(),
      Entry::Vacant(entry) => {
        self.order.push(key.to_string());
        debug!("created key={key}");
        entry.insert(Vec::new())
      }
    };

    if members.iter().any(|m| m == member) {
      return Err(MultimapError::AlreadyExists(
        key.to_string(),
        member.to_string(),
      ));
    }
    members.push(member.to_string());

    debug!("added member to key={key}, members_len={}", members.len());
    Ok(())
  }

  pub fn remove_member(&mut self, key: &str, member: &str) -> Result<(), MultimapError> {
    let members = self
      .dict
      .get_mut(key)
      .ok_or_else(|| MultimapError::KeyNotFound(key.to_string()))?;

    let Some(pos) = members.iter().position(|m| m == member) else {
      return Err(MultimapError::MemberNotFound(
        key.to_string(),
        member.to_string(),
      ));
    };

    // last member takes the key with it
    if members.len() == 1 {
      return self.remove_all_members(key);
    }
    members.remove(pos);

    debug!("removed member from key={key}, members_len={}", members.len());
    Ok(())
  }

  pub fn remove_all_members(&mut self, key: &str) -> Result<(), MultimapError> {
    if self.dict.remove(key).is_none() {
      return Err(MultimapError::KeyNotFound(key.to_string()));
    }
    self.order.retain(|k| k != key);

    info!("deleted key={key}, keys_len={}", self.len());
    Ok(())
  }

  pub fn clear(&mut self) {
    let dropped = self.len();
    self.dict.clear();
    self.order.clear();

    info!("cleared store, dropped {dropped} keys");
  }

  pub fn key_exists(&self, key: &str) -> Result<(), MultimapError> {
    if self.dict.contains_key(key) {
      Ok(())
    } else {
      Err(MultimapError::KeyNotFound(key.to_string()))
    }
  }

  pub fn member_exists(&self, key: &str, member: &str) -> Result<(), MultimapError> {
    self.key_exists(key)?;

    match self.dict.get(key) {
      Some(members) if members.iter().any(|m| m == member) => Ok(()),
      _ => Err(MultimapError::MemberNotFound(
        key.to_string(),
        member.to_string(),
      )),
    }
  }

  /// Members of `key` in insertion order; empty when the key is absent.
  pub fn key_members(&self, key: &str) -> Vec<String> {
    self.dict.get(key).map(|m| m.to_vec()).unwrap_or_default()
  }

  pub fn all_keys(&self) -> Vec<String> {
    self.order.to_vec()
  }

  /// Every member of every key, concatenated in key order. Members shared by
  /// several keys appear once per key.
  pub fn all_members(&self) -> Vec<String> {
    self.members_by_key().flat_map(|(_, m)| m.iter().cloned()).collect()
  }

  /// One `"key member"` entry per pair.
  pub fn all_items(&self) -> Vec<String> {
    self
      .members_by_key()
      .flat_map(|(key, members)| members.iter().map(move |m| format!("{key} {m}")))
      .collect()
  }

  /// Members of `a` (in `a`'s order) that `b` also holds. Absent keys count as empty.
  pub fn intersection(&self, a: &str, b: &str) -> Vec<String> {
    match (self.dict.get(a), self.dict.get(b)) {
      (Some(left), Some(right)) => left
        .iter()
        .filter(|m| right.contains(*m))
        .cloned()
        .collect(),
      _ => Vec::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  fn members_by_key(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
    self
      .order
      .iter()
      .filter_map(move |key| self.dict.get(key).map(|members| (key, members)))
  }
}
