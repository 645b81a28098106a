use std::collections::BTreeMap;

pub const THEME_KEY: &str = "theme";
pub const CURRENT_USER_KEY: &str =
  "currentUser";
pub const LEGACY_USER_KEY: &str =
  "authUser";
pub const LOGGED_IN_KEY: &str =
  "isLoggedIn";
pub const OVERDUE_NOTICE_KEY: &str =
  "overdueNotificationShown";

/// String key-value persistence, shaped after browser `Storage`.
/// Writes are best effort; failures are the implementor's to log.
pub trait KeyValueStore {
  fn get(&self, key: &str) -> Option<String>;

  fn set(&mut self, key: &str, value: &str);

  fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  values: BTreeMap<String, String>
}

impl MemoryStore {
  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: &str) {
    self
      .values
      .insert(key.to_string(), value.to_string());
  }

  fn remove(&mut self, key: &str) {
    self.values.remove(key);
  }
}
