use performa_core::storage::KeyValueStore;
use web_sys::Storage;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
enum Area {
  Local,
  Session
}

/// `window.localStorage` or `window.sessionStorage`. Unavailable storage
/// reads as empty; failed writes are dropped.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct BrowserStore {
  area: Area
}

impl BrowserStore {
  pub fn local() -> Self {
    Self {
      area: Area::Local
    }
  }

  pub fn session() -> Self {
    Self {
      area: Area::Session
    }
  }

  fn storage(&self) -> Option<Storage> {
    web_sys::window().and_then(|window| {
      match self.area {
        | Area::Local => window
          .local_storage()
          .ok()
          .flatten(),
        | Area::Session => window
          .session_storage()
          .ok()
          .flatten()
      }
    })
  }
}

impl KeyValueStore for BrowserStore {
  fn get(&self, key: &str) -> Option<String> {
    self.storage().and_then(|storage| {
      storage
        .get_item(key)
        .ok()
        .flatten()
    })
  }

  fn set(&mut self, key: &str, value: &str) {
    if let Some(storage) = self.storage() {
      let _ = storage.set_item(key, value);
    }
  }

  fn remove(&mut self, key: &str) {
    if let Some(storage) = self.storage() {
      let _ = storage.remove_item(key);
    }
  }
}
