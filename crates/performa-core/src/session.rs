//! Demo sign-in against a built-in user directory.
//!
//! There is no server: the session is a JSON record in local storage.
//! `currentUser` is written; the older `authUser` key is still honoured
//! on read so sessions created by either login page survive.

use serde::{
  Deserialize,
  Serialize
};
use thiserror::Error;
use tracing::{
  info,
  warn
};

use crate::storage::{
  CURRENT_USER_KEY,
  KeyValueStore,
  LEGACY_USER_KEY,
  LOGGED_IN_KEY
};

pub const LOGIN_PAGE: &str = "login.html";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct Session {
  pub name:  String,
  pub email: String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub role:  Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
  pub email:    &'static str,
  pub password: &'static str,
  pub name:     &'static str,
  pub role:     &'static str
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum LoginError {
  #[error("البريد الإلكتروني غير مسجل")]
  UnknownEmail,
  #[error("كلمة المرور غير صحيحة")]
  WrongPassword
}

const BUILTIN_USERS: [UserAccount; 3] = [
  UserAccount {
    email:    "aalfayez@moe.gov.sa",
    password: "123456",
    name:     "الجوهرة الفايز",
    role:     "user"
  },
  UserAccount {
    email:    "admin@moe.gov.sa",
    password: "123456",
    name:     "مدير النظام",
    role:     "admin"
  },
  UserAccount {
    email:    "user@moe.gov.sa",
    password: "123456",
    name:     "مستخدم الوزارة",
    role:     "user"
  }
];

#[derive(Debug, Clone)]
pub struct UserDirectory {
  users: Vec<UserAccount>
}

impl Default for UserDirectory {
  fn default() -> Self {
    Self::builtin()
  }
}

impl UserDirectory {
  pub fn builtin() -> Self {
    Self {
      users: BUILTIN_USERS.to_vec()
    }
  }

  pub fn len(&self) -> usize {
    self.users.len()
  }

  pub fn is_empty(&self) -> bool {
    self.users.is_empty()
  }

  pub fn find(
    &self,
    email: &str
  ) -> Option<&UserAccount> {
    let email = normalize_email(email);
    self
      .users
      .iter()
      .find(|user| user.email == email)
  }

  pub fn authenticate(
    &self,
    email: &str,
    password: &str
  ) -> Result<Session, LoginError> {
    let user = self
      .find(email)
      .ok_or(LoginError::UnknownEmail)?;
    if user.password != password {
      return Err(LoginError::WrongPassword);
    }
    Ok(Session {
      name:  user.name.to_string(),
      email: user.email.to_string(),
      role:  Some(user.role.to_string())
    })
  }
}

pub fn normalize_email(
  raw: &str
) -> String {
  raw.trim().to_lowercase()
}

/// Current session, if any. Unreadable records count as signed out.
pub fn load_session(
  store: &impl KeyValueStore
) -> Option<Session> {
  for key in
    [CURRENT_USER_KEY, LEGACY_USER_KEY]
  {
    let Some(raw) = store.get(key) else {
      continue;
    };
    match serde_json::from_str::<Session>(
      &raw
    ) {
      | Ok(session) => return Some(session),
      | Err(err) => {
        warn!(
          key,
          error = %err,
          "ignoring malformed session record"
        );
      }
    }
  }
  None
}

/// Authenticates and persists the session.
pub fn sign_in(
  directory: &UserDirectory,
  store: &mut impl KeyValueStore,
  email: &str,
  password: &str
) -> Result<Session, LoginError> {
  let session = directory
    .authenticate(email, password)
    .inspect_err(|err| {
      info!(error = %err, "sign-in rejected");
    })?;

  match serde_json::to_string(&session) {
    | Ok(raw) => {
      store.set(CURRENT_USER_KEY, &raw);
      store.set(LOGGED_IN_KEY, "true");
    }
    | Err(err) => {
      warn!(
        error = %err,
        "failed to encode session"
      );
    }
  }
  info!(email = %session.email, "signed in");
  Ok(session)
}

pub fn sign_out(
  store: &mut impl KeyValueStore
) {
  for key in [
    CURRENT_USER_KEY,
    LEGACY_USER_KEY,
    LOGGED_IN_KEY
  ] {
    store.remove(key);
  }
  info!("signed out");
}

pub fn is_login_page(path: &str) -> bool {
  path.contains(LOGIN_PAGE)
}

/// True when `path` must bounce to the login page.
pub fn requires_login(
  path: &str,
  session: Option<&Session>
) -> bool {
  session.is_none() && !is_login_page(path)
}

pub fn profile_label(
  session: &Session
) -> String {
  format!("الحساب: {}", session.name)
}

pub fn avatar_initial(
  session: &Session
) -> String {
  session
    .name
    .chars()
    .next()
    .map(String::from)
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::MemoryStore;

  #[test]
  fn authenticate_normalises_email() {
    let session = UserDirectory::builtin()
      .authenticate(
        "  AAlfayez@MOE.gov.sa ",
        "123456"
      )
      .unwrap();
    assert_eq!(session.name, "الجوهرة الفايز");
    assert_eq!(
      session.email,
      "aalfayez@moe.gov.sa"
    );
  }

  #[test]
  fn authenticate_reports_failures() {
    let directory = UserDirectory::builtin();
    assert_eq!(
      directory
        .authenticate("nobody@moe.gov.sa", "x"),
      Err(LoginError::UnknownEmail)
    );
    let err = directory
      .authenticate("admin@moe.gov.sa", "x")
      .unwrap_err();
    assert_eq!(err, LoginError::WrongPassword);
    assert_eq!(
      err.to_string(),
      "كلمة المرور غير صحيحة"
    );
  }

  #[test]
  fn sign_in_then_out_round_trips() {
    let directory = UserDirectory::builtin();
    let mut store = MemoryStore::default();

    sign_in(
      &directory,
      &mut store,
      "user@moe.gov.sa",
      "123456"
    )
    .unwrap();
    assert_eq!(
      store.get(LOGGED_IN_KEY).as_deref(),
      Some("true")
    );
    let session = load_session(&store).unwrap();
    assert_eq!(session.name, "مستخدم الوزارة");

    sign_out(&mut store);
    assert!(store.is_empty());
    assert_eq!(load_session(&store), None);
  }

  #[test]
  fn failed_sign_in_writes_nothing() {
    let mut store = MemoryStore::default();
    let result = sign_in(
      &UserDirectory::builtin(),
      &mut store,
      "user@moe.gov.sa",
      "654321"
    );
    assert!(result.is_err());
    assert!(store.is_empty());
  }

  #[test]
  fn legacy_key_is_still_read() {
    let mut store = MemoryStore::default();
    store.set(
      LEGACY_USER_KEY,
      r#"{"email":"admin@moe.gov.sa","name":"مدير النظام"}"#
    );

    let session = load_session(&store).unwrap();
    assert_eq!(session.name, "مدير النظام");
    assert_eq!(session.role, None);
  }

  #[test]
  fn malformed_record_means_signed_out() {
    let mut store = MemoryStore::default();
    store.set(CURRENT_USER_KEY, "{not json");
    assert_eq!(load_session(&store), None);
  }

  #[test]
  fn gating_spares_the_login_page() {
    let session = Session {
      name:  "الجوهرة الفايز".to_string(),
      email: "aalfayez@moe.gov.sa".to_string(),
      role:  None
    };
    assert!(requires_login("/tasks.html", None));
    assert!(!requires_login(
      "/login.html",
      None
    ));
    assert!(!requires_login(
      "/tasks.html",
      Some(&session)
    ));
    assert_eq!(
      profile_label(&session),
      "الحساب: الجوهرة الفايز"
    );
    assert_eq!(avatar_initial(&session), "ا");
  }
}
