//! Account — the owning aggregate for every other record in the store.
//!
//! Labels, memos and contacts all hang off an account and are removed with it
//! (cascade at the storage layer). One account per store is seeded as a
//! system record and is immune to normal update/delete paths.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Username reserved for the seeded system account.
pub const SYSTEM_USERNAME: &str = "admin";

/// Authorisation tier of an account.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[default]
  Standard,
  Privileged,
}

/// A user account with credentials and optional profile fields.
///
/// `password_hash` is always a digest — plaintext credentials never reach
/// this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
  pub id:            Uuid,
  pub username:      String,
  pub password_hash: String,
  pub email:         String,
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub phone:         Option<String>,
  pub date_of_birth: Option<NaiveDate>,
  pub bio:           Option<String>,
  pub avatar_url:    Option<String>,
  pub role:          Role,
  pub is_active:     bool,
  pub is_system:     bool,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

impl Account {
  /// Build a fresh account from caller-supplied fields and an already-hashed
  /// credential. Assigns a time-ordered id and stamps both timestamps to now.
  pub fn new(input: NewAccount, password_hash: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::now_v7(),
      username: input.username,
      password_hash,
      email: input.email,
      first_name: input.first_name,
      last_name: input.last_name,
      phone: input.phone,
      date_of_birth: input.date_of_birth,
      bio: input.bio,
      avatar_url: input.avatar_url,
      role: input.role,
      is_active: true,
      is_system: false,
      created_at: now,
      updated_at: now,
    }
  }

  /// Display name derived from the profile: trimmed first and last names
  /// joined by a space. Whitespace-only components are dropped; `None` when
  /// both are empty. Never an empty string.
  pub fn full_name(&self) -> Option<String> {
    let first = self.first_name.as_deref().map(str::trim).unwrap_or("");
    let last = self.last_name.as_deref().map(str::trim).unwrap_or("");
    match (first.is_empty(), last.is_empty()) {
      (true, true) => None,
      (false, true) => Some(first.to_owned()),
      (true, false) => Some(last.to_owned()),
      (false, false) => Some(format!("{first} {last}")),
    }
  }
}

/// Caller-supplied fields for account creation.
///
/// The credential is plaintext here; the account service hashes it before
/// anything is persisted.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
  pub username:      String,
  pub password:      String,
  pub email:         String,
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub phone:         Option<String>,
  pub date_of_birth: Option<NaiveDate>,
  pub bio:           Option<String>,
  pub avatar_url:    Option<String>,
  pub role:          Role,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn account(first: Option<&str>, last: Option<&str>) -> Account {
    Account::new(
      NewAccount {
        username: "alice".into(),
        email: "alice@example.com".into(),
        first_name: first.map(str::to_owned),
        last_name: last.map(str::to_owned),
        ..Default::default()
      },
      "digest".into(),
    )
  }

  #[test]
  fn full_name_joins_both_components() {
    assert_eq!(
      account(Some("Alice"), Some("Liddell")).full_name().as_deref(),
      Some("Alice Liddell")
    );
  }

  #[test]
  fn full_name_drops_whitespace_components() {
    assert_eq!(
      account(Some("  Alice  "), Some("   ")).full_name().as_deref(),
      Some("Alice")
    );
    assert_eq!(
      account(None, Some(" Liddell ")).full_name().as_deref(),
      Some("Liddell")
    );
  }

  #[test]
  fn full_name_absent_when_both_empty() {
    assert_eq!(account(None, None).full_name(), None);
    assert_eq!(account(Some(""), Some("  ")).full_name(), None);
  }
}
