//! [`SqliteStore`] — the SQLite implementation of every repository contract.
//!
//! One store type, one reference-counted connection. Each repository call is
//! a single scoped closure on the connection; acquisition and release are
//! deterministic, including on error paths. A single statement is atomic but
//! multi-statement aggregate writes are NOT wrapped in a transaction — each
//! insert is its own commit, and a crash mid-sequence leaves the partial
//! state observable.

mod account;
mod contact;
mod label;
mod memo;

use std::path::Path;

use daybook_core::{
  account::{Account, NewAccount, Role, SYSTEM_USERNAME},
  store::{AccountRepository as _, LabelRepository as _},
};

use crate::{Result, schema::SCHEMA};

/// Email recorded on the seeded system account.
const SYSTEM_EMAIL: &str = "admin@localhost";

/// A Daybook record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  /// Schema failure here is fatal — no partial-schema recovery is attempted.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Seed the protected system account with a caller-supplied pre-hashed
  /// credential, then seed its default label set.
  ///
  /// Skipped entirely (returns `None`) when any privileged account already
  /// exists. The account insert and each label insert are independent
  /// statements.
  pub async fn seed_system_account(
    &self,
    password_hash: &str,
  ) -> Result<Option<Account>> {
    let privileged_exists: bool = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT EXISTS(SELECT 1 FROM Users WHERE role = 'privileged')",
          [],
          |row| row.get(0),
        )?)
      })
      .await?;

    if privileged_exists {
      return Ok(None);
    }

    let mut account = Account::new(
      NewAccount {
        username: SYSTEM_USERNAME.to_owned(),
        email: SYSTEM_EMAIL.to_owned(),
        role: Role::Privileged,
        ..Default::default()
      },
      password_hash.to_owned(),
    );
    account.is_system = true;

    self.add_account(account.clone()).await?;
    self.seed_default_labels(account.id).await?;

    Ok(Some(account))
  }
}
