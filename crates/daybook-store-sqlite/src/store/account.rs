//! `AccountRepository` implementation.

use daybook_core::{account::Account, store::AccountRepository};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawAccount, encode_date, encode_dt, encode_role, encode_uuid},
  store::SqliteStore,
};

const SELECT_ACCOUNT: &str = "SELECT id, username, password_hash, email, \
   first_name, last_name, phone, date_of_birth, bio, avatar_url, role, \
   is_active, is_system, created_at, updated_at FROM Users";

fn read_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAccount> {
  Ok(RawAccount {
    id:            row.get(0)?,
    username:      row.get(1)?,
    password_hash: row.get(2)?,
    email:         row.get(3)?,
    first_name:    row.get(4)?,
    last_name:     row.get(5)?,
    phone:         row.get(6)?,
    date_of_birth: row.get(7)?,
    bio:           row.get(8)?,
    avatar_url:    row.get(9)?,
    role:          row.get(10)?,
    is_active:     row.get(11)?,
    is_system:     row.get(12)?,
    created_at:    row.get(13)?,
    updated_at:    row.get(14)?,
  })
}

impl AccountRepository for SqliteStore {
  type Error = Error;

  async fn get_account(&self, id: Uuid) -> Result<Option<Account>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{SELECT_ACCOUNT} WHERE id = ?1"),
              rusqlite::params![id_str],
              read_account,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAccount::into_account).transpose()
  }

  async fn list_accounts(&self) -> Result<Vec<Account>> {
    let raws: Vec<RawAccount> = self
      .conn
      .call(|conn| {
        // `username` carries NOCASE collation, so the ordering is
        // case-insensitive.
        let mut stmt =
          conn.prepare(&format!("{SELECT_ACCOUNT} ORDER BY username ASC"))?;
        let rows = stmt
          .query_map([], read_account)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAccount::into_account).collect()
  }

  async fn add_account(&self, account: Account) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO Users (
             id, username, password_hash, email, first_name, last_name,
             phone, date_of_birth, bio, avatar_url, role, is_active,
             is_system, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
          rusqlite::params![
            encode_uuid(account.id),
            account.username,
            account.password_hash,
            account.email,
            account.first_name,
            account.last_name,
            account.phone,
            account.date_of_birth.map(encode_date),
            account.bio,
            account.avatar_url,
            encode_role(account.role),
            account.is_active,
            account.is_system,
            encode_dt(account.created_at),
            encode_dt(account.updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_account(&self, account: Account) -> Result<()> {
    // The is_system guard lives in the predicate itself: even a concurrent
    // flag flip between a caller's check and this statement cannot make the
    // write land. Zero matched rows is not an error here.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE Users SET
             username = ?2, password_hash = ?3, email = ?4, first_name = ?5,
             last_name = ?6, phone = ?7, date_of_birth = ?8, bio = ?9,
             avatar_url = ?10, role = ?11, is_active = ?12, updated_at = ?13
           WHERE id = ?1 AND is_system = 0",
          rusqlite::params![
            encode_uuid(account.id),
            account.username,
            account.password_hash,
            account.email,
            account.first_name,
            account.last_name,
            account.phone,
            account.date_of_birth.map(encode_date),
            account.bio,
            account.avatar_url,
            encode_role(account.role),
            account.is_active,
            encode_dt(account.updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_account(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM Users WHERE id = ?1 AND is_system = 0",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn username_exists(&self, username: &str) -> Result<bool> {
    let username = username.to_owned();

    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM Users WHERE username = ?1 COLLATE NOCASE)",
            rusqlite::params![username],
            |row| row.get(0),
          )?)
        })
        .await?,
    )
  }

  async fn email_exists(&self, email: &str) -> Result<bool> {
    let email = email.to_owned();

    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM Users WHERE email = ?1 COLLATE NOCASE)",
            rusqlite::params![email],
            |row| row.get(0),
          )?)
        })
        .await?,
    )
  }
}
