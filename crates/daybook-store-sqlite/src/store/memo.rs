//! `MemoRepository` implementation.
//!
//! A memo's label list is materialised on read with one join query across
//! the junction table — it is never stored on the memo row.

use daybook_core::{label::Label, memo::Memo, store::MemoRepository};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawLabel, RawMemo, decode_uuid, encode_dt, encode_uuid},
  store::SqliteStore,
};

const SELECT_MEMO: &str = "SELECT id, user_id, title, content, is_system, \
   created_at, updated_at FROM Memos";

fn read_memo(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawMemo> {
  Ok(RawMemo {
    id:         row.get(0)?,
    user_id:    row.get(1)?,
    title:      row.get(2)?,
    content:    row.get(3)?,
    is_system:  row.get(4)?,
    created_at: row.get(5)?,
    updated_at: row.get(6)?,
  })
}

impl SqliteStore {
  /// One join query across the junction table and `Labels`, ordered by
  /// label name.
  async fn labels_for_memo(&self, memo_id: Uuid) -> Result<Vec<Label>> {
    let memo_str = encode_uuid(memo_id);

    let raws: Vec<RawLabel> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT l.id, l.user_id, l.name, l.description, l.color,
                  l.is_system, l.created_at, l.updated_at
           FROM MemoLabels ml
           JOIN Labels l ON l.id = ml.label_id
           WHERE ml.memo_id = ?1
           ORDER BY l.name ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![memo_str], |row| {
            Ok(RawLabel {
              id:          row.get(0)?,
              user_id:     row.get(1)?,
              name:        row.get(2)?,
              description: row.get(3)?,
              color:       row.get(4)?,
              is_system:   row.get(5)?,
              created_at:  row.get(6)?,
              updated_at:  row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLabel::into_label).collect()
  }

  async fn memo_rows(&self, sql: String, param: Option<String>) -> Result<Vec<Memo>> {
    let raws: Vec<RawMemo> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match param {
          Some(p) => stmt
            .query_map(rusqlite::params![p], read_memo)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], read_memo)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    let mut memos = Vec::with_capacity(raws.len());
    for raw in raws {
      let labels = self.labels_for_memo(decode_uuid(&raw.id)?).await?;
      memos.push(raw.into_memo(labels)?);
    }
    Ok(memos)
  }
}

impl MemoRepository for SqliteStore {
  type Error = Error;

  async fn get_memo(&self, id: Uuid) -> Result<Option<Memo>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMemo> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{SELECT_MEMO} WHERE id = ?1"),
              rusqlite::params![id_str],
              read_memo,
            )
            .optional()?,
        )
      })
      .await?;

    match raw {
      Some(raw) => {
        let labels = self.labels_for_memo(id).await?;
        Ok(Some(raw.into_memo(labels)?))
      }
      None => Ok(None),
    }
  }

  async fn list_memos(&self) -> Result<Vec<Memo>> {
    self
      .memo_rows(format!("{SELECT_MEMO} ORDER BY updated_at DESC"), None)
      .await
  }

  async fn memos_for_user(&self, user_id: Uuid) -> Result<Vec<Memo>> {
    self
      .memo_rows(
        format!("{SELECT_MEMO} WHERE user_id = ?1 ORDER BY updated_at DESC"),
        Some(encode_uuid(user_id)),
      )
      .await
  }

  async fn add_memo(&self, memo: Memo) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO Memos (
             id, user_id, title, content, is_system, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            encode_uuid(memo.id),
            encode_uuid(memo.user_id),
            memo.title,
            memo.content,
            memo.is_system,
            encode_dt(memo.created_at),
            encode_dt(memo.updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_memo(&self, memo: Memo) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE Memos SET title = ?2, content = ?3, updated_at = ?4
           WHERE id = ?1 AND is_system = 0",
          rusqlite::params![
            encode_uuid(memo.id),
            memo.title,
            memo.content,
            encode_dt(memo.updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_memo(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM Memos WHERE id = ?1 AND is_system = 0",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn attach_label(&self, memo_id: Uuid, label_id: Uuid) -> Result<()> {
    let memo_str = encode_uuid(memo_id);
    let label_str = encode_uuid(label_id);

    // OR IGNORE: attaching the same pair twice is a no-op, not an error.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO MemoLabels (memo_id, label_id) VALUES (?1, ?2)",
          rusqlite::params![memo_str, label_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn detach_label(&self, memo_id: Uuid, label_id: Uuid) -> Result<()> {
    let memo_str = encode_uuid(memo_id);
    let label_str = encode_uuid(label_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM MemoLabels WHERE memo_id = ?1 AND label_id = ?2",
          rusqlite::params![memo_str, label_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
