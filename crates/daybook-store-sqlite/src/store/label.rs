//! `LabelRepository` implementation, including default-set seeding.

use daybook_core::{
  label::{DEFAULT_LABELS, Label, NewLabel},
  store::LabelRepository,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawLabel, encode_dt, encode_uuid},
  store::SqliteStore,
};

const SELECT_LABEL: &str = "SELECT id, user_id, name, description, color, \
   is_system, created_at, updated_at FROM Labels";

fn read_label(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawLabel> {
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
}

impl LabelRepository for SqliteStore {
  type Error = Error;

  async fn get_label(&self, id: Uuid) -> Result<Option<Label>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawLabel> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{SELECT_LABEL} WHERE id = ?1"),
              rusqlite::params![id_str],
              read_label,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLabel::into_label).transpose()
  }

  async fn list_labels(&self) -> Result<Vec<Label>> {
    let raws: Vec<RawLabel> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("{SELECT_LABEL} ORDER BY name ASC"))?;
        let rows = stmt
          .query_map([], read_label)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLabel::into_label).collect()
  }

  async fn labels_for_user(&self, user_id: Uuid) -> Result<Vec<Label>> {
    let user_str = encode_uuid(user_id);

    let raws: Vec<RawLabel> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "{SELECT_LABEL} WHERE user_id = ?1 ORDER BY name ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], read_label)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLabel::into_label).collect()
  }

  async fn add_label(&self, label: Label) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO Labels (
             id, user_id, name, description, color, is_system, created_at,
             updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            encode_uuid(label.id),
            encode_uuid(label.user_id),
            label.name,
            label.description,
            label.color,
            label.is_system,
            encode_dt(label.created_at),
            encode_dt(label.updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_label(&self, label: Label) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE Labels SET
             name = ?2, description = ?3, color = ?4, updated_at = ?5
           WHERE id = ?1 AND is_system = 0",
          rusqlite::params![
            encode_uuid(label.id),
            label.name,
            label.description,
            label.color,
            encode_dt(label.updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_label(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    // Junction rows referencing this label die by the cascade rule, not by
    // explicit code here.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM Labels WHERE id = ?1 AND is_system = 0",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn label_by_name(
    &self,
    user_id: Uuid,
    name: &str,
  ) -> Result<Option<Label>> {
    let user_str = encode_uuid(user_id);
    let name = name.to_owned();

    let raw: Option<RawLabel> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "{SELECT_LABEL} WHERE user_id = ?1 \
                 AND name = ?2 COLLATE NOCASE LIMIT 1"
              ),
              rusqlite::params![user_str, name],
              read_label,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLabel::into_label).transpose()
  }

  async fn seed_default_labels(&self, user_id: Uuid) -> Result<bool> {
    let user_str = encode_uuid(user_id);

    let has_any: bool = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT EXISTS(SELECT 1 FROM Labels WHERE user_id = ?1)",
          rusqlite::params![user_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    if has_any {
      return Ok(false);
    }

    // One insert per label, each its own commit. A failure mid-set leaves a
    // partially seeded user; the skip-if-any guard above then keeps the
    // partial set on retry.
    for (name, color) in DEFAULT_LABELS {
      let mut label = Label::new(NewLabel {
        user_id,
        name: name.to_owned(),
        description: None,
        color: Some(color.to_owned()),
      });
      label.is_system = true;
      self.add_label(label).await?;
    }

    Ok(true)
  }
}
