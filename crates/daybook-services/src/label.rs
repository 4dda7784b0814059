//! Label service — a thin pass-through over the repository, plus id and
//! timestamp assignment.

use chrono::Utc;
use daybook_core::{
  label::{Label, NewLabel},
  store::LabelRepository,
};
use uuid::Uuid;

use crate::{Error, Result};

pub struct LabelService<S> {
  store: S,
}

impl<S> LabelService<S>
where
  S: LabelRepository,
{
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewLabel) -> Result<Label> {
    let label = Label::new(input);
    self
      .store
      .add_label(label.clone())
      .await
      .map_err(Error::storage)?;
    Ok(label)
  }

  pub async fn get(&self, id: Uuid) -> Result<Label> {
    self
      .store
      .get_label(id)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::NotFound(id))
  }

  pub async fn list(&self) -> Result<Vec<Label>> {
    self.store.list_labels().await.map_err(Error::storage)
  }

  pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Label>> {
    self
      .store
      .labels_for_user(user_id)
      .await
      .map_err(Error::storage)
  }

  pub async fn update(&self, mut label: Label) -> Result<Label> {
    label.updated_at = Utc::now();
    self
      .store
      .update_label(label.clone())
      .await
      .map_err(Error::storage)?;
    Ok(label)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete_label(id).await.map_err(Error::storage)
  }

  /// The check half of check-then-create for the soft per-owner name
  /// uniqueness. Callers that skip it may create duplicates — the store
  /// will not stop them.
  pub async fn find_by_name(
    &self,
    user_id: Uuid,
    name: &str,
  ) -> Result<Option<Label>> {
    self
      .store
      .label_by_name(user_id, name)
      .await
      .map_err(Error::storage)
  }
}
