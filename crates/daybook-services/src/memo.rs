//! Memo service — pass-through plus stamping, and the label-association
//! operations.

use chrono::Utc;
use daybook_core::{
  memo::{Memo, NewMemo},
  store::MemoRepository,
};
use uuid::Uuid;

use crate::{Error, Result};

pub struct MemoService<S> {
  store: S,
}

impl<S> MemoService<S>
where
  S: MemoRepository,
{
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewMemo) -> Result<Memo> {
    let memo = Memo::new(input);
    self
      .store
      .add_memo(memo.clone())
      .await
      .map_err(Error::storage)?;
    Ok(memo)
  }

  pub async fn get(&self, id: Uuid) -> Result<Memo> {
    self
      .store
      .get_memo(id)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::NotFound(id))
  }

  pub async fn list(&self) -> Result<Vec<Memo>> {
    self.store.list_memos().await.map_err(Error::storage)
  }

  pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Memo>> {
    self
      .store
      .memos_for_user(user_id)
      .await
      .map_err(Error::storage)
  }

  pub async fn update(&self, mut memo: Memo) -> Result<Memo> {
    memo.updated_at = Utc::now();
    self
      .store
      .update_memo(memo.clone())
      .await
      .map_err(Error::storage)?;
    Ok(memo)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete_memo(id).await.map_err(Error::storage)
  }

  /// Idempotent: attaching an already-attached pair is a no-op.
  pub async fn attach_label(&self, memo_id: Uuid, label_id: Uuid) -> Result<()> {
    self
      .store
      .attach_label(memo_id, label_id)
      .await
      .map_err(Error::storage)
  }

  /// Detaching a pair that does not exist is a no-op.
  pub async fn detach_label(&self, memo_id: Uuid, label_id: Uuid) -> Result<()> {
    self
      .store
      .detach_label(memo_id, label_id)
      .await
      .map_err(Error::storage)
  }
}
