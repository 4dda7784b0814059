//! Memo — a titled piece of text owned by one account.
//!
//! A memo's label list is derived, never stored on the memo itself: it is
//! materialised on read through the `MemoLabels` junction table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::label::Label;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memo {
  pub id:         Uuid,
  pub user_id:    Uuid,
  /// Defaults to the empty string; never NULL in storage.
  pub title:      String,
  pub content:    String,
  /// Derived on read; ignored on write. Ordered by label name.
  pub labels:     Vec<Label>,
  pub is_system:  bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Memo {
  /// Build a fresh memo with a time-ordered id and both timestamps stamped
  /// to now. A missing title becomes the empty string.
  pub fn new(input: NewMemo) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::now_v7(),
      user_id: input.user_id,
      title: input.title.unwrap_or_default(),
      content: input.content,
      labels: Vec::new(),
      is_system: false,
      created_at: now,
      updated_at: now,
    }
  }
}

/// Caller-supplied fields for memo creation.
#[derive(Debug, Clone, Default)]
pub struct NewMemo {
  pub user_id: Uuid,
  pub title:   Option<String>,
  pub content: String,
}
