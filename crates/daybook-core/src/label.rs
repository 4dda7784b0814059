//! Label — a per-account tag that memos can be associated with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colour assigned when the caller does not pick one.
pub const DEFAULT_LABEL_COLOR: &str = "#9ca3af";

/// The fixed label set seeded for every new account, in seed order.
/// All seeded labels are system records.
pub const DEFAULT_LABELS: [(&str, &str); 10] = [
  ("Personal", "#3b82f6"),
  ("Work", "#8b5cf6"),
  ("Important", "#ef4444"),
  ("Ideas", "#f59e0b"),
  ("Tasks", "#10b981"),
  ("Finance", "#14b8a6"),
  ("Health", "#ec4899"),
  ("Travel", "#06b6d4"),
  ("Shopping", "#84cc16"),
  ("Archive", "#6b7280"),
];

/// A named, coloured tag owned by one account.
///
/// Name uniqueness per owner is a soft invariant: the store only offers a
/// case-insensitive lookup helper, it never rejects a duplicate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
  pub id:          Uuid,
  pub user_id:     Uuid,
  pub name:        String,
  pub description: Option<String>,
  pub color:       String,
  pub is_system:   bool,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Label {
  /// Build a fresh label with a time-ordered id and both timestamps stamped
  /// to now. A missing colour falls back to [`DEFAULT_LABEL_COLOR`].
  pub fn new(input: NewLabel) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::now_v7(),
      user_id: input.user_id,
      name: input.name,
      description: input.description,
      color: input.color.unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_owned()),
      is_system: false,
      created_at: now,
      updated_at: now,
    }
  }
}

/// Caller-supplied fields for label creation.
#[derive(Debug, Clone, Default)]
pub struct NewLabel {
  pub user_id:     Uuid,
  pub name:        String,
  pub description: Option<String>,
  pub color:       Option<String>,
}
