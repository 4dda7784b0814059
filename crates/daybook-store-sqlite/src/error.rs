//! Error type for `daybook-store-sqlite`.
//!
//! Storage failures are surfaced wrapped, never swallowed. This crate never
//! raises "not found" / "duplicate" / "protected" conditions — those are
//! service-layer inferences built from repository return values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored identifier column did not parse as a UUID.
  #[error("malformed identifier: {0}")]
  MalformedIdentifier(#[from] uuid::Error),

  /// A stored timestamp or date column did not parse.
  #[error("malformed timestamp: {0}")]
  MalformedTimestamp(String),

  /// A stored enum column held a spelling this version does not know.
  #[error("unrecognised column value: {0:?}")]
  UnknownVariant(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
