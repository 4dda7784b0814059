//! Typed failures surfaced by the domain services.
//!
//! Repositories never raise these conditions themselves — they are inferred
//! here from repository return values (empty result, pre-write probe hit,
//! protected flag on the fetched record). Every failure propagates; nothing
//! is logged-and-swallowed at this layer.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The id did not resolve to a stored record.
  #[error("record not found: {0}")]
  NotFound(Uuid),

  /// A uniqueness probe hit before any write was attempted. Carries the
  /// field name and offending value so callers can build a denial message.
  #[error("duplicate {field}: {value:?}")]
  DuplicateField {
    field: &'static str,
    value: String,
  },

  /// A write was attempted against a system record.
  #[error("record {0} is system-protected")]
  SystemProtected(Uuid),

  /// Credential verification failed.
  #[error("credential verification failed")]
  Unauthorized,

  /// Credential hashing failed.
  #[error("credential hashing failed: {0}")]
  Hash(String),

  /// Any lower-level storage failure, wrapped as-is.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
