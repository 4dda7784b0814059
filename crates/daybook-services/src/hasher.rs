//! The credential-hashing seam consumed by the account service.
//!
//! Plaintext credentials cross this trait and nothing else; everything past
//! it sees only digests.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result};

pub trait CredentialHasher: Send + Sync {
  /// Hash a plaintext credential into a storable digest.
  fn hash(&self, plaintext: &str) -> Result<String>;

  /// Verify a plaintext credential against a stored digest.
  fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Argon2id with default parameters. Digests are PHC strings,
/// e.g. `$argon2id$v=19$…`.
#[derive(Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
  fn hash(&self, plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(plaintext.as_bytes(), &salt)
      .map(|hash| hash.to_string())
      .map_err(|e| Error::Hash(e.to_string()))
  }

  fn verify(&self, plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
      return false;
    };
    Argon2::default()
      .verify_password(plaintext.as_bytes(), &parsed)
      .is_ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_and_verify_roundtrip() {
    let hasher = Argon2Hasher;
    let digest = hasher.hash("secret").unwrap();
    assert!(digest.starts_with("$argon2"));
    assert!(hasher.verify("secret", &digest));
    assert!(!hasher.verify("wrong", &digest));
  }

  #[test]
  fn verify_rejects_malformed_digest() {
    assert!(!Argon2Hasher.verify("secret", "not a phc string"));
  }
}
