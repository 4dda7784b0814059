//! Domain services for the Daybook record store.
//!
//! Each service wraps the matching repository contract with the business
//! rules that are not expressible as storage constraints — uniqueness
//! probes, system-record protection, credential handling, timestamp
//! stamping — and translates repository outcomes into typed failures.
//! Ownership and role checks belong to the caller, not to this layer.

pub mod account;
pub mod contact;
pub mod error;
pub mod hasher;
pub mod label;
pub mod memo;

pub use account::AccountService;
pub use contact::ContactService;
pub use error::{Error, Result};
pub use hasher::{Argon2Hasher, CredentialHasher};
pub use label::LabelService;
pub use memo::MemoService;

#[cfg(test)]
mod tests;
