//! Core types and repository contracts for the Daybook record store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod contact;
pub mod label;
pub mod memo;
pub mod store;

pub use account::{Account, NewAccount, Role, SYSTEM_USERNAME};
pub use contact::{
  AddressKind, Contact, ContactAddress, EmailAddress, EmailKind, NewContact,
  NewContactAddress, NewEmailAddress, NewPhoneNumber, PhoneKind, PhoneNumber,
};
pub use label::{DEFAULT_LABEL_COLOR, DEFAULT_LABELS, Label, NewLabel};
pub use memo::{Memo, NewMemo};
