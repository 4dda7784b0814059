//! Repository contracts, one trait per aggregate root.
//!
//! The traits are implemented by storage backends (e.g.
//! `daybook-store-sqlite`). Service and presentation layers depend on these
//! abstractions, not on any concrete backend.
//!
//! Repositories stay deliberately dumb: an update or delete whose predicate
//! matches zero rows (missing record, or a system record shielded by the
//! embedded `is_system` guard) is "no effect", not an error. Turning that
//! into a typed failure is the service layer's job.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes.

use std::future::Future;

use uuid::Uuid;

use crate::{account::Account, contact::Contact, label::Label, memo::Memo};

// ─── Accounts ────────────────────────────────────────────────────────────────

pub trait AccountRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve an account by id. Returns `None` if not found.
  fn get_account(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + '_;

  /// List all accounts, ordered by username, case-insensitive ascending.
  fn list_accounts(
    &self,
  ) -> impl Future<Output = Result<Vec<Account>, Self::Error>> + Send + '_;

  /// Persist a fully-built account. The id must be assigned by the caller.
  fn add_account(
    &self,
    account: Account,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Rewrite every mutable column of the account row. The write predicate
  /// embeds `is_system = 0`; zero matched rows means no effect.
  fn update_account(
    &self,
    account: Account,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete the account row (same embedded guard as update). Labels, memos
  /// and contacts owned by it are removed by cascade.
  fn delete_account(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Case-insensitive uniqueness probe, read-only.
  fn username_exists<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Case-insensitive uniqueness probe, read-only.
  fn email_exists<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

// ─── Labels ──────────────────────────────────────────────────────────────────

pub trait LabelRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get_label(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Label>, Self::Error>> + Send + '_;

  /// List all labels, ordered by name, case-insensitive ascending.
  fn list_labels(
    &self,
  ) -> impl Future<Output = Result<Vec<Label>, Self::Error>> + Send + '_;

  /// Labels owned by one account, same ordering as [`list_labels`].
  ///
  /// [`list_labels`]: LabelRepository::list_labels
  fn labels_for_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Label>, Self::Error>> + Send + '_;

  fn add_label(
    &self,
    label: Label,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn update_label(
    &self,
    label: Label,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete the label row. Junction rows pointing at it are removed by
  /// cascade — no association may survive the label.
  fn delete_label(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Case-insensitive per-owner lookup. This helper is the only enforcement
  /// point for label-name uniqueness: callers that need the guarantee must
  /// check here before creating.
  fn label_by_name<'a>(
    &'a self,
    user_id: Uuid,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Label>, Self::Error>> + Send + 'a;

  /// Insert the default label set for an account, all marked system.
  /// Idempotent per user: skipped entirely (returns `false`) when the user
  /// already owns any label.
  fn seed_default_labels(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Memos ───────────────────────────────────────────────────────────────────

pub trait MemoRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a memo with its label list materialised through the junction
  /// table, ordered by label name.
  fn get_memo(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Memo>, Self::Error>> + Send + '_;

  /// List all memos, most recently updated first.
  fn list_memos(
    &self,
  ) -> impl Future<Output = Result<Vec<Memo>, Self::Error>> + Send + '_;

  /// Memos owned by one account, most recently updated first.
  fn memos_for_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Memo>, Self::Error>> + Send + '_;

  /// Persist the memo row. The derived label list is ignored on write.
  fn add_memo(
    &self,
    memo: Memo,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn update_memo(
    &self,
    memo: Memo,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_memo(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Associate a label with a memo. Attaching an already-attached pair is a
  /// no-op, not an error.
  fn attach_label(
    &self,
    memo_id: Uuid,
    label_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove an association by composite key. Detaching a pair that does not
  /// exist is a no-op, not an error.
  fn detach_label(
    &self,
    memo_id: Uuid,
    label_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── Contacts ────────────────────────────────────────────────────────────────

pub trait ContactRepository: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a contact: one query for the root row, then one per child
  /// table.
  fn get_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// List all contacts, ordered by name ascending. The child fan-out runs
  /// per returned root.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Contacts owned by one account, ordered by name ascending.
  fn contacts_for_owner(
    &self,
    owner_user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Insert the root row, then one insert per child. The statements are
  /// independent — there is no wrapping transaction.
  fn add_contact(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Guarded root update; when the root row was touched, every child table
  /// is cleared and re-inserted from the aggregate. Zero matched root rows
  /// means no effect and the children are left alone.
  fn update_contact(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Delete the root row; children are removed by cascade.
  fn delete_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
