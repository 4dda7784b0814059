//! Service-layer tests against the real SQLite store (in-memory).

use daybook_core::{
  account::{NewAccount, SYSTEM_USERNAME},
  contact::{EmailKind, NewContact, NewEmailAddress},
  label::NewLabel,
  memo::NewMemo,
  store::{AccountRepository, LabelRepository},
};
use daybook_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::{
  AccountService, Argon2Hasher, ContactService, CredentialHasher as _, Error,
  LabelService, MemoService,
};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn accounts(store: SqliteStore) -> AccountService<SqliteStore, Argon2Hasher> {
  AccountService::new(store, Argon2Hasher)
}

fn alice() -> NewAccount {
  NewAccount {
    username: "alice".into(),
    password: "wonderland".into(),
    email: "alice@example.com".into(),
    ..Default::default()
  }
}

// ─── Account creation ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_account_hashes_credential_and_seeds_labels() {
  let s = store().await;
  let service = accounts(s.clone());

  let account = service.create(alice()).await.unwrap();

  // The plaintext never lands in storage.
  let stored = service.get(account.id).await.unwrap();
  assert_ne!(stored.password_hash, "wonderland");
  assert!(Argon2Hasher.verify("wonderland", &stored.password_hash));

  // Every new account gets the ten default labels, all system records.
  let labels = s.labels_for_user(account.id).await.unwrap();
  assert_eq!(labels.len(), 10);
  assert!(labels.iter().all(|l| l.is_system));
}

#[tokio::test]
async fn duplicate_username_fails_before_any_write() {
  let s = store().await;
  let service = accounts(s.clone());
  service.create(alice()).await.unwrap();

  let err = service
    .create(NewAccount {
      username: "ALICE".into(),
      password: "pw".into(),
      email: "other@example.com".into(),
      ..Default::default()
    })
    .await
    .unwrap_err();

  assert!(
    matches!(err, Error::DuplicateField { field: "username", ref value } if value == "ALICE")
  );
  assert_eq!(s.list_accounts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn username_conflict_reported_before_email_conflict() {
  let service = accounts(store().await);
  service.create(alice()).await.unwrap();

  // Both fields collide; the username is the one reported.
  let err = service.create(alice()).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateField { field: "username", .. }));
}

#[tokio::test]
async fn duplicate_email_fails_with_typed_field() {
  let service = accounts(store().await);
  service.create(alice()).await.unwrap();

  let err = service
    .create(NewAccount {
      username: "bob".into(),
      password: "pw".into(),
      email: "Alice@Example.com".into(),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateField { field: "email", .. }));
}

// ─── Protection and lookup translation ───────────────────────────────────────

#[tokio::test]
async fn get_missing_account_is_not_found() {
  let service = accounts(store().await);
  let id = Uuid::now_v7();
  assert!(matches!(
    service.get(id).await.unwrap_err(),
    Error::NotFound(got) if got == id
  ));
}

#[tokio::test]
async fn update_and_delete_system_account_report_protection() {
  let s = store().await;
  let service = accounts(s.clone());

  let system = s.seed_system_account("digest").await.unwrap().unwrap();
  assert_eq!(system.username, SYSTEM_USERNAME);

  let mut changed = system.clone();
  changed.bio = Some("rewritten".into());
  assert!(matches!(
    service.update(changed).await.unwrap_err(),
    Error::SystemProtected(id) if id == system.id
  ));
  assert!(matches!(
    service.delete(system.id).await.unwrap_err(),
    Error::SystemProtected(id) if id == system.id
  ));

  // The stored record is untouched either way.
  assert_eq!(s.get_account(system.id).await.unwrap().unwrap(), system);
}

#[tokio::test]
async fn update_restamps_updated_at() {
  let service = accounts(store().await);
  let account = service.create(alice()).await.unwrap();

  let mut changed = account.clone();
  changed.bio = Some("explorer".into());
  let updated = service.update(changed).await.unwrap();

  assert!(updated.updated_at > account.updated_at);
  assert_eq!(service.get(account.id).await.unwrap().bio.as_deref(), Some("explorer"));
}

// ─── Password changes ────────────────────────────────────────────────────────

#[tokio::test]
async fn change_password_verifies_current_credential() {
  let service = accounts(store().await);
  let account = service.create(alice()).await.unwrap();

  let err = service
    .change_password(account.id, "wrong", "new-secret")
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Unauthorized));

  service
    .change_password(account.id, "wonderland", "new-secret")
    .await
    .unwrap();

  let stored = service.get(account.id).await.unwrap();
  assert!(Argon2Hasher.verify("new-secret", &stored.password_hash));
  assert!(!Argon2Hasher.verify("wonderland", &stored.password_hash));
}

#[tokio::test]
async fn change_password_for_missing_account_is_not_found() {
  let service = accounts(store().await);
  let err = service
    .change_password(Uuid::now_v7(), "a", "b")
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

// ─── Thin services ───────────────────────────────────────────────────────────

#[tokio::test]
async fn label_check_then_create_flow() {
  let s = store().await;
  let account = accounts(s.clone()).create(alice()).await.unwrap();
  let labels = LabelService::new(s);

  // "Tasks" is already taken by the seeded defaults.
  assert!(
    labels
      .find_by_name(account.id, "tasks")
      .await
      .unwrap()
      .is_some()
  );
  assert!(
    labels
      .find_by_name(account.id, "Gardening")
      .await
      .unwrap()
      .is_none()
  );

  let label = labels
    .create(NewLabel {
      user_id: account.id,
      name: "Gardening".into(),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(labels.get(label.id).await.unwrap().name, "Gardening");
}

#[tokio::test]
async fn memo_service_attach_detach_and_stamp() {
  let s = store().await;
  let account = accounts(s.clone()).create(alice()).await.unwrap();
  let labels = LabelService::new(s.clone());
  let memos = MemoService::new(s);

  let memo = memos
    .create(NewMemo {
      user_id: account.id,
      title: None,
      content: "water the plants".into(),
    })
    .await
    .unwrap();
  assert_eq!(memo.title, "");

  let label = labels.find_by_name(account.id, "Tasks").await.unwrap().unwrap();
  memos.attach_label(memo.id, label.id).await.unwrap();
  memos.attach_label(memo.id, label.id).await.unwrap();
  assert_eq!(memos.get(memo.id).await.unwrap().labels.len(), 1);

  memos.detach_label(memo.id, label.id).await.unwrap();
  memos.detach_label(memo.id, label.id).await.unwrap();
  assert!(memos.get(memo.id).await.unwrap().labels.is_empty());

  let updated = memos.update(memo.clone()).await.unwrap();
  assert!(updated.updated_at > memo.updated_at);
}

#[tokio::test]
async fn contact_service_roundtrip() {
  let s = store().await;
  let account = accounts(s.clone()).create(alice()).await.unwrap();
  let contacts = ContactService::new(s);

  let contact = contacts
    .create(NewContact {
      owner_user_id: account.id,
      name: "Jane Doe".into(),
      emails: vec![NewEmailAddress {
        email: "jane@example.com".into(),
        kind: EmailKind::Work,
        is_primary: true,
        ..Default::default()
      }],
      ..Default::default()
    })
    .await
    .unwrap();

  let fetched = contacts.get(contact.id).await.unwrap();
  assert_eq!(fetched, contact);

  contacts.delete(contact.id).await.unwrap();
  assert!(matches!(
    contacts.get(contact.id).await.unwrap_err(),
    Error::NotFound(_)
  ));
}
