//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use daybook_core::{
  account::{Account, NewAccount, Role, SYSTEM_USERNAME},
  contact::{
    Contact, EmailKind, NewContact, NewContactAddress, NewEmailAddress,
    NewPhoneNumber, PhoneKind,
  },
  label::{DEFAULT_LABELS, Label, NewLabel},
  memo::{Memo, NewMemo},
  store::{
    AccountRepository, ContactRepository, LabelRepository, MemoRepository,
  },
};
use uuid::Uuid;

use crate::{
  SqliteStore,
  encode::{decode_dt, decode_tags, decode_uuid, encode_dt, encode_tags},
};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_account(username: &str, email: &str) -> Account {
  Account::new(
    NewAccount {
      username: username.into(),
      email: email.into(),
      first_name: Some("Alice".into()),
      last_name: Some("Liddell".into()),
      ..Default::default()
    },
    "digest".into(),
  )
}

/// Insert an account to own the records under test (foreign keys are on).
async fn owner(s: &SqliteStore) -> Account {
  let account = new_account("owner", "owner@example.com");
  s.add_account(account.clone()).await.unwrap();
  account
}

// ─── Scalar codec ────────────────────────────────────────────────────────────

#[test]
fn dt_roundtrip_including_boundaries() {
  for dt in [
    Utc.timestamp_opt(0, 0).unwrap(),
    Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap(),
    Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap(),
  ] {
    assert_eq!(decode_dt(&encode_dt(dt)).unwrap(), dt);
  }
}

#[test]
fn dt_decode_converts_offsets_to_utc() {
  let decoded = decode_dt("2024-06-01T12:00:00+02:00").unwrap();
  assert_eq!(decoded, Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());
}

#[test]
fn dt_decode_treats_missing_offset_as_utc() {
  let decoded = decode_dt("2024-06-01T12:00:00").unwrap();
  assert_eq!(decoded, Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
}

#[test]
fn dt_decode_rejects_garbage() {
  assert!(decode_dt("not a timestamp").is_err());
}

#[test]
fn uuid_decode_rejects_garbage() {
  assert!(decode_uuid("not-a-uuid").is_err());
}

#[test]
fn tags_roundtrip_with_json_special_characters() {
  for tags in [
    vec![],
    vec!["plain".to_owned()],
    vec!["with \"quotes\"".to_owned(), "comma, [bracket]".to_owned(), "\\backslash\n".to_owned()],
  ] {
    let encoded = encode_tags(&tags).unwrap();
    assert_eq!(decode_tags(Some(&encoded)), tags);
  }
}

#[test]
fn tags_decode_is_lenient() {
  assert!(decode_tags(None).is_empty());
  assert!(decode_tags(Some("not json")).is_empty());
  assert!(decode_tags(Some("{\"an\":\"object\"}")).is_empty());
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_account_roundtrip() {
  let s = store().await;

  let account = Account::new(
    NewAccount {
      username: "alice".into(),
      email: "alice@example.com".into(),
      first_name: Some("Alice".into()),
      last_name: Some("Liddell".into()),
      phone: Some("+1-555-0100".into()),
      date_of_birth: Some("1990-05-04".parse().unwrap()),
      bio: Some("Down the rabbit hole.".into()),
      avatar_url: Some("https://example.com/alice.png".into()),
      role: Role::Privileged,
      ..Default::default()
    },
    "digest".into(),
  );

  s.add_account(account.clone()).await.unwrap();
  let fetched = s.get_account(account.id).await.unwrap().unwrap();
  assert_eq!(fetched, account);
}

#[tokio::test]
async fn get_account_missing_returns_none() {
  let s = store().await;
  assert!(s.get_account(Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_accounts_ordered_by_username_case_insensitive() {
  let s = store().await;
  for (name, email) in [
    ("charlie", "c@example.com"),
    ("Bob", "b@example.com"),
    ("alice", "a@example.com"),
  ] {
    s.add_account(new_account(name, email)).await.unwrap();
  }

  let names: Vec<String> = s
    .list_accounts()
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.username)
    .collect();
  assert_eq!(names, ["alice", "Bob", "charlie"]);
}

#[tokio::test]
async fn username_and_email_probes_are_case_insensitive() {
  let s = store().await;
  s.add_account(new_account("Alice", "Alice@Example.com"))
    .await
    .unwrap();

  for variant in ["Alice", "alice", "ALICE"] {
    assert!(s.username_exists(variant).await.unwrap());
  }
  for variant in ["alice@example.com", "ALICE@EXAMPLE.COM"] {
    assert!(s.email_exists(variant).await.unwrap());
  }
  assert!(!s.username_exists("bob").await.unwrap());
  assert!(!s.email_exists("bob@example.com").await.unwrap());
}

#[tokio::test]
async fn system_account_is_shielded_from_update_and_delete() {
  let s = store().await;

  let mut system = new_account("root", "root@example.com");
  system.is_system = true;
  s.add_account(system.clone()).await.unwrap();

  let mut changed = system.clone();
  changed.username = "hacked".into();
  changed.updated_at = Utc::now();
  s.update_account(changed).await.unwrap();

  // The stored row is untouched.
  let stored = s.get_account(system.id).await.unwrap().unwrap();
  assert_eq!(stored, system);

  s.delete_account(system.id).await.unwrap();
  assert!(s.get_account(system.id).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_an_account_cascades_to_everything_it_owns() {
  let s = store().await;
  let user = owner(&s).await;

  let label = Label::new(NewLabel {
    user_id: user.id,
    name: "Reading".into(),
    ..Default::default()
  });
  s.add_label(label.clone()).await.unwrap();

  let memo = Memo::new(NewMemo {
    user_id: user.id,
    title: Some("note".into()),
    content: "text".into(),
  });
  s.add_memo(memo.clone()).await.unwrap();
  s.attach_label(memo.id, label.id).await.unwrap();

  let contact = Contact::new(NewContact {
    owner_user_id: user.id,
    name: "Jane".into(),
    ..Default::default()
  });
  s.add_contact(contact.clone()).await.unwrap();

  s.delete_account(user.id).await.unwrap();

  assert!(s.get_label(label.id).await.unwrap().is_none());
  assert!(s.get_memo(memo.id).await.unwrap().is_none());
  assert!(s.get_contact(contact.id).await.unwrap().is_none());
}

// ─── Labels ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_label_roundtrip() {
  let s = store().await;
  let user = owner(&s).await;

  let label = Label::new(NewLabel {
    user_id: user.id,
    name: "Reading".into(),
    description: Some("books and papers".into()),
    color: Some("#123abc".into()),
  });
  s.add_label(label.clone()).await.unwrap();

  assert_eq!(s.get_label(label.id).await.unwrap().unwrap(), label);
}

#[tokio::test]
async fn label_by_name_is_case_insensitive_and_per_owner() {
  let s = store().await;
  let user = owner(&s).await;
  let other = new_account("other", "other@example.com");
  s.add_account(other.clone()).await.unwrap();

  let label = Label::new(NewLabel {
    user_id: user.id,
    name: "Reading".into(),
    ..Default::default()
  });
  s.add_label(label.clone()).await.unwrap();

  let found = s.label_by_name(user.id, "rEaDiNg").await.unwrap();
  assert_eq!(found.unwrap().id, label.id);

  assert!(s.label_by_name(other.id, "Reading").await.unwrap().is_none());
  assert!(s.label_by_name(user.id, "Writing").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_label_names_per_owner_are_not_rejected() {
  // The per-owner name uniqueness is a soft invariant; the store accepts
  // duplicates from callers that skip the lookup helper.
  let s = store().await;
  let user = owner(&s).await;

  for _ in 0..2 {
    s.add_label(Label::new(NewLabel {
      user_id: user.id,
      name: "Reading".into(),
      ..Default::default()
    }))
    .await
    .unwrap();
  }

  assert_eq!(s.labels_for_user(user.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn seed_default_labels_inserts_ten_system_labels_once() {
  let s = store().await;
  let user = owner(&s).await;

  assert!(s.seed_default_labels(user.id).await.unwrap());

  let labels = s.labels_for_user(user.id).await.unwrap();
  assert_eq!(labels.len(), 10);
  assert!(labels.iter().all(|l| l.is_system));

  let mut expected: Vec<&str> =
    DEFAULT_LABELS.iter().map(|(name, _)| *name).collect();
  expected.sort_unstable();
  let mut got: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
  got.sort_unstable();
  assert_eq!(got, expected);

  // Second run is skipped entirely.
  assert!(!s.seed_default_labels(user.id).await.unwrap());
  assert_eq!(s.labels_for_user(user.id).await.unwrap().len(), 10);
}

#[tokio::test]
async fn seed_default_labels_skips_users_with_any_label() {
  let s = store().await;
  let user = owner(&s).await;

  s.add_label(Label::new(NewLabel {
    user_id: user.id,
    name: "Mine".into(),
    ..Default::default()
  }))
  .await
  .unwrap();

  assert!(!s.seed_default_labels(user.id).await.unwrap());
  assert_eq!(s.labels_for_user(user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn seed_system_account_is_idempotent() {
  let s = store().await;

  let seeded = s.seed_system_account("digest").await.unwrap().unwrap();
  assert_eq!(seeded.username, SYSTEM_USERNAME);
  assert_eq!(seeded.role, Role::Privileged);
  assert!(seeded.is_system);
  assert_eq!(s.labels_for_user(seeded.id).await.unwrap().len(), 10);

  assert!(s.seed_system_account("digest").await.unwrap().is_none());
  assert_eq!(s.list_accounts().await.unwrap().len(), 1);
}

// ─── Memos ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_memo_roundtrip() {
  let s = store().await;
  let user = owner(&s).await;

  let memo = Memo::new(NewMemo {
    user_id: user.id,
    title: None,
    content: "remember the milk".into(),
  });
  s.add_memo(memo.clone()).await.unwrap();

  let fetched = s.get_memo(memo.id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "");
  assert_eq!(fetched, memo);
}

#[tokio::test]
async fn attach_label_twice_leaves_one_association() {
  let s = store().await;
  let user = owner(&s).await;

  let label = Label::new(NewLabel {
    user_id: user.id,
    name: "Reading".into(),
    ..Default::default()
  });
  s.add_label(label.clone()).await.unwrap();

  let memo = Memo::new(NewMemo {
    user_id: user.id,
    title: Some("note".into()),
    content: "text".into(),
  });
  s.add_memo(memo.clone()).await.unwrap();

  s.attach_label(memo.id, label.id).await.unwrap();
  s.attach_label(memo.id, label.id).await.unwrap();

  let labels = s.get_memo(memo.id).await.unwrap().unwrap().labels;
  assert_eq!(labels.len(), 1);
  assert_eq!(labels[0].id, label.id);
}

#[tokio::test]
async fn detach_missing_association_is_a_noop() {
  let s = store().await;
  let user = owner(&s).await;

  let memo = Memo::new(NewMemo {
    user_id: user.id,
    title: Some("note".into()),
    content: "text".into(),
  });
  s.add_memo(memo.clone()).await.unwrap();

  s.detach_label(memo.id, Uuid::now_v7()).await.unwrap();
  assert!(s.get_memo(memo.id).await.unwrap().unwrap().labels.is_empty());
}

#[tokio::test]
async fn deleting_a_label_leaves_no_dangling_associations() {
  let s = store().await;
  let user = owner(&s).await;

  let keep = Label::new(NewLabel {
    user_id: user.id,
    name: "Keep".into(),
    ..Default::default()
  });
  let gone = Label::new(NewLabel {
    user_id: user.id,
    name: "Gone".into(),
    ..Default::default()
  });
  s.add_label(keep.clone()).await.unwrap();
  s.add_label(gone.clone()).await.unwrap();

  let memo = Memo::new(NewMemo {
    user_id: user.id,
    title: Some("note".into()),
    content: "text".into(),
  });
  s.add_memo(memo.clone()).await.unwrap();
  s.attach_label(memo.id, keep.id).await.unwrap();
  s.attach_label(memo.id, gone.id).await.unwrap();

  s.delete_label(gone.id).await.unwrap();

  let labels = s.get_memo(memo.id).await.unwrap().unwrap().labels;
  assert_eq!(labels.len(), 1);
  assert_eq!(labels[0].id, keep.id);
}

#[tokio::test]
async fn memo_labels_are_ordered_by_name() {
  let s = store().await;
  let user = owner(&s).await;

  let memo = Memo::new(NewMemo {
    user_id: user.id,
    title: Some("note".into()),
    content: "text".into(),
  });
  s.add_memo(memo.clone()).await.unwrap();

  for name in ["zebra", "Apple", "mango"] {
    let label = Label::new(NewLabel {
      user_id: user.id,
      name: name.into(),
      ..Default::default()
    });
    s.add_label(label.clone()).await.unwrap();
    s.attach_label(memo.id, label.id).await.unwrap();
  }

  let names: Vec<String> = s
    .get_memo(memo.id)
    .await
    .unwrap()
    .unwrap()
    .labels
    .into_iter()
    .map(|l| l.name)
    .collect();
  assert_eq!(names, ["Apple", "mango", "zebra"]);
}

#[tokio::test]
async fn list_memos_most_recently_updated_first() {
  let s = store().await;
  let user = owner(&s).await;

  let older = Memo::new(NewMemo {
    user_id: user.id,
    title: Some("older".into()),
    content: "a".into(),
  });
  let newer = Memo::new(NewMemo {
    user_id: user.id,
    title: Some("newer".into()),
    content: "b".into(),
  });
  s.add_memo(older.clone()).await.unwrap();
  s.add_memo(newer.clone()).await.unwrap();

  // Touch the older memo so it becomes the most recently updated.
  let mut touched = older.clone();
  touched.updated_at = Utc::now();
  s.update_memo(touched).await.unwrap();

  let titles: Vec<String> = s
    .memos_for_user(user.id)
    .await
    .unwrap()
    .into_iter()
    .map(|m| m.title)
    .collect();
  assert_eq!(titles, ["older", "newer"]);
}

// ─── Contacts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn contact_scenario_one_email_one_phone() {
  let s = store().await;
  let user = owner(&s).await;

  let contact = Contact::new(NewContact {
    owner_user_id: user.id,
    name: "Jane Doe".into(),
    tags: vec![],
    emails: vec![NewEmailAddress {
      email: "jane@example.com".into(),
      kind: EmailKind::Work,
      is_primary: true,
      tags: vec![],
    }],
    phones: vec![NewPhoneNumber {
      number: "+1-555-0001".into(),
      kind: PhoneKind::Mobile,
      ..Default::default()
    }],
    addresses: vec![],
  });
  s.add_contact(contact.clone()).await.unwrap();

  let fetched = s.get_contact(contact.id).await.unwrap().unwrap();
  assert!(fetched.tags.is_empty());
  assert_eq!(fetched.emails.len(), 1);
  assert_eq!(fetched.emails[0].email, "jane@example.com");
  assert_eq!(fetched.emails[0].kind, EmailKind::Work);
  assert!(fetched.emails[0].is_primary);
  assert_eq!(fetched.phones.len(), 1);
  assert_eq!(fetched.phones[0].number, "+1-555-0001");
  assert_eq!(fetched.phones[0].kind, PhoneKind::Mobile);
  assert!(fetched.addresses.is_empty());
}

#[tokio::test]
async fn add_and_get_contact_roundtrip_with_children_and_tags() {
  let s = store().await;
  let user = owner(&s).await;

  let contact = Contact::new(NewContact {
    owner_user_id: user.id,
    name: "Full House".into(),
    tags: vec!["friend".into(), "with \"quotes\", commas".into()],
    emails: vec![
      NewEmailAddress {
        email: "a@example.com".into(),
        is_primary: true,
        ..Default::default()
      },
      // Two primaries at once are accepted, not rejected.
      NewEmailAddress {
        email: "b@example.com".into(),
        is_primary: true,
        tags: vec!["work".into()],
        ..Default::default()
      },
    ],
    phones: vec![NewPhoneNumber {
      number: "+44 20 7946 0000".into(),
      kind: PhoneKind::Work,
      ..Default::default()
    }],
    addresses: vec![NewContactAddress {
      street: "1 Main St".into(),
      city: "Springfield".into(),
      state: "IL".into(),
      postal_code: "62701".into(),
      country: "US".into(),
      ..Default::default()
    }],
  });
  s.add_contact(contact.clone()).await.unwrap();

  let fetched = s.get_contact(contact.id).await.unwrap().unwrap();
  assert_eq!(fetched, contact);
}

#[tokio::test]
async fn list_contacts_ordered_by_name() {
  let s = store().await;
  let user = owner(&s).await;

  for name in ["Zoe", "Amy", "Mia"] {
    s.add_contact(Contact::new(NewContact {
      owner_user_id: user.id,
      name: name.into(),
      ..Default::default()
    }))
    .await
    .unwrap();
  }

  let names: Vec<String> = s
    .contacts_for_owner(user.id)
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name)
    .collect();
  assert_eq!(names, ["Amy", "Mia", "Zoe"]);
}

#[tokio::test]
async fn update_contact_replaces_children() {
  let s = store().await;
  let user = owner(&s).await;

  let contact = Contact::new(NewContact {
    owner_user_id: user.id,
    name: "Jane".into(),
    emails: vec![NewEmailAddress {
      email: "old@example.com".into(),
      ..Default::default()
    }],
    ..Default::default()
  });
  s.add_contact(contact.clone()).await.unwrap();

  let mut updated = s.get_contact(contact.id).await.unwrap().unwrap();
  updated.name = "Jane Doe".into();
  updated.emails = vec![daybook_core::contact::EmailAddress::new(
    contact.id,
    NewEmailAddress {
      email: "new@example.com".into(),
      ..Default::default()
    },
  )];
  updated.updated_at = Utc::now();
  s.update_contact(updated.clone()).await.unwrap();

  let fetched = s.get_contact(contact.id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Jane Doe");
  assert_eq!(fetched.emails.len(), 1);
  assert_eq!(fetched.emails[0].email, "new@example.com");
}

#[tokio::test]
async fn update_missing_contact_is_a_noop() {
  let s = store().await;
  let user = owner(&s).await;

  let ghost = Contact::new(NewContact {
    owner_user_id: user.id,
    name: "Ghost".into(),
    emails: vec![NewEmailAddress {
      email: "ghost@example.com".into(),
      ..Default::default()
    }],
    ..Default::default()
  });

  // Never added; the update must not error and must write nothing.
  s.update_contact(ghost.clone()).await.unwrap();
  assert!(s.get_contact(ghost.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_contact_removes_children() {
  let s = store().await;
  let user = owner(&s).await;

  let contact = Contact::new(NewContact {
    owner_user_id: user.id,
    name: "Jane".into(),
    emails: vec![NewEmailAddress {
      email: "jane@example.com".into(),
      ..Default::default()
    }],
    ..Default::default()
  });
  s.add_contact(contact.clone()).await.unwrap();

  s.delete_contact(contact.id).await.unwrap();
  assert!(s.get_contact(contact.id).await.unwrap().is_none());
}
