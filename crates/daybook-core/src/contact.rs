//! Contact — an aggregate root composed of a name, a free-form tag list and
//! three child collections (emails, phone numbers, postal addresses).
//!
//! Children are separate records with their own identity; they live in their
//! own tables and die with the parent contact (cascade at the storage layer).
//! Any number of children may be flagged primary simultaneously — that is
//! accepted, not rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Kind enums ──────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
  #[default]
  Personal,
  Work,
  Other,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PhoneKind {
  #[default]
  Mobile,
  Home,
  Work,
  Other,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
  #[default]
  Home,
  Work,
  Other,
}

// ─── Child records ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
  pub id:         Uuid,
  pub contact_id: Uuid,
  pub email:      String,
  pub kind:       EmailKind,
  pub is_primary: bool,
  pub tags:       Vec<String>,
  pub is_system:  bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl EmailAddress {
  pub fn new(contact_id: Uuid, input: NewEmailAddress) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::now_v7(),
      contact_id,
      email: input.email,
      kind: input.kind,
      is_primary: input.is_primary,
      tags: input.tags,
      is_system: false,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumber {
  pub id:         Uuid,
  pub contact_id: Uuid,
  pub number:     String,
  pub kind:       PhoneKind,
  pub is_primary: bool,
  pub tags:       Vec<String>,
  pub is_system:  bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl PhoneNumber {
  pub fn new(contact_id: Uuid, input: NewPhoneNumber) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::now_v7(),
      contact_id,
      number: input.number,
      kind: input.kind,
      is_primary: input.is_primary,
      tags: input.tags,
      is_system: false,
      created_at: now,
      updated_at: now,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactAddress {
  pub id:          Uuid,
  pub contact_id:  Uuid,
  pub street:      String,
  pub city:        String,
  pub state:       String,
  pub postal_code: String,
  pub country:     String,
  pub kind:        AddressKind,
  pub is_primary:  bool,
  pub tags:        Vec<String>,
  pub is_system:   bool,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl ContactAddress {
  pub fn new(contact_id: Uuid, input: NewContactAddress) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::now_v7(),
      contact_id,
      street: input.street,
      city: input.city,
      state: input.state,
      postal_code: input.postal_code,
      country: input.country,
      kind: input.kind,
      is_primary: input.is_primary,
      tags: input.tags,
      is_system: false,
      created_at: now,
      updated_at: now,
    }
  }
}

// ─── Aggregate root ──────────────────────────────────────────────────────────

/// A contact with its fully-loaded child collections.
///
/// `tags` is persisted as a single JSON-encoded column on the root row, not
/// normalised into its own table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  pub id:            Uuid,
  pub owner_user_id: Uuid,
  pub name:          String,
  pub tags:          Vec<String>,
  pub emails:        Vec<EmailAddress>,
  pub phones:        Vec<PhoneNumber>,
  pub addresses:     Vec<ContactAddress>,
  pub is_system:     bool,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

impl Contact {
  /// Build a fresh contact and its children. The root id is assigned first
  /// so every child can reference it.
  pub fn new(input: NewContact) -> Self {
    let now = Utc::now();
    let id = Uuid::now_v7();
    Self {
      id,
      owner_user_id: input.owner_user_id,
      name: input.name,
      tags: input.tags,
      emails: input
        .emails
        .into_iter()
        .map(|e| EmailAddress::new(id, e))
        .collect(),
      phones: input
        .phones
        .into_iter()
        .map(|p| PhoneNumber::new(id, p))
        .collect(),
      addresses: input
        .addresses
        .into_iter()
        .map(|a| ContactAddress::new(id, a))
        .collect(),
      is_system: false,
      created_at: now,
      updated_at: now,
    }
  }
}

// ─── Input shapes ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct NewContact {
  pub owner_user_id: Uuid,
  pub name:          String,
  pub tags:          Vec<String>,
  pub emails:        Vec<NewEmailAddress>,
  pub phones:        Vec<NewPhoneNumber>,
  pub addresses:     Vec<NewContactAddress>,
}

#[derive(Debug, Clone, Default)]
pub struct NewEmailAddress {
  pub email:      String,
  pub kind:       EmailKind,
  pub is_primary: bool,
  pub tags:       Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewPhoneNumber {
  pub number:     String,
  pub kind:       PhoneKind,
  pub is_primary: bool,
  pub tags:       Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewContactAddress {
  pub street:      String,
  pub city:        String,
  pub state:       String,
  pub postal_code: String,
  pub country:     String,
  pub kind:        AddressKind,
  pub is_primary:  bool,
  pub tags:        Vec<String>,
}
