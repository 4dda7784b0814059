//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings and normalised to UTC on
//! read — the driver's column affinity is never trusted. UUIDs are stored as
//! hyphenated lowercase strings. Tag lists are stored as compact JSON arrays;
//! their decode is deliberately lenient (NULL or garbage reads as empty)
//! while the encode side is strict.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use daybook_core::{
  account::{Account, Role},
  contact::{
    AddressKind, Contact, ContactAddress, EmailAddress, EmailKind,
    PhoneKind, PhoneNumber,
  },
  label::Label,
  memo::Memo,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

/// Parse a stored timestamp. A value carrying an offset is converted to UTC;
/// a value without offset information is treated as UTC.
pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }
  s.parse::<NaiveDateTime>()
    .map(|naive| naive.and_utc())
    .map_err(|e| Error::MalformedTimestamp(format!("{s:?}: {e}")))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse::<NaiveDate>()
    .map_err(|e| Error::MalformedTimestamp(format!("{s:?}: {e}")))
}

// ─── Tag lists ───────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

/// Lenient: NULL or unparseable content decodes to the empty list.
pub fn decode_tags(s: Option<&str>) -> Vec<String> {
  s.and_then(|s| serde_json::from_str(s).ok()).unwrap_or_default()
}

// ─── Role ────────────────────────────────────────────────────────────────────

pub fn encode_role(role: Role) -> &'static str {
  match role {
    Role::Standard => "standard",
    Role::Privileged => "privileged",
  }
}

pub fn decode_role(s: &str) -> Result<Role> {
  match s {
    "standard" => Ok(Role::Standard),
    "privileged" => Ok(Role::Privileged),
    other => Err(Error::UnknownVariant(other.to_owned())),
  }
}

// ─── Contact-method kinds ────────────────────────────────────────────────────

pub fn encode_email_kind(k: EmailKind) -> &'static str {
  match k {
    EmailKind::Personal => "personal",
    EmailKind::Work => "work",
    EmailKind::Other => "other",
  }
}

pub fn decode_email_kind(s: &str) -> Result<EmailKind> {
  match s {
    "personal" => Ok(EmailKind::Personal),
    "work" => Ok(EmailKind::Work),
    "other" => Ok(EmailKind::Other),
    other => Err(Error::UnknownVariant(other.to_owned())),
  }
}

pub fn encode_phone_kind(k: PhoneKind) -> &'static str {
  match k {
    PhoneKind::Mobile => "mobile",
    PhoneKind::Home => "home",
    PhoneKind::Work => "work",
    PhoneKind::Other => "other",
  }
}

pub fn decode_phone_kind(s: &str) -> Result<PhoneKind> {
  match s {
    "mobile" => Ok(PhoneKind::Mobile),
    "home" => Ok(PhoneKind::Home),
    "work" => Ok(PhoneKind::Work),
    "other" => Ok(PhoneKind::Other),
    other => Err(Error::UnknownVariant(other.to_owned())),
  }
}

pub fn encode_address_kind(k: AddressKind) -> &'static str {
  match k {
    AddressKind::Home => "home",
    AddressKind::Work => "work",
    AddressKind::Other => "other",
  }
}

pub fn decode_address_kind(s: &str) -> Result<AddressKind> {
  match s {
    "home" => Ok(AddressKind::Home),
    "work" => Ok(AddressKind::Work),
    "other" => Ok(AddressKind::Other),
    other => Err(Error::UnknownVariant(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `Users` row.
pub struct RawAccount {
  pub id:            String,
  pub username:      String,
  pub password_hash: String,
  pub email:         String,
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub phone:         Option<String>,
  pub date_of_birth: Option<String>,
  pub bio:           Option<String>,
  pub avatar_url:    Option<String>,
  pub role:          String,
  pub is_active:     bool,
  pub is_system:     bool,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawAccount {
  pub fn into_account(self) -> Result<Account> {
    Ok(Account {
      id: decode_uuid(&self.id)?,
      username: self.username,
      password_hash: self.password_hash,
      email: self.email,
      first_name: self.first_name,
      last_name: self.last_name,
      phone: self.phone,
      date_of_birth: self
        .date_of_birth
        .as_deref()
        .map(decode_date)
        .transpose()?,
      bio: self.bio,
      avatar_url: self.avatar_url,
      role: decode_role(&self.role)?,
      is_active: self.is_active,
      is_system: self.is_system,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `Labels` row.
pub struct RawLabel {
  pub id:          String,
  pub user_id:     String,
  pub name:        String,
  pub description: Option<String>,
  pub color:       String,
  pub is_system:   bool,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawLabel {
  pub fn into_label(self) -> Result<Label> {
    Ok(Label {
      id: decode_uuid(&self.id)?,
      user_id: decode_uuid(&self.user_id)?,
      name: self.name,
      description: self.description,
      color: self.color,
      is_system: self.is_system,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `Memos` row. The label list is fetched
/// separately and attached here.
pub struct RawMemo {
  pub id:         String,
  pub user_id:    String,
  pub title:      String,
  pub content:    String,
  pub is_system:  bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawMemo {
  pub fn into_memo(self, labels: Vec<Label>) -> Result<Memo> {
    Ok(Memo {
      id: decode_uuid(&self.id)?,
      user_id: decode_uuid(&self.user_id)?,
      title: self.title,
      content: self.content,
      labels,
      is_system: self.is_system,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `Contacts` row. Children are fetched
/// separately and attached here.
pub struct RawContact {
  pub id:            String,
  pub owner_user_id: String,
  pub name:          String,
  pub tags:          Option<String>,
  pub is_system:     bool,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawContact {
  pub fn into_contact(
    self,
    emails: Vec<EmailAddress>,
    phones: Vec<PhoneNumber>,
    addresses: Vec<ContactAddress>,
  ) -> Result<Contact> {
    Ok(Contact {
      id: decode_uuid(&self.id)?,
      owner_user_id: decode_uuid(&self.owner_user_id)?,
      name: self.name,
      tags: decode_tags(self.tags.as_deref()),
      emails,
      phones,
      addresses,
      is_system: self.is_system,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `ContactEmailAddresses` row.
pub struct RawEmailAddress {
  pub id:         String,
  pub contact_id: String,
  pub email:      String,
  pub kind:       String,
  pub is_primary: bool,
  pub tags:       Option<String>,
  pub is_system:  bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawEmailAddress {
  pub fn into_email(self) -> Result<EmailAddress> {
    Ok(EmailAddress {
      id: decode_uuid(&self.id)?,
      contact_id: decode_uuid(&self.contact_id)?,
      email: self.email,
      kind: decode_email_kind(&self.kind)?,
      is_primary: self.is_primary,
      tags: decode_tags(self.tags.as_deref()),
      is_system: self.is_system,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `ContactPhoneNumbers` row.
pub struct RawPhoneNumber {
  pub id:         String,
  pub contact_id: String,
  pub number:     String,
  pub kind:       String,
  pub is_primary: bool,
  pub tags:       Option<String>,
  pub is_system:  bool,
  pub created_at: String,
  pub updated_at: String,
}

impl RawPhoneNumber {
  pub fn into_phone(self) -> Result<PhoneNumber> {
    Ok(PhoneNumber {
      id: decode_uuid(&self.id)?,
      contact_id: decode_uuid(&self.contact_id)?,
      number: self.number,
      kind: decode_phone_kind(&self.kind)?,
      is_primary: self.is_primary,
      tags: decode_tags(self.tags.as_deref()),
      is_system: self.is_system,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `ContactAddresses` row.
pub struct RawContactAddress {
  pub id:          String,
  pub contact_id:  String,
  pub street:      String,
  pub city:        String,
  pub state:       String,
  pub postal_code: String,
  pub country:     String,
  pub kind:        String,
  pub is_primary:  bool,
  pub tags:        Option<String>,
  pub is_system:   bool,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawContactAddress {
  pub fn into_address(self) -> Result<ContactAddress> {
    Ok(ContactAddress {
      id: decode_uuid(&self.id)?,
      contact_id: decode_uuid(&self.contact_id)?,
      street: self.street,
      city: self.city,
      state: self.state,
      postal_code: self.postal_code,
      country: self.country,
      kind: decode_address_kind(&self.kind)?,
      is_primary: self.is_primary,
      tags: decode_tags(self.tags.as_deref()),
      is_system: self.is_system,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
