//! `ContactRepository` implementation.
//!
//! Reads fan out: one query for the root row, then one per child table,
//! repeated per root on list operations. That O(n) round-trip shape is a
//! deliberate simplicity-over-throughput choice and part of the observable
//! behaviour of this store.

use daybook_core::{
  contact::{Contact, ContactAddress, EmailAddress, PhoneNumber},
  store::ContactRepository,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    RawContact, RawContactAddress, RawEmailAddress, RawPhoneNumber,
    decode_uuid, encode_address_kind, encode_dt, encode_email_kind,
    encode_phone_kind, encode_tags, encode_uuid,
  },
  store::SqliteStore,
};

const SELECT_CONTACT: &str = "SELECT id, owner_user_id, name, tags, \
   is_system, created_at, updated_at FROM Contacts";

fn read_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContact> {
  Ok(RawContact {
    id:            row.get(0)?,
    owner_user_id: row.get(1)?,
    name:          row.get(2)?,
    tags:          row.get(3)?,
    is_system:     row.get(4)?,
    created_at:    row.get(5)?,
    updated_at:    row.get(6)?,
  })
}

// ─── Child-table reads ───────────────────────────────────────────────────────

impl SqliteStore {
  async fn emails_for_contact(
    &self,
    contact_id: Uuid,
  ) -> Result<Vec<EmailAddress>> {
    let contact_str = encode_uuid(contact_id);

    let raws: Vec<RawEmailAddress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, contact_id, email, kind, is_primary, tags, is_system,
                  created_at, updated_at
           FROM ContactEmailAddresses WHERE contact_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![contact_str], |row| {
            Ok(RawEmailAddress {
              id:         row.get(0)?,
              contact_id: row.get(1)?,
              email:      row.get(2)?,
              kind:       row.get(3)?,
              is_primary: row.get(4)?,
              tags:       row.get(5)?,
              is_system:  row.get(6)?,
              created_at: row.get(7)?,
              updated_at: row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEmailAddress::into_email).collect()
  }

  async fn phones_for_contact(
    &self,
    contact_id: Uuid,
  ) -> Result<Vec<PhoneNumber>> {
    let contact_str = encode_uuid(contact_id);

    let raws: Vec<RawPhoneNumber> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, contact_id, number, kind, is_primary, tags, is_system,
                  created_at, updated_at
           FROM ContactPhoneNumbers WHERE contact_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![contact_str], |row| {
            Ok(RawPhoneNumber {
              id:         row.get(0)?,
              contact_id: row.get(1)?,
              number:     row.get(2)?,
              kind:       row.get(3)?,
              is_primary: row.get(4)?,
              tags:       row.get(5)?,
              is_system:  row.get(6)?,
              created_at: row.get(7)?,
              updated_at: row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPhoneNumber::into_phone).collect()
  }

  async fn addresses_for_contact(
    &self,
    contact_id: Uuid,
  ) -> Result<Vec<ContactAddress>> {
    let contact_str = encode_uuid(contact_id);

    let raws: Vec<RawContactAddress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, contact_id, street, city, state, postal_code, country,
                  kind, is_primary, tags, is_system, created_at, updated_at
           FROM ContactAddresses WHERE contact_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![contact_str], |row| {
            Ok(RawContactAddress {
              id:          row.get(0)?,
              contact_id:  row.get(1)?,
              street:      row.get(2)?,
              city:        row.get(3)?,
              state:       row.get(4)?,
              postal_code: row.get(5)?,
              country:     row.get(6)?,
              kind:        row.get(7)?,
              is_primary:  row.get(8)?,
              tags:        row.get(9)?,
              is_system:   row.get(10)?,
              created_at:  row.get(11)?,
              updated_at:  row.get(12)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawContactAddress::into_address)
      .collect()
  }

  async fn assemble_contact(&self, raw: RawContact) -> Result<Contact> {
    let id = decode_uuid(&raw.id)?;
    let emails = self.emails_for_contact(id).await?;
    let phones = self.phones_for_contact(id).await?;
    let addresses = self.addresses_for_contact(id).await?;
    raw.into_contact(emails, phones, addresses)
  }

  // ─── Child-table writes ────────────────────────────────────────────────

  async fn insert_email(&self, email: EmailAddress) -> Result<()> {
    let tags_json = encode_tags(&email.tags)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ContactEmailAddresses (
             id, contact_id, email, kind, is_primary, tags, is_system,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            encode_uuid(email.id),
            encode_uuid(email.contact_id),
            email.email,
            encode_email_kind(email.kind),
            email.is_primary,
            tags_json,
            email.is_system,
            encode_dt(email.created_at),
            encode_dt(email.updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_phone(&self, phone: PhoneNumber) -> Result<()> {
    let tags_json = encode_tags(&phone.tags)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ContactPhoneNumbers (
             id, contact_id, number, kind, is_primary, tags, is_system,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            encode_uuid(phone.id),
            encode_uuid(phone.contact_id),
            phone.number,
            encode_phone_kind(phone.kind),
            phone.is_primary,
            tags_json,
            phone.is_system,
            encode_dt(phone.created_at),
            encode_dt(phone.updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_address(&self, address: ContactAddress) -> Result<()> {
    let tags_json = encode_tags(&address.tags)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ContactAddresses (
             id, contact_id, street, city, state, postal_code, country,
             kind, is_primary, tags, is_system, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            encode_uuid(address.id),
            encode_uuid(address.contact_id),
            address.street,
            address.city,
            address.state,
            address.postal_code,
            address.country,
            encode_address_kind(address.kind),
            address.is_primary,
            tags_json,
            address.is_system,
            encode_dt(address.created_at),
            encode_dt(address.updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_children(
    &self,
    emails: Vec<EmailAddress>,
    phones: Vec<PhoneNumber>,
    addresses: Vec<ContactAddress>,
  ) -> Result<()> {
    for email in emails {
      self.insert_email(email).await?;
    }
    for phone in phones {
      self.insert_phone(phone).await?;
    }
    for address in addresses {
      self.insert_address(address).await?;
    }
    Ok(())
  }
}

// ─── ContactRepository impl ──────────────────────────────────────────────────

impl ContactRepository for SqliteStore {
  type Error = Error;

  async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{SELECT_CONTACT} WHERE id = ?1"),
              rusqlite::params![id_str],
              read_contact,
            )
            .optional()?,
        )
      })
      .await?;

    match raw {
      Some(raw) => Ok(Some(self.assemble_contact(raw).await?)),
      None => Ok(None),
    }
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("{SELECT_CONTACT} ORDER BY name ASC"))?;
        let rows = stmt
          .query_map([], read_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut contacts = Vec::with_capacity(raws.len());
    for raw in raws {
      contacts.push(self.assemble_contact(raw).await?);
    }
    Ok(contacts)
  }

  async fn contacts_for_owner(
    &self,
    owner_user_id: Uuid,
  ) -> Result<Vec<Contact>> {
    let owner_str = encode_uuid(owner_user_id);

    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "{SELECT_CONTACT} WHERE owner_user_id = ?1 ORDER BY name ASC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], read_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut contacts = Vec::with_capacity(raws.len());
    for raw in raws {
      contacts.push(self.assemble_contact(raw).await?);
    }
    Ok(contacts)
  }

  async fn add_contact(&self, contact: Contact) -> Result<()> {
    let tags_json = encode_tags(&contact.tags)?;

    let Contact {
      id,
      owner_user_id,
      name,
      emails,
      phones,
      addresses,
      is_system,
      created_at,
      updated_at,
      ..
    } = contact;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO Contacts (
             id, owner_user_id, name, tags, is_system, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            encode_uuid(id),
            encode_uuid(owner_user_id),
            name,
            tags_json,
            is_system,
            encode_dt(created_at),
            encode_dt(updated_at),
          ],
        )?;
        Ok(())
      })
      .await?;

    self.insert_children(emails, phones, addresses).await
  }

  async fn update_contact(&self, contact: Contact) -> Result<()> {
    let tags_json = encode_tags(&contact.tags)?;

    let Contact {
      id,
      name,
      emails,
      phones,
      addresses,
      updated_at,
      ..
    } = contact;

    let id_str = encode_uuid(id);

    let touched: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE Contacts SET name = ?2, tags = ?3, updated_at = ?4
           WHERE id = ?1 AND is_system = 0",
          rusqlite::params![id_str, name, tags_json, encode_dt(updated_at)],
        )?)
      })
      .await?;

    // Missing or shielded root: leave the children alone.
    if touched == 0 {
      return Ok(());
    }

    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM ContactEmailAddresses WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;

    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM ContactPhoneNumbers WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;

    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM ContactAddresses WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;

    self.insert_children(emails, phones, addresses).await
  }

  async fn delete_contact(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    // Child rows die by cascade.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM Contacts WHERE id = ?1 AND is_system = 0",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
