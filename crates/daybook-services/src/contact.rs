//! Contact service — pass-through plus stamping. Child records receive their
//! ids and timestamps when the aggregate is built.

use chrono::Utc;
use daybook_core::{
  contact::{Contact, NewContact},
  store::ContactRepository,
};
use uuid::Uuid;

use crate::{Error, Result};

pub struct ContactService<S> {
  store: S,
}

impl<S> ContactService<S>
where
  S: ContactRepository,
{
  pub fn new(store: S) -> Self { Self { store } }

  pub async fn create(&self, input: NewContact) -> Result<Contact> {
    let contact = Contact::new(input);
    self
      .store
      .add_contact(contact.clone())
      .await
      .map_err(Error::storage)?;
    tracing::debug!(contact = %contact.id, "created contact");
    Ok(contact)
  }

  pub async fn get(&self, id: Uuid) -> Result<Contact> {
    self
      .store
      .get_contact(id)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::NotFound(id))
  }

  pub async fn list(&self) -> Result<Vec<Contact>> {
    self.store.list_contacts().await.map_err(Error::storage)
  }

  pub async fn list_for_owner(
    &self,
    owner_user_id: Uuid,
  ) -> Result<Vec<Contact>> {
    self
      .store
      .contacts_for_owner(owner_user_id)
      .await
      .map_err(Error::storage)
  }

  pub async fn update(&self, mut contact: Contact) -> Result<Contact> {
    contact.updated_at = Utc::now();
    self
      .store
      .update_contact(contact.clone())
      .await
      .map_err(Error::storage)?;
    Ok(contact)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    self.store.delete_contact(id).await.map_err(Error::storage)
  }
}
