//! Account service — uniqueness probes, system-record protection and
//! credential management.

use chrono::Utc;
use daybook_core::{
  account::{Account, NewAccount},
  store::{AccountRepository, LabelRepository},
};
use uuid::Uuid;

use crate::{Error, Result, hasher::CredentialHasher};

pub struct AccountService<S, H> {
  store:  S,
  hasher: H,
}

impl<S, H> AccountService<S, H>
where
  S: AccountRepository + LabelRepository,
  H: CredentialHasher,
{
  pub fn new(store: S, hasher: H) -> Self { Self { store, hasher } }

  /// Create an account.
  ///
  /// Both uniqueness probes run before any write; when both would conflict,
  /// the username conflict is the one reported. Every new account gets the
  /// default label set, not only the seeded system account.
  pub async fn create(&self, input: NewAccount) -> Result<Account> {
    if self
      .store
      .username_exists(&input.username)
      .await
      .map_err(Error::storage)?
    {
      return Err(Error::DuplicateField {
        field: "username",
        value: input.username,
      });
    }
    if self
      .store
      .email_exists(&input.email)
      .await
      .map_err(Error::storage)?
    {
      return Err(Error::DuplicateField {
        field: "email",
        value: input.email,
      });
    }

    let password_hash = self.hasher.hash(&input.password)?;
    let account = Account::new(input, password_hash);

    self
      .store
      .add_account(account.clone())
      .await
      .map_err(Error::storage)?;
    self
      .store
      .seed_default_labels(account.id)
      .await
      .map_err(Error::storage)?;

    tracing::debug!(account = %account.id, "created account");
    Ok(account)
  }

  pub async fn get(&self, id: Uuid) -> Result<Account> {
    self
      .store
      .get_account(id)
      .await
      .map_err(Error::storage)?
      .ok_or(Error::NotFound(id))
  }

  pub async fn list(&self) -> Result<Vec<Account>> {
    self.store.list_accounts().await.map_err(Error::storage)
  }

  /// Update an account. The repository's write predicate would shield a
  /// system record silently; this layer turns that into a typed failure the
  /// caller can act on, before delegating.
  pub async fn update(&self, mut account: Account) -> Result<Account> {
    let current = self.get(account.id).await?;
    if current.is_system {
      return Err(Error::SystemProtected(account.id));
    }

    account.updated_at = Utc::now();
    self
      .store
      .update_account(account.clone())
      .await
      .map_err(Error::storage)?;
    Ok(account)
  }

  pub async fn delete(&self, id: Uuid) -> Result<()> {
    let current = self.get(id).await?;
    if current.is_system {
      return Err(Error::SystemProtected(id));
    }

    self
      .store
      .delete_account(id)
      .await
      .map_err(Error::storage)?;
    tracing::debug!(account = %id, "deleted account");
    Ok(())
  }

  /// Change the credential after verifying the current one.
  pub async fn change_password(
    &self,
    id: Uuid,
    current: &str,
    new: &str,
  ) -> Result<()> {
    let mut account = self.get(id).await?;

    if !self.hasher.verify(current, &account.password_hash) {
      return Err(Error::Unauthorized);
    }

    account.password_hash = self.hasher.hash(new)?;
    account.updated_at = Utc::now();
    self
      .store
      .update_account(account)
      .await
      .map_err(Error::storage)
  }
}
