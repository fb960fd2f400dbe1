//! Username/password accounts.
//!
//! Passwords are stored as argon2 PHC strings. The password is verified
//! before the lock flag is consulted, so a locked account only reveals that
//! it is locked to a caller who already knows its password. An unknown
//! username is checked against a throwaway hash so that it costs the same
//! argon2 work as a known one.

use std::sync::LazyLock;

use argon2::{
  Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier as _,
  password_hash::{self, SaltString},
};
use rand_core::OsRng;
use rusqlite::OptionalExtension as _;

use flock_core::{
  AuthError,
  access::Identity,
  record::{OrganizationId, PersonId},
  store::Authenticator,
};

use crate::{Error, Result, SqliteStore};

/// Hash `password` into an argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Verified against when the username does not resolve.
static UNKNOWN_ACCOUNT_HASH: LazyLock<Option<String>> =
  LazyLock::new(|| hash_password("unknown-account").ok());

/// Whether `password` matches the PHC string `hash`.
fn verify_password(password: &str, hash: &str) -> Result<bool, password_hash::Error> {
  let parsed = PasswordHash::new(hash)?;
  Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// An account row to insert.
#[derive(Debug, Clone)]
pub struct NewAccount {
  pub username:        String,
  pub password_hash:   String,
  pub person_id:       PersonId,
  pub organization_id: OrganizationId,
  pub locked:          bool,
}

struct AccountRow {
  username:        String,
  password_hash:   String,
  person_id:       PersonId,
  organization_id: OrganizationId,
  locked:          bool,
}

impl SqliteStore {
  pub async fn insert_account(&self, account: NewAccount) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO accounts (username, password_hash, person_id, organization_id, locked)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            account.username,
            account.password_hash,
            account.person_id,
            account.organization_id,
            account.locked,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Lock or unlock an account. Returns whether the account exists.
  pub async fn set_account_locked(&self, username: &str, locked: bool) -> Result<bool> {
    let username = username.to_owned();
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE accounts SET locked = ?2 WHERE username = ?1",
          rusqlite::params![username, locked],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn account(&self, username: &str) -> Result<Option<AccountRow>> {
    let username = username.to_owned();
    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT username, password_hash, person_id, organization_id, locked
               FROM accounts WHERE username = ?1",
              rusqlite::params![username],
              |row| {
                Ok(AccountRow {
                  username:        row.get(0)?,
                  password_hash:   row.get(1)?,
                  person_id:       row.get(2)?,
                  organization_id: row.get(3)?,
                  locked:          row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }
}

impl Authenticator for SqliteStore {
  async fn authenticate(
    &self,
    username: &str,
    password: &str,
  ) -> Result<Identity, AuthError> {
    let account = self
      .account(username)
      .await
      .map_err(|e| AuthError::Backend(Box::new(e)))?;

    let Some(account) = account else {
      if let Some(hash) = UNKNOWN_ACCOUNT_HASH.as_deref() {
        let _ = verify_password(password, hash);
      }
      return Err(AuthError::InvalidCredentials);
    };

    match verify_password(password, &account.password_hash) {
      Ok(true) => {}
      Ok(false) => return Err(AuthError::InvalidCredentials),
      Err(e) => {
        tracing::warn!(username = %account.username, error = %e, "stored password hash is malformed");
        return Err(AuthError::InvalidCredentials);
      }
    }

    if account.locked {
      return Err(AuthError::AccountLocked);
    }

    Ok(Identity {
      person_id:       account.person_id,
      organization_id: account.organization_id,
      username:        account.username,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_account_hash_is_a_valid_phc_string() {
    let hash = UNKNOWN_ACCOUNT_HASH.as_deref().expect("hash");
    assert!(matches!(verify_password("anything", hash), Ok(false)));
    assert!(matches!(verify_password("unknown-account", hash), Ok(true)));
  }

  #[test]
  fn malformed_hash_is_an_error() {
    assert!(verify_password("hunter2", "not-a-phc-string").is_err());
  }
}
