//! Collaborator traits consumed by the access engine and the RPC layer.
//!
//! The traits are implemented by storage backends (e.g. `flock-store-sqlite`).
//! Higher layers (`flock-access`, `flock-rpc`) depend on these abstractions,
//! not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  AuthError,
  access::{Grant, Identity, PermissionTarget, RoleId},
  record::{
    Category, CategoryId, Cluster, ClusterId, OrganizationId, Person, PersonId,
    Profile, ProfileId, SmallGroup, SmallGroupId,
  },
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Criteria accepted by the person search operation.
///
/// Only the first/last name pair is evaluated. The remaining criteria are
/// part of the wire contract but have no backing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonQuery {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub phone:      Option<String>,
  pub email:      Option<String>,
  pub birth_date: Option<NaiveDate>,
  pub area_id:    Option<i64>,
}

impl PersonQuery {
  /// The name pair, if both halves are present and non-blank.
  pub fn name_pair(&self) -> Option<(&str, &str)> {
    let first = self.first_name.as_deref().map(str::trim)?;
    let last = self.last_name.as_deref().map(str::trim)?;
    if first.is_empty() || last.is_empty() {
      return None;
    }
    Some((first, last))
  }
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Shared error type for a backend implementing several collaborator traits.
pub trait Collaborator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;
}

/// Read access to the record store.
///
/// Loaders return `Ok(None)` when the identifier does not resolve; `Err` is
/// reserved for the store itself failing.
pub trait Directory: Collaborator {
  /// Ids of people whose first or nick name starts with `first` and whose
  /// last name equals `last` (case-insensitive), ascending.
  fn find_people_by_name<'a>(
    &'a self,
    first: &'a str,
    last: &'a str,
  ) -> impl Future<Output = Result<Vec<PersonId>, Self::Error>> + Send + 'a;

  fn load_person(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn load_profile(
    &self,
    id: ProfileId,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  fn load_small_group(
    &self,
    id: SmallGroupId,
  ) -> impl Future<Output = Result<Option<SmallGroup>, Self::Error>> + Send + '_;

  fn load_cluster(
    &self,
    id: ClusterId,
  ) -> impl Future<Output = Result<Option<Cluster>, Self::Error>> + Send + '_;

  fn load_category(
    &self,
    id: CategoryId,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + '_;

  /// Profiles the person is a member of.
  fn person_profiles(
    &self,
    person_id: PersonId,
  ) -> impl Future<Output = Result<Vec<Profile>, Self::Error>> + Send + '_;

  /// Ids of the members of a profile, ascending.
  fn profile_members(
    &self,
    profile_id: ProfileId,
  ) -> impl Future<Output = Result<Vec<PersonId>, Self::Error>> + Send + '_;
}

/// Turns a username/password pair into an [`Identity`].
pub trait Authenticator: Send + Sync {
  /// Fails with [`AuthError::InvalidCredentials`] when the account is unknown
  /// or the password does not verify, and with [`AuthError::AccountLocked`]
  /// when a correct password is given for a locked account.
  fn authenticate<'a>(
    &'a self,
    username: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<Identity, AuthError>> + Send + 'a;
}

/// Role membership lookup.
pub trait RoleResolver: Collaborator {
  fn roles_for<'a>(
    &'a self,
    identity: &'a Identity,
    organization_id: OrganizationId,
  ) -> impl Future<Output = Result<Vec<RoleId>, Self::Error>> + Send + 'a;
}

/// Grant lookup. A target with no grants yields an empty set, not an error.
pub trait PermissionStore: Collaborator {
  fn grants_for(
    &self,
    target: PermissionTarget,
  ) -> impl Future<Output = Result<Vec<Grant>, Self::Error>> + Send + '_;
}
