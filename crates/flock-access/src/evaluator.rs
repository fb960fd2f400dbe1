//! The access evaluator: direct grants unioned with role-inherited grants.

use std::{collections::HashMap, future::Future, sync::Mutex};

use flock_core::{
  access::{Grant, Identity, Operation, PermissionTarget, RoleId, Subject},
  record::OrganizationId,
  store::{PermissionStore, RoleResolver},
};
use tokio::sync::OnceCell;

/// Yes/no permission decisions for one caller.
///
/// The projector depends on this seam rather than on [`AccessEvaluator`]
/// directly.
pub trait Authorizer: Send + Sync {
  fn is_permitted(
    &self,
    target: PermissionTarget,
    operation: Operation,
  ) -> impl Future<Output = bool> + Send + '_;
}

/// Evaluates permissions for a single identity over the lifetime of one call.
///
/// Roles are resolved at most once, on first need. Decisions are memoised per
/// `(target, operation)`; grants are read-only within a call so the memo can
/// never go stale.
pub struct AccessEvaluator<'a, P, R> {
  identity:        &'a Identity,
  permissions:     &'a P,
  roles:           &'a R,
  organization_id: OrganizationId,
  resolved_roles:  OnceCell<Vec<RoleId>>,
  decisions:       Mutex<HashMap<(PermissionTarget, Operation), bool>>,
}

impl<'a, P, R> AccessEvaluator<'a, P, R>
where
  P: PermissionStore,
  R: RoleResolver,
{
  pub fn new(
    identity: &'a Identity,
    permissions: &'a P,
    roles: &'a R,
    organization_id: OrganizationId,
  ) -> Self {
    Self {
      identity,
      permissions,
      roles,
      organization_id,
      resolved_roles: OnceCell::new(),
      decisions: Mutex::new(HashMap::new()),
    }
  }

  /// The identity's roles in the configured organisation. A resolver failure
  /// degrades to "no roles".
  async fn roles(&self) -> &[RoleId] {
    self
      .resolved_roles
      .get_or_init(|| async {
        match self
          .roles
          .roles_for(self.identity, self.organization_id)
          .await
        {
          Ok(roles) => roles,
          Err(e) => {
            tracing::warn!(
              person_id = self.identity.person_id,
              organization_id = self.organization_id,
              error = %e,
              "role resolution failed; evaluating direct grants only",
            );
            Vec::new()
          }
        }
      })
      .await
  }

  async fn evaluate(
    &self,
    target: PermissionTarget,
    operation: Operation,
  ) -> bool {
    let grants = match self.permissions.grants_for(target).await {
      Ok(grants) => grants,
      Err(e) => {
        tracing::warn!(%target, error = %e, "grant lookup failed; denying");
        return false;
      }
    };
    if grants.is_empty() {
      return false;
    }

    let direct = Grant::new(Subject::person(self.identity.person_id), operation);
    if grants.contains(&direct) {
      return true;
    }

    self
      .roles()
      .await
      .iter()
      .any(|&role| grants.contains(&Grant::new(Subject::role(role), operation)))
  }

  fn memoised(
    &self,
    target: PermissionTarget,
    operation: Operation,
  ) -> Option<bool> {
    self
      .decisions
      .lock()
      .ok()
      .and_then(|memo| memo.get(&(target, operation)).copied())
  }

  fn remember(
    &self,
    target: PermissionTarget,
    operation: Operation,
    permitted: bool,
  ) {
    if let Ok(mut memo) = self.decisions.lock() {
      memo.insert((target, operation), permitted);
    }
  }
}

impl<P, R> Authorizer for AccessEvaluator<'_, P, R>
where
  P: PermissionStore,
  R: RoleResolver,
{
  async fn is_permitted(
    &self,
    target: PermissionTarget,
    operation: Operation,
  ) -> bool {
    if let Some(permitted) = self.memoised(target, operation) {
      return permitted;
    }
    let permitted = self.evaluate(target, operation).await;
    tracing::debug!(
      person_id = self.identity.person_id,
      %target,
      %operation,
      permitted,
      "access decision",
    );
    self.remember(target, operation, permitted);
    permitted
  }
}
