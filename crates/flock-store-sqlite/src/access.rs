//! Role membership and grant lookup.

use rusqlite::OptionalExtension as _;

use flock_core::{
  access::{Grant, Identity, Operation, PermissionTarget, RoleId, Subject, SubjectKind},
  record::OrganizationId,
  store::{PermissionStore, RoleResolver},
};

use crate::{Error, Result, SqliteStore, encode::encode_target};

impl RoleResolver for SqliteStore {
  /// Roles are scoped to an organisation; asking about an organisation the
  /// store has never heard of is an error rather than "no roles".
  async fn roles_for(
    &self,
    identity: &Identity,
    organization_id: OrganizationId,
  ) -> Result<Vec<RoleId>> {
    let person_id = identity.person_id;

    let roles = self
      .conn
      .call(move |conn| {
        let known = conn
          .query_row(
            "SELECT 1 FROM organizations WHERE organization_id = ?1",
            rusqlite::params![organization_id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !known {
          return Ok(None);
        }

        let roles = conn
          .prepare(
            "SELECT r.role_id
             FROM roles r
             JOIN role_members m ON m.role_id = r.role_id
             WHERE r.organization_id = ?1 AND m.person_id = ?2
             ORDER BY r.role_id",
          )?
          .query_map(rusqlite::params![organization_id, person_id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<RoleId>>>()?;
        Ok(Some(roles))
      })
      .await?;

    roles.ok_or(Error::UnknownOrganization(organization_id))
  }
}

impl PermissionStore for SqliteStore {
  async fn grants_for(&self, target: PermissionTarget) -> Result<Vec<Grant>> {
    let (kind, key) = encode_target(target);

    let rows: Vec<(String, i64, String)> = self
      .conn
      .call(move |conn| {
        let rows = conn
          .prepare(
            "SELECT subject_kind, subject_id, operation FROM grants
             WHERE target_kind = ?1 AND target_key = ?2",
          )?
          .query_map(rusqlite::params![kind, key], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(kind, id, operation)| -> Result<Grant> {
        let kind: SubjectKind = kind
          .parse()
          .map_err(|_| flock_core::Error::UnknownSubjectKind(kind.clone()))?;
        let operation: Operation = operation
          .parse()
          .map_err(|_| flock_core::Error::UnknownOperation(operation.clone()))?;
        Ok(Grant::new(Subject { kind, id }, operation))
      })
      .collect()
  }
}
