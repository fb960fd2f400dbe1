//! [`SqliteStore`]: the SQLite implementation of [`Directory`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use flock_core::{
  record::{
    Category, CategoryId, Cluster, ClusterId, Person, PersonId, Profile,
    ProfileId, SmallGroup, SmallGroupId,
  },
  store::{Collaborator, Directory},
};

use crate::{
  Result,
  encode::{
    PERSON_COLUMNS, PERSON_JOINS, PROFILE_COLUMNS, RawPerson, RawProfile,
    address_from_row, category_from_row, cluster_from_row, email_from_row,
    phone_from_row, small_group_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Flock data store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store; useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Escape `LIKE` metacharacters and append the prefix wildcard.
fn like_prefix(s: &str) -> String {
  let mut out = String::with_capacity(s.len() + 1);
  for c in s.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out.push('%');
  out
}

// ─── Directory impl ──────────────────────────────────────────────────────────

impl Collaborator for SqliteStore {
  type Error = crate::Error;
}

impl Directory for SqliteStore {
  async fn find_people_by_name(
    &self,
    first: &str,
    last: &str,
  ) -> Result<Vec<PersonId>> {
    let first_pattern = like_prefix(first.trim());
    let last = last.trim().to_owned();

    let ids = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT person_id FROM people
           WHERE last_name = ?2 COLLATE NOCASE
             AND (first_name LIKE ?1 ESCAPE '\\' OR nick_name LIKE ?1 ESCAPE '\\')
           ORDER BY person_id",
        )?;
        let ids = stmt
          .query_map(rusqlite::params![first_pattern, last], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<PersonId>>>()?;
        Ok(ids)
      })
      .await?;

    Ok(ids)
  }

  async fn load_person(&self, id: PersonId) -> Result<Option<Person>> {
    let loaded = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {PERSON_COLUMNS} {PERSON_JOINS} WHERE p.person_id = ?1");
        let Some(raw) = conn
          .query_row(&sql, rusqlite::params![id], RawPerson::from_row)
          .optional()?
        else {
          return Ok(None);
        };

        let addresses = conn
          .prepare(
            "SELECT a.*, t.value AS address_type
             FROM addresses a
             LEFT JOIN lookups t ON t.lookup_id = a.address_type_id
             WHERE a.person_id = ?1
             ORDER BY a.is_primary DESC, a.address_id",
          )?
          .query_map(rusqlite::params![id], address_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let phones = conn
          .prepare(
            "SELECT ph.*, t.value AS phone_type
             FROM phones ph
             LEFT JOIN lookups t ON t.lookup_id = ph.phone_type_id
             WHERE ph.person_id = ?1
             ORDER BY ph.phone_id",
          )?
          .query_map(rusqlite::params![id], phone_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let emails = conn
          .prepare("SELECT * FROM emails WHERE person_id = ?1 ORDER BY email_id")?
          .query_map(rusqlite::params![id], email_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((raw, addresses, phones, emails)))
      })
      .await?;

    loaded
      .map(|(raw, addresses, phones, emails)| raw.into_person(addresses, phones, emails))
      .transpose()
  }

  async fn load_profile(&self, id: ProfileId) -> Result<Option<Profile>> {
    let raw = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles pr WHERE pr.profile_id = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], RawProfile::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn load_small_group(&self, id: SmallGroupId) -> Result<Option<SmallGroup>> {
    let group = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT * FROM small_groups WHERE group_id = ?1",
              rusqlite::params![id],
              small_group_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(group)
  }

  async fn load_cluster(&self, id: ClusterId) -> Result<Option<Cluster>> {
    let cluster = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT c.*,
                 (SELECT COUNT(*) FROM small_groups g WHERE g.cluster_id = c.cluster_id)
                   AS group_count
               FROM clusters c
               WHERE c.cluster_id = ?1",
              rusqlite::params![id],
              cluster_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(cluster)
  }

  async fn load_category(&self, id: CategoryId) -> Result<Option<Category>> {
    let category = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT * FROM categories WHERE category_id = ?1",
              rusqlite::params![id],
              category_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(category)
  }

  async fn person_profiles(&self, person_id: PersonId) -> Result<Vec<Profile>> {
    let raws = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {PROFILE_COLUMNS}
           FROM profiles pr
           JOIN profile_members pm ON pm.profile_id = pr.profile_id
           WHERE pm.person_id = ?1
           ORDER BY pr.profile_id"
        );
        let rows = conn
          .prepare(&sql)?
          .query_map(rusqlite::params![person_id], RawProfile::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProfile::into_profile).collect()
  }

  async fn profile_members(&self, profile_id: ProfileId) -> Result<Vec<PersonId>> {
    let ids = self
      .conn
      .call(move |conn| {
        let ids = conn
          .prepare(
            "SELECT person_id FROM profile_members
             WHERE profile_id = ?1
             ORDER BY person_id",
          )?
          .query_map(rusqlite::params![profile_id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<PersonId>>>()?;
        Ok(ids)
      })
      .await?;
    Ok(ids)
  }
}

#[cfg(test)]
mod tests {
  use super::like_prefix;

  #[test]
  fn like_metacharacters_are_escaped() {
    assert_eq!(like_prefix("Ann"), "Ann%");
    assert_eq!(like_prefix("50%_"), "50\\%\\_%");
  }
}
