//! Write helpers used to populate a store.
//!
//! The read façade never writes; these exist for provisioning and tests.

use flock_core::{
  access::{Grant, PermissionTarget, RoleId},
  record::{
    Category, Cluster, Lookup, OrganizationId, Person, PersonId, Profile,
    ProfileId, SmallGroup,
  },
};

use crate::{
  Result, SqliteStore,
  encode::{encode_date, encode_dt, encode_id, encode_lookup, encode_target},
};

fn upsert_lookup(
  tx: &rusqlite::Transaction<'_>,
  category: &str,
  lookup: &Option<Lookup>,
) -> rusqlite::Result<()> {
  if let Some(l) = lookup {
    tx.execute(
      "INSERT OR REPLACE INTO lookups (lookup_id, category, value) VALUES (?1, ?2, ?3)",
      rusqlite::params![l.lookup_id, category, l.value],
    )?;
  }
  Ok(())
}

impl SqliteStore {
  pub async fn insert_organization(
    &self,
    organization_id: OrganizationId,
    name: &str,
  ) -> Result<()> {
    let name = name.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO organizations (organization_id, name) VALUES (?1, ?2)",
          rusqlite::params![organization_id, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a person together with the lookups and contact rows it refers to.
  pub async fn insert_person(&self, person: &Person) -> Result<()> {
    let p = person.clone();
    let date_created = encode_dt(p.date_created);
    let date_modified = encode_dt(p.date_modified);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        upsert_lookup(&tx, "member_status", &p.member_status)?;
        upsert_lookup(&tx, "marital_status", &p.marital_status)?;

        tx.execute(
          "INSERT INTO people (
             person_id, first_name, nick_name, middle_name, last_name, suffix,
             title, birth_date, graduation_date, gender, member_status_id,
             campus_id, staff_member, record_status, blob_id, marital_status_id,
             anniversary_date, employer, position, medical_information,
             envelope_number, contribute_individually, print_statement,
             email_statement, family_id, notes, created_by, date_created,
             modified_by, date_modified
           ) VALUES (
             ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
             ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28,
             ?29, ?30
           )",
          rusqlite::params![
            p.person_id,
            p.first_name,
            p.nick_name,
            p.middle_name,
            p.last_name,
            p.suffix,
            p.title,
            encode_date(p.birth_date),
            encode_date(p.graduation_date),
            p.gender.to_string(),
            encode_lookup(&p.member_status),
            encode_id(p.campus_id),
            p.staff_member,
            p.record_status.to_string(),
            encode_id(p.blob_id),
            encode_lookup(&p.marital_status),
            encode_date(p.anniversary_date),
            p.employer,
            p.position,
            p.medical_information,
            encode_id(p.envelope_number),
            p.contribute_individually,
            p.print_statement,
            p.email_statement,
            encode_id(p.family_id),
            p.notes,
            p.created_by,
            date_created,
            p.modified_by,
            date_modified,
          ],
        )?;

        for a in &p.addresses {
          upsert_lookup(&tx, "address_type", &a.address_type)?;
          tx.execute(
            "INSERT INTO addresses (
               address_id, person_id, address_type_id, street_line_1,
               street_line_2, city, state, postal_code, country, is_primary
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
              a.address_id,
              p.person_id,
              encode_lookup(&a.address_type),
              a.street_line_1,
              a.street_line_2,
              a.city,
              a.state,
              a.postal_code,
              a.country,
              a.primary,
            ],
          )?;
        }

        for ph in &p.phones {
          upsert_lookup(&tx, "phone_type", &ph.phone_type)?;
          tx.execute(
            "INSERT INTO phones (
               person_id, phone_type_id, number, extension, unlisted, sms_enabled
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
              p.person_id,
              encode_lookup(&ph.phone_type),
              ph.number,
              ph.extension,
              ph.unlisted,
              ph.sms_enabled,
            ],
          )?;
        }

        for e in &p.emails {
          tx.execute(
            "INSERT INTO emails (email_id, person_id, address, active, email_order)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![e.email_id, p.person_id, e.address, e.active, e.order],
          )?;
        }

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a profile. `member_count` is derived from membership rows and is
  /// ignored here.
  pub async fn insert_profile(&self, profile: &Profile) -> Result<()> {
    let p = profile.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO profiles (
             profile_id, name, profile_type, owner_id, parent_profile_id,
             active, summary
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            p.profile_id,
            p.name,
            p.profile_type.code(),
            encode_id(p.owner_id),
            encode_id(p.parent_profile_id),
            p.active,
            p.summary,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn add_profile_member(
    &self,
    profile_id: ProfileId,
    person_id: PersonId,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO profile_members (profile_id, person_id) VALUES (?1, ?2)",
          rusqlite::params![profile_id, person_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_category(&self, category: &Category) -> Result<()> {
    let c = category.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (category_id, name, description, allow_registrations)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![c.category_id, c.name, c.description, c.allow_registrations],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a cluster. `group_count` is derived and ignored here.
  pub async fn insert_cluster(&self, cluster: &Cluster) -> Result<()> {
    let c = cluster.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO clusters (cluster_id, name, parent_cluster_id, category_id, level)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            c.cluster_id,
            c.name,
            encode_id(c.parent_cluster_id),
            encode_id(c.category_id),
            c.level,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_small_group(&self, group: &SmallGroup) -> Result<()> {
    let g = group.clone();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO small_groups (
             group_id, name, description, leader_id, cluster_id, meeting_day,
             meeting_time, member_count, active
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            g.group_id,
            g.name,
            g.description,
            encode_id(g.leader_id),
            encode_id(g.cluster_id),
            g.meeting_day,
            g.meeting_time,
            encode_id(g.member_count),
            g.active,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn insert_role(
    &self,
    role_id: RoleId,
    organization_id: OrganizationId,
    name: &str,
  ) -> Result<()> {
    let name = name.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO roles (role_id, organization_id, name) VALUES (?1, ?2, ?3)",
          rusqlite::params![role_id, organization_id, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn add_role_member(&self, role_id: RoleId, person_id: PersonId) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO role_members (role_id, person_id) VALUES (?1, ?2)",
          rusqlite::params![role_id, person_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Attach a grant to `target`. Granting the same thing twice is a no-op.
  pub async fn insert_grant(&self, target: PermissionTarget, grant: Grant) -> Result<()> {
    let (kind, key) = encode_target(target);
    let subject_kind = grant.subject.kind.to_string();
    let operation = grant.operation.to_string();
    let subject_id = grant.subject.id;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO grants (
             target_kind, target_key, subject_kind, subject_id, operation
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![kind, key, subject_kind, subject_id, operation],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
