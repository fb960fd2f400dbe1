//! Encoding and decoding between record types and SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`, timestamps as RFC 3339 strings. The
//! record layer's "no value" sentinels (`UNSET_DATE`, `NOT_FOUND`) are stored
//! as `NULL` and restored on the way out.

use chrono::{DateTime, NaiveDate, Utc};
use flock_core::{
  Meaningful as _,
  access::PermissionTarget,
  record::{
    Category, Cluster, Gender, Lookup, NOT_FOUND, Person, PersonAddress,
    PersonEmail, PersonPhone, Profile, ProfileType, RecordStatus, SmallGroup,
    UNSET_DATE,
  },
};

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> Option<String> {
  d.is_meaningful().then(|| d.format(DATE_FORMAT).to_string())
}

pub fn decode_date(s: Option<&str>) -> Result<NaiveDate> {
  match s {
    None => Ok(UNSET_DATE),
    Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
      .map_err(|e| Error::DateParse(format!("{s:?}: {e}"))),
  }
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Identifiers and lookups ─────────────────────────────────────────────────

pub fn encode_id(id: i64) -> Option<i64> { (id != NOT_FOUND).then_some(id) }

pub fn decode_id(id: Option<i64>) -> i64 { id.unwrap_or(NOT_FOUND) }

pub fn encode_lookup(lookup: &Option<Lookup>) -> Option<i64> {
  lookup.as_ref().map(|l| l.lookup_id)
}

pub fn decode_lookup(id: Option<i64>, value: Option<String>) -> Option<Lookup> {
  Some(Lookup { lookup_id: id?, value: value? })
}

// ─── Permission targets ──────────────────────────────────────────────────────

/// `(target_kind, target_key)` as stored in the `grants` table.
pub fn encode_target(target: PermissionTarget) -> (&'static str, String) {
  match target {
    PermissionTarget::Field(field) => ("field", field.to_string()),
    PermissionTarget::Profile(id) => ("profile", id.to_string()),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// A `people` row joined with its two lookup values.
pub struct RawPerson {
  pub person_id:               i64,
  pub first_name:              String,
  pub nick_name:               String,
  pub middle_name:             String,
  pub last_name:               String,
  pub suffix:                  String,
  pub title:                   String,
  pub birth_date:              Option<String>,
  pub graduation_date:         Option<String>,
  pub gender:                  String,
  pub member_status_id:        Option<i64>,
  pub member_status:           Option<String>,
  pub campus_id:               Option<i64>,
  pub staff_member:            bool,
  pub record_status:           String,
  pub blob_id:                 Option<i64>,
  pub marital_status_id:       Option<i64>,
  pub marital_status:          Option<String>,
  pub anniversary_date:        Option<String>,
  pub employer:                String,
  pub position:                String,
  pub medical_information:     String,
  pub envelope_number:         Option<i64>,
  pub contribute_individually: bool,
  pub print_statement:         bool,
  pub email_statement:         bool,
  pub family_id:               Option<i64>,
  pub notes:                   String,
  pub created_by:              String,
  pub date_created:            String,
  pub modified_by:             String,
  pub date_modified:           String,
}

pub const PERSON_COLUMNS: &str = "
  p.person_id, p.first_name, p.nick_name, p.middle_name, p.last_name,
  p.suffix, p.title, p.birth_date, p.graduation_date, p.gender,
  p.member_status_id, ms.value AS member_status, p.campus_id, p.staff_member,
  p.record_status, p.blob_id, p.marital_status_id, mar.value AS marital_status,
  p.anniversary_date, p.employer, p.position, p.medical_information,
  p.envelope_number, p.contribute_individually, p.print_statement,
  p.email_statement, p.family_id, p.notes, p.created_by, p.date_created,
  p.modified_by, p.date_modified";

pub const PERSON_JOINS: &str = "
  FROM people p
  LEFT JOIN lookups ms  ON ms.lookup_id  = p.member_status_id
  LEFT JOIN lookups mar ON mar.lookup_id = p.marital_status_id";

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:               row.get("person_id")?,
      first_name:              row.get("first_name")?,
      nick_name:               row.get("nick_name")?,
      middle_name:             row.get("middle_name")?,
      last_name:               row.get("last_name")?,
      suffix:                  row.get("suffix")?,
      title:                   row.get("title")?,
      birth_date:              row.get("birth_date")?,
      graduation_date:         row.get("graduation_date")?,
      gender:                  row.get("gender")?,
      member_status_id:        row.get("member_status_id")?,
      member_status:           row.get("member_status")?,
      campus_id:               row.get("campus_id")?,
      staff_member:            row.get("staff_member")?,
      record_status:           row.get("record_status")?,
      blob_id:                 row.get("blob_id")?,
      marital_status_id:       row.get("marital_status_id")?,
      marital_status:          row.get("marital_status")?,
      anniversary_date:        row.get("anniversary_date")?,
      employer:                row.get("employer")?,
      position:                row.get("position")?,
      medical_information:     row.get("medical_information")?,
      envelope_number:         row.get("envelope_number")?,
      contribute_individually: row.get("contribute_individually")?,
      print_statement:         row.get("print_statement")?,
      email_statement:         row.get("email_statement")?,
      family_id:               row.get("family_id")?,
      notes:                   row.get("notes")?,
      created_by:              row.get("created_by")?,
      date_created:            row.get("date_created")?,
      modified_by:             row.get("modified_by")?,
      date_modified:           row.get("date_modified")?,
    })
  }

  /// Decode into a [`Person`] with the given contact collections attached.
  pub fn into_person(
    self,
    addresses: Vec<PersonAddress>,
    phones: Vec<PersonPhone>,
    emails: Vec<PersonEmail>,
  ) -> Result<Person> {
    let gender: Gender = self
      .gender
      .parse()
      .map_err(|_| flock_core::Error::UnknownGender(self.gender.clone()))?;
    let record_status: RecordStatus = self
      .record_status
      .parse()
      .map_err(|_| flock_core::Error::UnknownRecordStatus(self.record_status.clone()))?;

    Ok(Person {
      person_id: self.person_id,
      first_name: self.first_name,
      nick_name: self.nick_name,
      middle_name: self.middle_name,
      last_name: self.last_name,
      suffix: self.suffix,
      title: self.title,
      birth_date: decode_date(self.birth_date.as_deref())?,
      graduation_date: decode_date(self.graduation_date.as_deref())?,
      gender,
      member_status: decode_lookup(self.member_status_id, self.member_status),
      campus_id: decode_id(self.campus_id),
      staff_member: self.staff_member,
      record_status,
      blob_id: decode_id(self.blob_id),
      marital_status: decode_lookup(self.marital_status_id, self.marital_status),
      anniversary_date: decode_date(self.anniversary_date.as_deref())?,
      employer: self.employer,
      position: self.position,
      medical_information: self.medical_information,
      envelope_number: decode_id(self.envelope_number),
      contribute_individually: self.contribute_individually,
      print_statement: self.print_statement,
      email_statement: self.email_statement,
      family_id: decode_id(self.family_id),
      notes: self.notes,
      created_by: self.created_by,
      date_created: decode_dt(&self.date_created)?,
      modified_by: self.modified_by,
      date_modified: decode_dt(&self.date_modified)?,
      addresses,
      phones,
      emails,
    })
  }
}

pub fn address_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PersonAddress> {
  Ok(PersonAddress {
    address_id:    row.get("address_id")?,
    address_type:  decode_lookup(row.get("address_type_id")?, row.get("address_type")?),
    street_line_1: row.get("street_line_1")?,
    street_line_2: row.get("street_line_2")?,
    city:          row.get("city")?,
    state:         row.get("state")?,
    postal_code:   row.get("postal_code")?,
    country:       row.get("country")?,
    primary:       row.get("is_primary")?,
  })
}

pub fn phone_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PersonPhone> {
  Ok(PersonPhone {
    phone_type:  decode_lookup(row.get("phone_type_id")?, row.get("phone_type")?),
    number:      row.get("number")?,
    extension:   row.get("extension")?,
    unlisted:    row.get("unlisted")?,
    sms_enabled: row.get("sms_enabled")?,
  })
}

pub fn email_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PersonEmail> {
  Ok(PersonEmail {
    email_id: row.get("email_id")?,
    address:  row.get("address")?,
    active:   row.get("active")?,
    order:    row.get("email_order")?,
  })
}

/// A `profiles` row with its member count.
pub struct RawProfile {
  pub profile_id:        i64,
  pub name:              String,
  pub profile_type:      i32,
  pub owner_id:          Option<i64>,
  pub parent_profile_id: Option<i64>,
  pub active:            bool,
  pub member_count:      i64,
  pub summary:           String,
}

pub const PROFILE_COLUMNS: &str = "
  pr.profile_id, pr.name, pr.profile_type, pr.owner_id, pr.parent_profile_id,
  pr.active, pr.summary,
  (SELECT COUNT(*) FROM profile_members m WHERE m.profile_id = pr.profile_id)
    AS member_count";

impl RawProfile {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      profile_id:        row.get("profile_id")?,
      name:              row.get("name")?,
      profile_type:      row.get("profile_type")?,
      owner_id:          row.get("owner_id")?,
      parent_profile_id: row.get("parent_profile_id")?,
      active:            row.get("active")?,
      member_count:      row.get("member_count")?,
      summary:           row.get("summary")?,
    })
  }

  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      profile_id:        self.profile_id,
      name:              self.name,
      profile_type:      ProfileType::from_code(self.profile_type)?,
      owner_id:          decode_id(self.owner_id),
      parent_profile_id: decode_id(self.parent_profile_id),
      active:            self.active,
      member_count:      self.member_count,
      summary:           self.summary,
    })
  }
}

pub fn small_group_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SmallGroup> {
  Ok(SmallGroup {
    group_id:     row.get("group_id")?,
    name:         row.get("name")?,
    description:  row.get("description")?,
    leader_id:    decode_id(row.get("leader_id")?),
    cluster_id:   decode_id(row.get("cluster_id")?),
    meeting_day:  row.get("meeting_day")?,
    meeting_time: row.get("meeting_time")?,
    member_count: decode_id(row.get("member_count")?),
    active:       row.get("active")?,
  })
}

pub fn cluster_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Cluster> {
  Ok(Cluster {
    cluster_id:        row.get("cluster_id")?,
    name:              row.get("name")?,
    parent_cluster_id: decode_id(row.get("parent_cluster_id")?),
    category_id:       decode_id(row.get("category_id")?),
    level:             row.get("level")?,
    group_count:       row.get("group_count")?,
  })
}

pub fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
  Ok(Category {
    category_id:         row.get("category_id")?,
    name:                row.get("name")?,
    description:         row.get("description")?,
    allow_registrations: row.get("allow_registrations")?,
  })
}

#[cfg(test)]
mod tests {
  use flock_core::access::ProtectedField;

  use super::*;

  #[test]
  fn unset_dates_are_stored_as_null() {
    assert_eq!(encode_date(UNSET_DATE), None);
    assert_eq!(decode_date(None).unwrap(), UNSET_DATE);
    let d = NaiveDate::from_ymd_opt(1980, 5, 1).unwrap();
    assert_eq!(encode_date(d).as_deref(), Some("1980-05-01"));
    assert_eq!(decode_date(Some("1980-05-01")).unwrap(), d);
  }

  #[test]
  fn malformed_dates_are_rejected() {
    assert!(matches!(decode_date(Some("05/01/1980")), Err(Error::DateParse(_))));
  }

  #[test]
  fn lookups_need_both_halves() {
    assert_eq!(decode_lookup(Some(3), None), None);
    assert_eq!(
      decode_lookup(Some(3), Some("Member".into())),
      Some(Lookup { lookup_id: 3, value: "Member".into() })
    );
  }

  #[test]
  fn targets_use_wire_names() {
    assert_eq!(
      encode_target(ProtectedField::BirthDate.into()),
      ("field", "Profile_BirthDate".to_string())
    );
    assert_eq!(
      encode_target(PermissionTarget::Profile(9)),
      ("profile", "9".to_string())
    );
  }
}
