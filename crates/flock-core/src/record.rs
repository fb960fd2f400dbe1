//! Record types owned by the storage layer.
//!
//! Records are read-only snapshots. Attributes follow the storage
//! conventions for "no value": an empty string, [`UNSET_DATE`], the
//! identifier [`NOT_FOUND`], or `None` for nullable references. See
//! [`crate::field::Meaningful`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ─── Identifiers ─────────────────────────────────────────────────────────────

pub type PersonId = i64;
pub type ProfileId = i64;
pub type SmallGroupId = i64;
pub type ClusterId = i64;
pub type CategoryId = i64;
pub type OrganizationId = i64;
pub type LookupId = i64;
pub type BlobId = i64;

/// Identifier value meaning "no such record" or "no reference".
pub const NOT_FOUND: i64 = -1;

/// Date value meaning "not recorded".
pub const UNSET_DATE: NaiveDate = NaiveDate::MIN;

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
pub enum Gender {
  #[default]
  Unknown,
  Male,
  Female,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
pub enum RecordStatus {
  #[default]
  Active,
  Inactive,
  Pending,
}

/// Transmitted as its integer code.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::FromRepr,
)]
#[repr(i32)]
pub enum ProfileType {
  Personal = 1,
  Ministry = 2,
  Serving  = 3,
  Event    = 4,
}

impl ProfileType {
  pub fn code(self) -> i32 { self as i32 }

  pub fn from_code(code: i32) -> crate::Result<Self> {
    Self::from_repr(code).ok_or(crate::Error::UnknownProfileType(code))
  }
}

/// A value drawn from an organisation-maintained lookup list (member status,
/// marital status, address type, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
  pub lookup_id: LookupId,
  pub value:     String,
}

// ─── Person ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PersonAddress {
  pub address_id:    i64,
  pub address_type:  Option<Lookup>,
  pub street_line_1: String,
  pub street_line_2: String,
  pub city:          String,
  pub state:         String,
  pub postal_code:   String,
  pub country:       String,
  pub primary:       bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonPhone {
  pub phone_type:  Option<Lookup>,
  pub number:      String,
  pub extension:   String,
  pub unlisted:    bool,
  pub sms_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonEmail {
  pub email_id: i64,
  pub address:  String,
  pub active:   bool,
  /// Preference rank; lower sorts first.
  pub order:    i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
  pub person_id:               PersonId,
  pub first_name:              String,
  pub nick_name:               String,
  pub middle_name:             String,
  pub last_name:               String,
  pub suffix:                  String,
  pub title:                   String,
  pub birth_date:              NaiveDate,
  /// Expected high-school graduation; drives the derived grade.
  pub graduation_date:         NaiveDate,
  pub gender:                  Gender,
  pub member_status:           Option<Lookup>,
  pub campus_id:               i64,
  pub staff_member:            bool,
  pub record_status:           RecordStatus,
  pub blob_id:                 BlobId,
  pub marital_status:          Option<Lookup>,
  pub anniversary_date:        NaiveDate,
  pub employer:                String,
  pub position:                String,
  pub medical_information:     String,
  pub envelope_number:         i64,
  pub contribute_individually: bool,
  pub print_statement:         bool,
  pub email_statement:         bool,
  pub family_id:               i64,
  pub notes:                   String,
  pub created_by:              String,
  pub date_created:            DateTime<Utc>,
  pub modified_by:             String,
  pub date_modified:           DateTime<Utc>,
  pub addresses:               Vec<PersonAddress>,
  pub phones:                  Vec<PersonPhone>,
  pub emails:                  Vec<PersonEmail>,
}

impl Person {
  /// A person with every attribute at its "no value" sentinel.
  pub fn new(person_id: PersonId, created_at: DateTime<Utc>) -> Self {
    Self {
      person_id,
      first_name: String::new(),
      nick_name: String::new(),
      middle_name: String::new(),
      last_name: String::new(),
      suffix: String::new(),
      title: String::new(),
      birth_date: UNSET_DATE,
      graduation_date: UNSET_DATE,
      gender: Gender::Unknown,
      member_status: None,
      campus_id: NOT_FOUND,
      staff_member: false,
      record_status: RecordStatus::Active,
      blob_id: NOT_FOUND,
      marital_status: None,
      anniversary_date: UNSET_DATE,
      employer: String::new(),
      position: String::new(),
      medical_information: String::new(),
      envelope_number: NOT_FOUND,
      contribute_individually: false,
      print_statement: false,
      email_statement: false,
      family_id: NOT_FOUND,
      notes: String::new(),
      created_by: String::new(),
      date_created: created_at,
      modified_by: String::new(),
      date_modified: created_at,
      addresses: Vec::new(),
      phones: Vec::new(),
      emails: Vec::new(),
    }
  }
}

// ─── Profiles ────────────────────────────────────────────────────────────────

/// A profile (tag): a named list of people, permissioned per profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
  pub profile_id:        ProfileId,
  pub name:              String,
  pub profile_type:      ProfileType,
  pub owner_id:          PersonId,
  pub parent_profile_id: ProfileId,
  pub active:            bool,
  pub member_count:      i64,
  pub summary:           String,
}

// ─── Small groups ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SmallGroup {
  pub group_id:     SmallGroupId,
  pub name:         String,
  pub description:  String,
  pub leader_id:    PersonId,
  pub cluster_id:   ClusterId,
  pub meeting_day:  String,
  pub meeting_time: String,
  pub member_count: i64,
  pub active:       bool,
}

/// A node in the small-group hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
  pub cluster_id:        ClusterId,
  pub name:              String,
  pub parent_cluster_id: ClusterId,
  pub category_id:       CategoryId,
  pub level:             i32,
  pub group_count:       i64,
}

/// The root of a small-group hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
  pub category_id:         CategoryId,
  pub name:                String,
  pub description:         String,
  pub allow_registrations: bool,
}
