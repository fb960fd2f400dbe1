//! Output structures returned over RPC.
//!
//! Every optional member is a [`Field`]; absent members are left out of the
//! JSON entirely. Enumerations are carried as strings (gender, statuses,
//! lookup values) or integers (profile type), never as Rust enums.

use chrono::{DateTime, NaiveDate, Utc};
use flock_core::{
  Field,
  record::{
    CategoryId, ClusterId, NOT_FOUND, PersonId, ProfileId, SmallGroupId,
  },
};
use serde::{Deserialize, Serialize};

// ─── Protocol ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolVersion {
  pub major: u32,
  pub minor: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSupport {
  pub supported: bool,
}

// ─── People ──────────────────────────────────────────────────────────────────

/// Result of a person search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonList {
  pub person_ids: Vec<PersonId>,
}

/// Summary view of a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInformation {
  pub person_id:     PersonId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub first_name:    Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub nick_name:     Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub middle_name:   Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub last_name:     Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub suffix:        Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub title:         Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub birth_date:    Field<NaiveDate>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub age:           Field<u32>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub grade:         Field<i32>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub gender:        Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub member_status: Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub campus_id:     Field<i64>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub staff:         Field<bool>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub record_status: Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub image_url:     Field<String>,
}

/// Extended view of a person.
///
/// The created/modified metadata and navigation URL are public.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetails {
  pub person_id:               PersonId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub created_by:              Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub date_created:            Field<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub modified_by:             Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub date_modified:           Field<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub navigation_url:          Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub marital_status:          Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub anniversary_date:        Field<NaiveDate>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub employer:                Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub position:                Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub medical_information:     Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub envelope_number:         Field<i64>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub contribute_individually: Field<bool>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub print_statement:         Field<bool>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub email_statement:         Field<bool>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub family_id:               Field<i64>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub notes:                   Field<String>,
}

// ─── Contact information ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub address_id:    i64,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub address_type:  Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub street_line_1: Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub street_line_2: Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub city:          Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub state:         Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub postal_code:   Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub country:       Field<String>,
  pub primary:       bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub phone_type:  Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub number:      Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub extension:   Field<String>,
  pub unlisted:    bool,
  pub sms_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
  pub email_id: i64,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub address:  Field<String>,
  pub active:   bool,
  pub order:    i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInformation {
  pub person_id: PersonId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub addresses: Field<Vec<Address>>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub phones:    Field<Vec<Phone>>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub emails:    Field<Vec<Email>>,
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileReference {
  pub profile_id:   ProfileId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub name:         Field<String>,
  pub profile_type: i32,
}

/// The profiles a person belongs to that the caller may see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileList {
  pub person_id: PersonId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub profiles:  Field<Vec<ProfileReference>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInformation {
  pub profile_id:        ProfileId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub name:              Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub profile_type:      Field<i32>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub owner_id:          Field<PersonId>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub parent_profile_id: Field<ProfileId>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub active:            Field<bool>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub member_count:      Field<i64>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub summary:           Field<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMembers {
  pub profile_id: ProfileId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub member_ids: Field<Vec<PersonId>>,
}

// ─── Small groups ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmallGroupInformation {
  pub group_id:       SmallGroupId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub name:           Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub description:    Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub leader_id:      Field<PersonId>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub cluster_id:     Field<ClusterId>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub meeting_day:    Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub meeting_time:   Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub member_count:   Field<i64>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub active:         Field<bool>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub navigation_url: Field<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInformation {
  pub cluster_id:        ClusterId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub name:              Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub parent_cluster_id: Field<ClusterId>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub category_id:       Field<CategoryId>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub level:             Field<i32>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub group_count:       Field<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInformation {
  pub category_id:         CategoryId,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub name:                Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub description:         Field<String>,
  #[serde(default, skip_serializing_if = "Field::is_absent")]
  pub allow_registrations: Field<bool>,
}

// ─── Not-found constructors ──────────────────────────────────────────────────

/// An output structure keyed by a record identifier.
pub trait Keyed: Default {
  fn with_id(id: i64) -> Self;

  /// The structure returned for a record that does not exist: identifier
  /// [`NOT_FOUND`], nothing else.
  fn not_found() -> Self { Self::with_id(NOT_FOUND) }
}

macro_rules! keyed {
  ($($ty:ident => $id:ident),* $(,)?) => {
    $(
      impl Keyed for $ty {
        fn with_id(id: i64) -> Self { Self { $id: id, ..Default::default() } }
      }
    )*
  };
}

keyed! {
  PersonInformation     => person_id,
  PersonDetails         => person_id,
  ContactInformation    => person_id,
  ProfileList           => person_id,
  ProfileInformation    => profile_id,
  ProfileMembers        => profile_id,
  SmallGroupInformation => group_id,
  ClusterInformation    => cluster_id,
  CategoryInformation   => category_id,
}
