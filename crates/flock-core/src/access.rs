//! Authorization vocabulary: identities, grants, and the objects they protect.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{OrganizationId, PersonId, ProfileId};

pub type RoleId = i64;

// ─── Identity ────────────────────────────────────────────────────────────────

/// The authenticated caller. Built once per call from credentials and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub person_id:       PersonId,
  pub organization_id: OrganizationId,
  pub username:        String,
}

// ─── Protected fields ────────────────────────────────────────────────────────

/// One independently permissioned attribute category of a person record.
///
/// The string form (e.g. `Profile_Name`) is what the permission store keys
/// grants on.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
  strum::EnumIter,
)]
pub enum ProtectedField {
  #[strum(serialize = "Profile_Name")]
  #[serde(rename = "Profile_Name")]
  Name,
  #[strum(serialize = "Profile_BirthDate")]
  #[serde(rename = "Profile_BirthDate")]
  BirthDate,
  #[strum(serialize = "Profile_Gender")]
  #[serde(rename = "Profile_Gender")]
  Gender,
  #[strum(serialize = "Profile_MemberStatus")]
  #[serde(rename = "Profile_MemberStatus")]
  MemberStatus,
  #[strum(serialize = "Profile_Campus")]
  #[serde(rename = "Profile_Campus")]
  Campus,
  #[strum(serialize = "Profile_Staff")]
  #[serde(rename = "Profile_Staff")]
  Staff,
  #[strum(serialize = "Profile_RecordStatus")]
  #[serde(rename = "Profile_RecordStatus")]
  RecordStatus,
  #[strum(serialize = "Profile_Grade")]
  #[serde(rename = "Profile_Grade")]
  Grade,
  #[strum(serialize = "Profile_Photo")]
  #[serde(rename = "Profile_Photo")]
  Photo,
  #[strum(serialize = "Profile_MaritalStatus")]
  #[serde(rename = "Profile_MaritalStatus")]
  MaritalStatus,
  #[strum(serialize = "Profile_Anniversary")]
  #[serde(rename = "Profile_Anniversary")]
  Anniversary,
  #[strum(serialize = "Profile_Employment")]
  #[serde(rename = "Profile_Employment")]
  Employment,
  #[strum(serialize = "Profile_MedicalInformation")]
  #[serde(rename = "Profile_MedicalInformation")]
  MedicalInformation,
  #[strum(serialize = "Profile_EnvelopeNumber")]
  #[serde(rename = "Profile_EnvelopeNumber")]
  EnvelopeNumber,
  #[strum(serialize = "Profile_Contributions")]
  #[serde(rename = "Profile_Contributions")]
  Contributions,
  #[strum(serialize = "Profile_Family")]
  #[serde(rename = "Profile_Family")]
  Family,
  #[strum(serialize = "Profile_Notes")]
  #[serde(rename = "Profile_Notes")]
  Notes,
  #[strum(serialize = "Person_Addresses")]
  #[serde(rename = "Person_Addresses")]
  Addresses,
  #[strum(serialize = "Person_Phones")]
  #[serde(rename = "Person_Phones")]
  Phones,
  #[strum(serialize = "Person_Emails")]
  #[serde(rename = "Person_Emails")]
  Emails,
}

// ─── Grants ──────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
  View,
  Edit,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubjectKind {
  Person,
  Role,
}

/// Who a grant is issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
  pub kind: SubjectKind,
  pub id:   i64,
}

impl Subject {
  pub fn person(id: PersonId) -> Self { Self { kind: SubjectKind::Person, id } }

  pub fn role(id: RoleId) -> Self { Self { kind: SubjectKind::Role, id } }
}

/// One entry of a target's grant set. The target is implied by the lookup
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
  pub subject:   Subject,
  pub operation: Operation,
}

impl Grant {
  pub fn new(subject: Subject, operation: Operation) -> Self {
    Self { subject, operation }
  }
}

/// An object that grants are attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PermissionTarget {
  Field(ProtectedField),
  Profile(ProfileId),
}

impl From<ProtectedField> for PermissionTarget {
  fn from(field: ProtectedField) -> Self { Self::Field(field) }
}

impl fmt::Display for PermissionTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Field(field) => write!(f, "field:{field}"),
      Self::Profile(id) => write!(f, "profile:{id}"),
    }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn protected_field_names_round_trip() {
    for field in ProtectedField::iter() {
      let name: &'static str = field.into();
      assert_eq!(name.parse::<ProtectedField>().unwrap(), field);
    }
  }

  #[test]
  fn protected_field_serde_matches_strum() {
    let json = serde_json::to_string(&ProtectedField::BirthDate).unwrap();
    assert_eq!(json, "\"Profile_BirthDate\"");
    assert_eq!(ProtectedField::BirthDate.to_string(), "Profile_BirthDate");
  }

  #[test]
  fn unknown_field_is_an_error() {
    assert!("Profile_ShoeSize".parse::<ProtectedField>().is_err());
  }

  #[test]
  fn target_display() {
    assert_eq!(
      PermissionTarget::from(ProtectedField::Name).to_string(),
      "field:Profile_Name"
    );
    assert_eq!(PermissionTarget::Profile(9).to_string(), "profile:9");
  }
}
