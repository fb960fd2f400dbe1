//! In-memory collaborators and fixtures shared by the unit tests.

use std::{
  collections::{HashMap, HashSet},
  sync::atomic::{AtomicUsize, Ordering},
};

use chrono::{NaiveDate, TimeZone, Utc};
use flock_core::{
  access::{
    Grant, Identity, Operation, PermissionTarget, ProtectedField, RoleId,
    Subject,
  },
  record::{
    Gender, Lookup, OrganizationId, Person, PersonAddress, PersonEmail,
    PersonId, PersonPhone, RecordStatus,
  },
  store::{Collaborator, PermissionStore, RoleResolver},
};

use crate::{Authorizer, GradePromotion, ProjectionContext};

#[derive(Debug, thiserror::Error)]
#[error("backend unavailable")]
pub struct Unavailable;

pub fn identity(person_id: PersonId) -> Identity {
  Identity {
    person_id,
    organization_id: 1,
    username: format!("user{person_id}"),
  }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fixed "today" of 2024-09-15 with a June 1st promotion date.
pub fn ctx() -> ProjectionContext {
  ProjectionContext {
    base_url:  "https://church.example.org/".to_string(),
    today:     date(2024, 9, 15),
    promotion: GradePromotion { month: 6, day: 1 },
  }
}

// ─── Grants ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeGrants {
  grants:    HashMap<PermissionTarget, Vec<Grant>>,
  fail:      bool,
  pub calls: AtomicUsize,
}

impl FakeGrants {
  pub fn failing() -> Self { Self { fail: true, ..Default::default() } }

  pub fn with(
    self,
    field: ProtectedField,
    subject: Subject,
    operation: Operation,
  ) -> Self {
    self.with_target(field.into(), subject, operation)
  }

  pub fn with_target(
    mut self,
    target: PermissionTarget,
    subject: Subject,
    operation: Operation,
  ) -> Self {
    self
      .grants
      .entry(target)
      .or_default()
      .push(Grant::new(subject, operation));
    self
  }
}

impl Collaborator for FakeGrants {
  type Error = Unavailable;
}

impl PermissionStore for FakeGrants {
  async fn grants_for(
    &self,
    target: PermissionTarget,
  ) -> Result<Vec<Grant>, Unavailable> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.fail {
      return Err(Unavailable);
    }
    Ok(self.grants.get(&target).cloned().unwrap_or_default())
  }
}

// ─── Roles ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeRoles {
  members:   HashMap<(OrganizationId, PersonId), Vec<RoleId>>,
  fail:      bool,
  pub calls: AtomicUsize,
}

impl FakeRoles {
  pub fn failing() -> Self { Self { fail: true, ..Default::default() } }

  pub fn member(
    mut self,
    organization_id: OrganizationId,
    person_id: PersonId,
    roles: &[RoleId],
  ) -> Self {
    self
      .members
      .insert((organization_id, person_id), roles.to_vec());
    self
  }
}

impl Collaborator for FakeRoles {
  type Error = Unavailable;
}

impl RoleResolver for FakeRoles {
  async fn roles_for(
    &self,
    identity: &Identity,
    organization_id: OrganizationId,
  ) -> Result<Vec<RoleId>, Unavailable> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.fail {
      return Err(Unavailable);
    }
    Ok(
      self
        .members
        .get(&(organization_id, identity.person_id))
        .cloned()
        .unwrap_or_default(),
    )
  }
}

// ─── Static authorizer ───────────────────────────────────────────────────────

/// Permits View on exactly the listed targets.
#[derive(Default)]
pub struct Allow {
  targets:   HashSet<PermissionTarget>,
  pub calls: AtomicUsize,
}

impl Allow {
  pub fn nothing() -> Self { Self::default() }

  pub fn fields(fields: &[ProtectedField]) -> Self {
    Self {
      targets: fields.iter().map(|&f| f.into()).collect(),
      ..Default::default()
    }
  }

  pub fn all_fields() -> Self {
    use strum::IntoEnumIterator as _;
    let fields: Vec<_> = ProtectedField::iter().collect();
    Self::fields(&fields)
  }

  pub fn profiles(mut self, ids: &[i64]) -> Self {
    self
      .targets
      .extend(ids.iter().map(|&id| PermissionTarget::Profile(id)));
    self
  }
}

impl Authorizer for Allow {
  async fn is_permitted(
    &self,
    target: PermissionTarget,
    operation: Operation,
  ) -> bool {
    self.calls.fetch_add(1, Ordering::SeqCst);
    operation == Operation::View && self.targets.contains(&target)
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

/// A person with every attribute populated.
pub fn full_person(person_id: PersonId) -> Person {
  let created = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
  let mut p = Person::new(person_id, created);
  p.first_name = "Margaret".into();
  p.nick_name = "Peggy".into();
  p.middle_name = "Ann".into();
  p.last_name = "Hale".into();
  p.suffix = "Jr".into();
  p.title = "Dr".into();
  p.birth_date = date(1980, 5, 1);
  p.graduation_date = date(2026, 6, 1);
  p.gender = Gender::Female;
  p.member_status = Some(Lookup { lookup_id: 958, value: "Member".into() });
  p.campus_id = 2;
  p.staff_member = true;
  p.record_status = RecordStatus::Active;
  p.blob_id = 4411;
  p.marital_status = Some(Lookup { lookup_id: 12, value: "Married".into() });
  p.anniversary_date = date(2004, 8, 21);
  p.employer = "Hale Hardware".into();
  p.position = "Owner".into();
  p.medical_information = "Peanut allergy".into();
  p.envelope_number = 311;
  p.contribute_individually = true;
  p.print_statement = true;
  p.email_statement = false;
  p.family_id = 88;
  p.notes = "Prefers evening calls".into();
  p.created_by = "import".into();
  p.modified_by = "office".into();
  p.date_modified = Utc.with_ymd_and_hms(2023, 3, 4, 5, 6, 7).unwrap();
  p.addresses = vec![PersonAddress {
    address_id:    501,
    address_type:  Some(Lookup { lookup_id: 1, value: "Home".into() }),
    street_line_1: "12 Elm St".into(),
    street_line_2: String::new(),
    city:          "Springfield".into(),
    state:         "IL".into(),
    postal_code:   "62701".into(),
    country:       "US".into(),
    primary:       true,
  }];
  p.phones = vec![PersonPhone {
    phone_type:  Some(Lookup { lookup_id: 2, value: "Cell".into() }),
    number:      "(217) 555-0101".into(),
    extension:   String::new(),
    unlisted:    false,
    sms_enabled: true,
  }];
  p.emails = vec![
    PersonEmail {
      email_id: 2,
      address:  "peggy@work.example.org".into(),
      active:   true,
      order:    2,
    },
    PersonEmail {
      email_id: 1,
      address:  "peggy@example.org".into(),
      active:   true,
      order:    1,
    },
  ];
  p
}
