//! Integration tests for `SqliteStore` against an in-memory database.

use std::time::Instant;

use chrono::{NaiveDate, TimeZone, Utc};
use flock_core::{
  AuthError,
  access::{Grant, Identity, Operation, PermissionTarget, ProtectedField, Subject},
  record::{
    Category, Cluster, Gender, Lookup, NOT_FOUND, Person, PersonAddress,
    PersonEmail, PersonPhone, Profile, ProfileType, RecordStatus, SmallGroup,
    UNSET_DATE,
  },
  store::{Authenticator, Directory, PermissionStore, RoleResolver},
};

use crate::{Error, NewAccount, SqliteStore, hash_password};

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  s.insert_organization(1, "First Church").await.unwrap();
  s
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn person(id: i64, first: &str, last: &str) -> Person {
  let mut p = Person::new(id, Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap());
  p.first_name = first.into();
  p.last_name = last.into();
  p
}

fn identity(person_id: i64) -> Identity {
  Identity { person_id, organization_id: 1, username: format!("user{person_id}") }
}

// ─── People ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn person_round_trips_with_sentinels() {
  let s = store().await;
  let p = person(42, "Margaret", "Hale");
  s.insert_person(&p).await.unwrap();

  let loaded = s.load_person(42).await.unwrap().expect("person");
  assert_eq!(loaded, p);
  assert_eq!(loaded.birth_date, UNSET_DATE);
  assert_eq!(loaded.campus_id, NOT_FOUND);
  assert!(loaded.member_status.is_none());
}

#[tokio::test]
async fn person_with_lookups_and_contacts() {
  let s = store().await;
  let mut p = person(42, "Margaret", "Hale");
  p.birth_date = date(1980, 5, 1);
  p.gender = Gender::Female;
  p.record_status = RecordStatus::Inactive;
  p.member_status = Some(Lookup { lookup_id: 958, value: "Member".into() });
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
    phone_type:  None,
    number:      "555-0101".into(),
    extension:   "12".into(),
    unlisted:    true,
    sms_enabled: false,
  }];
  p.emails = vec![PersonEmail {
    email_id: 7,
    address:  "peggy@example.org".into(),
    active:   true,
    order:    1,
  }];
  s.insert_person(&p).await.unwrap();

  let loaded = s.load_person(42).await.unwrap().expect("person");
  assert_eq!(loaded, p);
}

#[tokio::test]
async fn missing_person_is_none() {
  let s = store().await;
  assert!(s.load_person(404).await.unwrap().is_none());
}

#[tokio::test]
async fn find_by_name_matches_prefix_and_nick_name() {
  let s = store().await;
  let mut peggy = person(1, "Margaret", "Hale");
  peggy.nick_name = "Peggy".into();
  s.insert_person(&peggy).await.unwrap();
  s.insert_person(&person(2, "Marge", "hale")).await.unwrap();
  s.insert_person(&person(3, "Margaret", "Hall")).await.unwrap();

  assert_eq!(s.find_people_by_name("marg", "Hale").await.unwrap(), vec![1, 2]);
  assert_eq!(s.find_people_by_name("Peg", "HALE").await.unwrap(), vec![1]);
  assert!(s.find_people_by_name("%", "Hale").await.unwrap().is_empty());
}

// ─── Profiles ────────────────────────────────────────────────────────────────

fn profile(id: i64, name: &str) -> Profile {
  Profile {
    profile_id: id,
    name: name.into(),
    profile_type: ProfileType::Serving,
    owner_id: 1,
    parent_profile_id: NOT_FOUND,
    active: true,
    member_count: 0,
    summary: String::new(),
  }
}

#[tokio::test]
async fn profiles_and_membership() {
  let s = store().await;
  s.insert_person(&person(1, "Ann", "Hale")).await.unwrap();
  s.insert_person(&person(2, "Bob", "Hale")).await.unwrap();
  s.insert_profile(&profile(9, "Choir")).await.unwrap();
  s.insert_profile(&profile(10, "Ushers")).await.unwrap();
  s.add_profile_member(9, 2).await.unwrap();
  s.add_profile_member(9, 1).await.unwrap();
  s.add_profile_member(10, 1).await.unwrap();

  let choir = s.load_profile(9).await.unwrap().expect("profile");
  assert_eq!(choir.member_count, 2);
  assert_eq!(choir.parent_profile_id, NOT_FOUND);
  assert_eq!(choir.profile_type, ProfileType::Serving);

  assert_eq!(s.profile_members(9).await.unwrap(), vec![1, 2]);
  let ids: Vec<i64> = s
    .person_profiles(1)
    .await
    .unwrap()
    .iter()
    .map(|p| p.profile_id)
    .collect();
  assert_eq!(ids, vec![9, 10]);
  assert!(s.load_profile(11).await.unwrap().is_none());
}

// ─── Small groups ────────────────────────────────────────────────────────────

#[tokio::test]
async fn group_hierarchy() {
  let s = store().await;
  s.insert_category(&Category {
    category_id:         2,
    name:                "Adult Groups".into(),
    description:         String::new(),
    allow_registrations: true,
  })
  .await
  .unwrap();
  s.insert_cluster(&Cluster {
    cluster_id:        5,
    name:              "North Side".into(),
    parent_cluster_id: NOT_FOUND,
    category_id:       2,
    level:             0,
    group_count:       0,
  })
  .await
  .unwrap();
  let group = SmallGroup {
    group_id:     31,
    name:         "Tuesday Bible Study".into(),
    description:  String::new(),
    leader_id:    NOT_FOUND,
    cluster_id:   5,
    meeting_day:  "Tuesday".into(),
    meeting_time: "19:00".into(),
    member_count: 12,
    active:       true,
  };
  s.insert_small_group(&group).await.unwrap();

  assert_eq!(s.load_small_group(31).await.unwrap(), Some(group));
  let cluster = s.load_cluster(5).await.unwrap().expect("cluster");
  assert_eq!(cluster.group_count, 1);
  assert_eq!(cluster.parent_cluster_id, NOT_FOUND);
  assert!(s.load_category(2).await.unwrap().expect("category").allow_registrations);
  assert!(s.load_category(3).await.unwrap().is_none());
}

// ─── Roles and grants ────────────────────────────────────────────────────────

#[tokio::test]
async fn roles_are_scoped_to_the_organisation() {
  let s = store().await;
  s.insert_organization(2, "Second Church").await.unwrap();
  s.insert_role(100, 1, "Staff").await.unwrap();
  s.insert_role(200, 2, "Staff").await.unwrap();
  s.add_role_member(100, 42).await.unwrap();
  s.add_role_member(200, 42).await.unwrap();

  assert_eq!(s.roles_for(&identity(42), 1).await.unwrap(), vec![100]);
  assert_eq!(s.roles_for(&identity(42), 2).await.unwrap(), vec![200]);
  assert!(s.roles_for(&identity(7), 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_organisation_is_an_error() {
  let s = store().await;
  assert!(matches!(
    s.roles_for(&identity(42), 99).await,
    Err(Error::UnknownOrganization(99))
  ));
}

#[tokio::test]
async fn grants_are_keyed_by_target() {
  let s = store().await;
  let name: PermissionTarget = ProtectedField::Name.into();
  let view_role = Grant::new(Subject::role(100), Operation::View);
  let edit_person = Grant::new(Subject::person(42), Operation::Edit);
  s.insert_grant(name, view_role).await.unwrap();
  s.insert_grant(name, view_role).await.unwrap();
  s.insert_grant(name, edit_person).await.unwrap();
  s.insert_grant(PermissionTarget::Profile(9), view_role).await.unwrap();

  let mut grants = s.grants_for(name).await.unwrap();
  grants.sort_by_key(|g| g.subject.id);
  assert_eq!(grants, vec![edit_person, view_role]);

  assert_eq!(s.grants_for(PermissionTarget::Profile(9)).await.unwrap(), vec![view_role]);
  assert!(s.grants_for(ProtectedField::Notes.into()).await.unwrap().is_empty());
  assert!(s.grants_for(PermissionTarget::Profile(10)).await.unwrap().is_empty());
}

// ─── Accounts ────────────────────────────────────────────────────────────────

async fn with_account(locked: bool) -> SqliteStore {
  let s = store().await;
  s.insert_account(NewAccount {
    username: "peggy".into(),
    password_hash: hash_password("hunter2").unwrap(),
    person_id: 42,
    organization_id: 1,
    locked,
  })
  .await
  .unwrap();
  s
}

#[tokio::test]
async fn correct_password_yields_identity() {
  let s = with_account(false).await;
  let id = s.authenticate("Peggy", "hunter2").await.unwrap();
  assert_eq!(id, Identity { person_id: 42, organization_id: 1, username: "peggy".into() });
}

#[tokio::test]
async fn wrong_password_or_unknown_user() {
  let s = with_account(false).await;
  assert!(matches!(
    s.authenticate("peggy", "hunter3").await,
    Err(AuthError::InvalidCredentials)
  ));
  assert!(matches!(
    s.authenticate("nobody", "hunter2").await,
    Err(AuthError::InvalidCredentials)
  ));
}

#[tokio::test]
async fn unknown_user_costs_as_much_as_a_wrong_password() {
  let s = with_account(false).await;
  // Builds the throwaway hash outside the timed section.
  let _ = s.authenticate("nobody", "wrong").await;

  let start = Instant::now();
  let _ = s.authenticate("peggy", "wrong").await;
  let known = start.elapsed();

  let start = Instant::now();
  let _ = s.authenticate("nobody", "wrong").await;
  let unknown = start.elapsed();

  assert!(unknown * 4 >= known, "unknown={unknown:?} known={known:?}");
}

#[tokio::test]
async fn locked_account_reports_lock_only_with_the_right_password() {
  let s = with_account(true).await;
  assert!(matches!(
    s.authenticate("peggy", "hunter2").await,
    Err(AuthError::AccountLocked)
  ));
  assert!(matches!(
    s.authenticate("peggy", "wrong").await,
    Err(AuthError::InvalidCredentials)
  ));

  assert!(s.set_account_locked("peggy", false).await.unwrap());
  assert!(s.authenticate("peggy", "hunter2").await.is_ok());
  assert!(!s.set_account_locked("nobody", true).await.unwrap());
}
