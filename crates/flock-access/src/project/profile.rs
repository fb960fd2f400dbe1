//! Profiles (tags). Unlike person fields, each profile carries its own grant
//! set, so every rule here is guarded by `Profile(id)`.

use flock_core::{
  Field, Meaningful as _,
  access::{Operation, PermissionTarget},
  record::{Person, PersonId, Profile, ProfileType},
};

use crate::{
  Authorizer, ProjectionContext,
  rules::{Rule, found, present, project, text},
  wire::{Keyed, ProfileInformation, ProfileList, ProfileMembers, ProfileReference},
};

type ProfileRule = Rule<Profile, ProfileInformation>;

fn target(profile: &Profile) -> PermissionTarget {
  PermissionTarget::Profile(profile.profile_id)
}

const INFORMATION: &[ProfileRule] = &[
  ProfileRule::scoped(
    target,
    |p| p.name.is_meaningful(),
    |p, _, o| o.name = present(&p.name),
  ),
  ProfileRule::scoped(
    target,
    |_| true,
    |p, _, o| o.profile_type = Field::Present(p.profile_type.code()),
  ),
  ProfileRule::scoped(
    target,
    |p| p.owner_id.is_meaningful(),
    |p, _, o| o.owner_id = present(&p.owner_id),
  ),
  ProfileRule::scoped(
    target,
    |p| p.parent_profile_id.is_meaningful(),
    |p, _, o| o.parent_profile_id = present(&p.parent_profile_id),
  ),
  ProfileRule::scoped(target, |_| true, |p, _, o| o.active = present(&p.active)),
  ProfileRule::scoped(
    target,
    |p| p.member_count.is_meaningful(),
    |p, _, o| o.member_count = present(&p.member_count),
  ),
  ProfileRule::scoped(
    target,
    |p| p.summary.is_meaningful(),
    |p, _, o| o.summary = present(&p.summary),
  ),
];

async fn may_view<A: Authorizer>(authorizer: &A, profile: &Profile) -> bool {
  authorizer.is_permitted(target(profile), Operation::View).await
}

/// The profiles of `person` the caller may see, optionally narrowed to one
/// profile type.
///
/// `profiles` is the person's full membership as loaded from the store. The
/// list is omitted when nothing survives filtering.
pub async fn person_profiles<A: Authorizer>(
  person: Option<&Person>,
  profiles: &[Profile],
  profile_type: Option<ProfileType>,
  authorizer: &A,
) -> ProfileList {
  let Some(person) = found(person) else {
    return ProfileList::not_found();
  };

  let mut visible = Vec::new();
  for profile in profiles {
    if profile_type.is_some_and(|t| t != profile.profile_type) {
      continue;
    }
    if !may_view(authorizer, profile).await {
      continue;
    }
    visible.push(ProfileReference {
      profile_id:   profile.profile_id,
      name:         text(&profile.name),
      profile_type: profile.profile_type.code(),
    });
  }

  ProfileList {
    person_id: person.person_id,
    profiles:  if visible.is_empty() { Field::Absent } else { Field::Present(visible) },
  }
}

/// Project a profile. A profile the caller may not view yields its id only.
pub async fn profile_information<A: Authorizer>(
  profile: Option<&Profile>,
  ctx: &ProjectionContext,
  authorizer: &A,
) -> ProfileInformation {
  project(INFORMATION, profile, ctx, authorizer).await
}

/// The member ids of a profile, when the caller may view the profile.
pub async fn profile_members<A: Authorizer>(
  profile: Option<&Profile>,
  members: &[PersonId],
  authorizer: &A,
) -> ProfileMembers {
  let Some(profile) = found(profile) else {
    return ProfileMembers::not_found();
  };
  let mut out = ProfileMembers::with_id(profile.profile_id);
  if !members.is_empty() && may_view(authorizer, profile).await {
    out.member_ids = Field::Present(members.to_vec());
  }
  out
}

#[cfg(test)]
mod tests {
  use flock_core::record::NOT_FOUND;

  use super::*;
  use crate::testing::{Allow, ctx, full_person};

  fn profile(id: i64, name: &str, profile_type: ProfileType) -> Profile {
    Profile {
      profile_id: id,
      name: name.into(),
      profile_type,
      owner_id: 42,
      parent_profile_id: NOT_FOUND,
      active: true,
      member_count: 3,
      summary: String::new(),
    }
  }

  fn memberships() -> Vec<Profile> {
    vec![
      profile(9, "Choir", ProfileType::Serving),
      profile(10, "Men's Breakfast", ProfileType::Ministry),
      profile(11, "Ushers", ProfileType::Serving),
    ]
  }

  #[tokio::test]
  async fn only_viewable_profiles_are_listed() {
    let person = full_person(42);
    let allow = Allow::nothing().profiles(&[9, 10]);
    let list = person_profiles(Some(&person), &memberships(), None, &allow).await;

    let ids: Vec<i64> = list
      .profiles
      .as_option()
      .expect("profiles")
      .iter()
      .map(|p| p.profile_id)
      .collect();
    assert_eq!(ids, vec![9, 10]);
    assert_eq!(list.person_id, 42);
  }

  #[tokio::test]
  async fn profile_type_filter_applies_before_permission() {
    let person = full_person(42);
    let allow = Allow::nothing().profiles(&[9, 10, 11]);
    let list = person_profiles(
      Some(&person),
      &memberships(),
      Some(ProfileType::Serving),
      &allow,
    )
    .await;

    let refs = list.profiles.as_option().expect("profiles");
    assert_eq!(refs.len(), 2);
    assert!(refs.iter().all(|r| r.profile_type == ProfileType::Serving.code()));
    assert_eq!(allow.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn nothing_visible_omits_the_list() {
    let person = full_person(42);
    let list =
      person_profiles(Some(&person), &memberships(), None, &Allow::nothing()).await;
    assert_eq!(list, ProfileList::with_id(42));
    assert_eq!(serde_json::to_string(&list).unwrap(), r#"{"person_id":42}"#);
  }

  #[tokio::test]
  async fn missing_person_lists_nothing() {
    let allow = Allow::nothing().profiles(&[9]);
    let list = person_profiles(None, &memberships(), None, &allow).await;
    assert_eq!(list, ProfileList::not_found());
  }

  #[tokio::test]
  async fn denied_profile_yields_only_its_id() {
    let choir = profile(9, "Choir", ProfileType::Serving);
    let info = profile_information(Some(&choir), &ctx(), &Allow::nothing()).await;
    assert_eq!(info, ProfileInformation::with_id(9));
  }

  #[tokio::test]
  async fn permitted_profile_omits_sentinels() {
    let choir = profile(9, "Choir", ProfileType::Serving);
    let allow = Allow::nothing().profiles(&[9]);
    let info = profile_information(Some(&choir), &ctx(), &allow).await;

    assert_eq!(info.name, Field::Present("Choir".to_string()));
    assert_eq!(info.profile_type, Field::Present(3));
    assert_eq!(info.owner_id, Field::Present(42));
    assert_eq!(info.active, Field::Present(true));
    assert!(info.parent_profile_id.is_absent());
    assert!(info.summary.is_absent());
  }

  #[tokio::test]
  async fn members_follow_the_profile_grant() {
    let choir = profile(9, "Choir", ProfileType::Serving);
    let members = [42, 43, 57];

    let denied = profile_members(Some(&choir), &members, &Allow::nothing()).await;
    assert_eq!(denied, ProfileMembers::with_id(9));

    let allow = Allow::nothing().profiles(&[9]);
    let granted = profile_members(Some(&choir), &members, &allow).await;
    assert_eq!(granted.member_ids, Field::Present(vec![42, 43, 57]));

    let missing = profile_members(None, &members, &allow).await;
    assert_eq!(missing, ProfileMembers::not_found());
  }
}
