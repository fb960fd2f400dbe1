//! The projection protocol, shared by every output structure.
//!
//! Each structure declares a table of [`Rule`]s. A rule copies one output
//! member (or a small group of members derived from the same source) and is
//! applied only when the source has a value and its [`Guard`] permits it.

use flock_core::{
  Field,
  access::{Operation, PermissionTarget, ProtectedField},
  record::{Category, Cluster, NOT_FOUND, Person, Profile, SmallGroup},
};

use crate::{Authorizer, ProjectionContext, wire::Keyed};

/// What must be permitted before a rule may copy its value.
pub(crate) enum Guard<R> {
  /// Always copied when present.
  Public,
  /// View on a person field category.
  Field(ProtectedField),
  /// View on an object derived from the record itself (e.g. the profile).
  Target(fn(&R) -> PermissionTarget),
}

pub(crate) struct Rule<R, O> {
  guard:     Guard<R>,
  has_value: fn(&R) -> bool,
  apply:     fn(&R, &ProjectionContext, &mut O),
}

impl<R, O> Rule<R, O> {
  pub(crate) const fn public(
    has_value: fn(&R) -> bool,
    apply: fn(&R, &ProjectionContext, &mut O),
  ) -> Self {
    Self { guard: Guard::Public, has_value, apply }
  }

  pub(crate) const fn protected(
    field: ProtectedField,
    has_value: fn(&R) -> bool,
    apply: fn(&R, &ProjectionContext, &mut O),
  ) -> Self {
    Self { guard: Guard::Field(field), has_value, apply }
  }

  pub(crate) const fn scoped(
    target: fn(&R) -> PermissionTarget,
    has_value: fn(&R) -> bool,
    apply: fn(&R, &ProjectionContext, &mut O),
  ) -> Self {
    Self { guard: Guard::Target(target), has_value, apply }
  }
}

/// A record with a numeric identifier; `NOT_FOUND` marks absence.
pub(crate) trait Record {
  fn record_id(&self) -> i64;
}

impl Record for Person {
  fn record_id(&self) -> i64 { self.person_id }
}

impl Record for Profile {
  fn record_id(&self) -> i64 { self.profile_id }
}

impl Record for SmallGroup {
  fn record_id(&self) -> i64 { self.group_id }
}

impl Record for Cluster {
  fn record_id(&self) -> i64 { self.cluster_id }
}

impl Record for Category {
  fn record_id(&self) -> i64 { self.category_id }
}

/// The record, unless it is missing or carries the not-found identifier.
pub(crate) fn found<R: Record>(record: Option<&R>) -> Option<&R> {
  record.filter(|r| r.record_id() != NOT_FOUND)
}

/// Run `rules` over `record` into a fresh output structure.
///
/// A missing record short-circuits to [`Keyed::not_found`] without consulting
/// any rule.
pub(crate) async fn project<R, O, A>(
  rules: &[Rule<R, O>],
  record: Option<&R>,
  ctx: &ProjectionContext,
  authorizer: &A,
) -> O
where
  R: Record + Sync,
  O: Keyed + Send,
  A: Authorizer,
{
  let Some(record) = found(record) else {
    return O::not_found();
  };
  let mut out = O::with_id(record.record_id());

  for rule in rules {
    if !(rule.has_value)(record) {
      continue;
    }
    let target = match rule.guard {
      Guard::Public => None,
      Guard::Field(field) => Some(PermissionTarget::Field(field)),
      Guard::Target(target) => Some(target(record)),
    };
    if let Some(target) = target
      && !authorizer.is_permitted(target, Operation::View).await
    {
      continue;
    }
    (rule.apply)(record, ctx, &mut out);
  }

  out
}

// ─── Value helpers ───────────────────────────────────────────────────────────

pub(crate) fn present<T: Clone>(value: &T) -> Field<T> {
  Field::Present(value.clone())
}

/// A sub-field inside a collection element: sentinel omission still applies
/// even though the collection as a whole was permitted.
pub(crate) fn text(value: &str) -> Field<String> {
  use flock_core::Meaningful as _;
  if value.is_meaningful() {
    Field::Present(value.to_owned())
  } else {
    Field::Absent
  }
}

pub(crate) fn lookup_value(
  lookup: &Option<flock_core::record::Lookup>,
) -> Field<String> {
  lookup
    .as_ref()
    .map(|l| text(&l.value))
    .unwrap_or_default()
}
