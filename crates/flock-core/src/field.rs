//! Presence wrapper for projected output fields, and the "has a value" test
//! applied to raw record attributes.
//!
//! The record layer encodes "no value" with per-type sentinels (an empty
//! string, the unset date, identifier `-1`). [`Meaningful`] is the single
//! place those conventions are interpreted.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::{Gender, Lookup, NOT_FOUND, RecordStatus};

// ─── Field ───────────────────────────────────────────────────────────────────

/// One optional field of an output structure.
///
/// `Absent` is skipped entirely on serialisation (pair it with
/// `#[serde(default, skip_serializing_if = "Field::is_absent")]`), so a caller
/// never sees a zero value standing in for withheld data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
  Absent,
  Present(T),
}

impl<T> Default for Field<T> {
  fn default() -> Self { Self::Absent }
}

impl<T> Field<T> {
  pub fn is_absent(&self) -> bool { matches!(self, Self::Absent) }

  pub fn is_present(&self) -> bool { matches!(self, Self::Present(_)) }

  pub fn as_option(&self) -> Option<&T> {
    match self {
      Self::Absent => None,
      Self::Present(v) => Some(v),
    }
  }
}

impl<T> From<Option<T>> for Field<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(v) => Self::Present(v),
      None => Self::Absent,
    }
  }
}

impl<T: Serialize> Serialize for Field<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Present(v) => v.serialize(serializer),
      Self::Absent => serializer.serialize_none(),
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Option::<T>::deserialize(deserializer).map(Self::from)
  }
}

// ─── Meaningful ──────────────────────────────────────────────────────────────

/// Whether a raw record attribute carries a value worth reporting.
pub trait Meaningful {
  fn is_meaningful(&self) -> bool;
}

impl Meaningful for str {
  fn is_meaningful(&self) -> bool { !self.trim().is_empty() }
}

impl Meaningful for String {
  fn is_meaningful(&self) -> bool { self.as_str().is_meaningful() }
}

/// Identifiers use `-1` for "none".
impl Meaningful for i64 {
  fn is_meaningful(&self) -> bool { *self != NOT_FOUND }
}

impl Meaningful for bool {
  fn is_meaningful(&self) -> bool { true }
}

/// The record layer stores unset dates as the minimum date; anything at or
/// before year 1 is treated the same way.
impl Meaningful for NaiveDate {
  fn is_meaningful(&self) -> bool { self.year() > 1 }
}

impl Meaningful for Gender {
  fn is_meaningful(&self) -> bool { *self != Gender::Unknown }
}

/// Every status, including `Inactive`, is reportable.
impl Meaningful for RecordStatus {
  fn is_meaningful(&self) -> bool { true }
}

impl Meaningful for Lookup {
  fn is_meaningful(&self) -> bool {
    self.lookup_id.is_meaningful() && self.value.is_meaningful()
  }
}

impl<T: Meaningful> Meaningful for Option<T> {
  fn is_meaningful(&self) -> bool {
    self.as_ref().is_some_and(Meaningful::is_meaningful)
  }
}

impl<T> Meaningful for Vec<T> {
  fn is_meaningful(&self) -> bool { !self.is_empty() }
}

#[cfg(test)]
mod tests {
  use serde::{Deserialize, Serialize};

  use super::*;
  use crate::record::UNSET_DATE;

  #[derive(Serialize, Deserialize, Default)]
  struct Out {
    id:   i64,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    name: Field<String>,
  }

  #[test]
  fn absent_fields_are_omitted() {
    let out = Out { id: 7, name: Field::Absent };
    assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"id":7}"#);
  }

  #[test]
  fn present_fields_serialise_transparently() {
    let out = Out { id: 7, name: Field::Present("Ann".into()) };
    assert_eq!(
      serde_json::to_string(&out).unwrap(),
      r#"{"id":7,"name":"Ann"}"#
    );
  }

  #[test]
  fn missing_keys_deserialise_as_absent() {
    let out: Out = serde_json::from_str(r#"{"id":3}"#).unwrap();
    assert!(out.name.is_absent());
  }

  #[test]
  fn sentinels() {
    assert!(!"".is_meaningful());
    assert!(!"   ".is_meaningful());
    assert!("x".is_meaningful());
    assert!(!NOT_FOUND.is_meaningful());
    assert!(42_i64.is_meaningful());
    assert!(!UNSET_DATE.is_meaningful());
    assert!(!NaiveDate::from_ymd_opt(1, 1, 1).unwrap().is_meaningful());
    assert!(NaiveDate::from_ymd_opt(1980, 5, 1).unwrap().is_meaningful());
    assert!(!None::<String>.is_meaningful());
    assert!(!Some(String::new()).is_meaningful());
    assert!(!Vec::<u8>::new().is_meaningful());
    assert!(!Gender::Unknown.is_meaningful());
  }
}
