//! Inputs to projection that do not come from the record: configuration and
//! the date the call is evaluated on. Also the derivations that use them.

use chrono::{Datelike, NaiveDate};

use flock_core::record::{BlobId, PersonId, SmallGroupId};

/// Month and day on which students move up a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradePromotion {
  pub month: u32,
  pub day:   u32,
}

impl Default for GradePromotion {
  fn default() -> Self { Self { month: 6, day: 1 } }
}

/// Everything a projection needs besides the record and the authorizer.
///
/// `today` is fixed per call so that projecting the same record twice yields
/// identical output.
#[derive(Debug, Clone)]
pub struct ProjectionContext {
  pub base_url:  String,
  pub today:     NaiveDate,
  pub promotion: GradePromotion,
}

impl ProjectionContext {
  fn url(&self, path: &str) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), path)
  }

  pub fn person_url(&self, person_id: PersonId) -> String {
    self.url(&format!("people/{person_id}"))
  }

  pub fn image_url(&self, blob_id: BlobId) -> String {
    self.url(&format!("blobs/{blob_id}"))
  }

  pub fn small_group_url(&self, group_id: SmallGroupId) -> String {
    self.url(&format!("groups/{group_id}"))
  }

  /// Whole years since `birth_date`; `None` for a birth date in the future.
  pub fn age(&self, birth_date: NaiveDate) -> Option<u32> {
    if birth_date > self.today {
      return None;
    }
    let mut years = self.today.year() - birth_date.year();
    if (self.today.month(), self.today.day())
      < (birth_date.month(), birth_date.day())
    {
      years -= 1;
    }
    u32::try_from(years).ok()
  }

  /// School grade (0 = kindergarten … 12) for a student graduating on
  /// `graduation_date`; `None` outside that range.
  ///
  /// The graduating class of the current school year rolls over on the
  /// promotion date.
  pub fn grade(&self, graduation_date: NaiveDate) -> Option<i32> {
    let promoted = (self.today.month(), self.today.day())
      >= (self.promotion.month, self.promotion.day);
    let senior_class = self.today.year() + i32::from(promoted);
    let grade = 12 - (graduation_date.year() - senior_class);
    (0..=12).contains(&grade).then_some(grade)
  }
}

#[cfg(test)]
mod tests {
  use crate::testing::{ctx, date};

  #[test]
  fn age_counts_completed_years() {
    let c = ctx(); // today = 2024-09-15
    assert_eq!(c.age(date(1980, 5, 1)), Some(44));
    assert_eq!(c.age(date(1980, 9, 15)), Some(44));
    assert_eq!(c.age(date(1980, 9, 16)), Some(43));
    assert_eq!(c.age(date(2024, 9, 15)), Some(0));
    assert_eq!(c.age(date(2025, 1, 1)), None);
  }

  #[test]
  fn grade_rolls_over_on_promotion_date() {
    let mut c = ctx(); // promotion June 1st, today after it
    assert_eq!(c.grade(date(2025, 6, 1)), Some(12));
    assert_eq!(c.grade(date(2030, 6, 1)), Some(7));
    assert_eq!(c.grade(date(2037, 6, 1)), Some(0));

    c.today = date(2024, 5, 31);
    assert_eq!(c.grade(date(2024, 6, 1)), Some(12));
    assert_eq!(c.grade(date(2025, 6, 1)), Some(11));
  }

  #[test]
  fn grade_outside_school_range_is_none() {
    let c = ctx();
    assert_eq!(c.grade(date(2024, 6, 1)), None); // already graduated
    assert_eq!(c.grade(date(2040, 6, 1)), None); // not yet in school
  }

  #[test]
  fn urls_ignore_trailing_slash() {
    let c = ctx();
    assert_eq!(c.person_url(7), "https://church.example.org/people/7");
    assert_eq!(c.image_url(9), "https://church.example.org/blobs/9");
    assert_eq!(c.small_group_url(3), "https://church.example.org/groups/3");
  }
}
