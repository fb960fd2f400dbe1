//! Person summary and person details.

use flock_core::{
  Field, Meaningful as _,
  access::ProtectedField::{
    Anniversary, BirthDate, Campus, Contributions, Employment, EnvelopeNumber,
    Family, Gender, Grade, MaritalStatus, MedicalInformation, MemberStatus,
    Name, Notes, Photo, RecordStatus, Staff,
  },
  record::Person,
};

use crate::{
  Authorizer, ProjectionContext,
  rules::{Rule, lookup_value, present, project},
  wire::{PersonDetails, PersonInformation},
};

type InfoRule = Rule<Person, PersonInformation>;
type DetailRule = Rule<Person, PersonDetails>;

const INFORMATION: &[InfoRule] = &[
  InfoRule::protected(
    Name,
    |p| p.first_name.is_meaningful(),
    |p, _, o| o.first_name = present(&p.first_name),
  ),
  InfoRule::protected(
    Name,
    |p| p.nick_name.is_meaningful(),
    |p, _, o| o.nick_name = present(&p.nick_name),
  ),
  InfoRule::protected(
    Name,
    |p| p.middle_name.is_meaningful(),
    |p, _, o| o.middle_name = present(&p.middle_name),
  ),
  InfoRule::protected(
    Name,
    |p| p.last_name.is_meaningful(),
    |p, _, o| o.last_name = present(&p.last_name),
  ),
  InfoRule::protected(
    Name,
    |p| p.suffix.is_meaningful(),
    |p, _, o| o.suffix = present(&p.suffix),
  ),
  InfoRule::protected(
    Name,
    |p| p.title.is_meaningful(),
    |p, _, o| o.title = present(&p.title),
  ),
  InfoRule::protected(
    BirthDate,
    |p| p.birth_date.is_meaningful(),
    |p, ctx, o| {
      o.birth_date = present(&p.birth_date);
      o.age = ctx.age(p.birth_date).into();
    },
  ),
  InfoRule::protected(
    Grade,
    |p| p.graduation_date.is_meaningful(),
    |p, ctx, o| o.grade = ctx.grade(p.graduation_date).into(),
  ),
  InfoRule::protected(
    Gender,
    |p| p.gender.is_meaningful(),
    |p, _, o| o.gender = Field::Present(p.gender.to_string()),
  ),
  InfoRule::protected(
    MemberStatus,
    |p| p.member_status.is_meaningful(),
    |p, _, o| o.member_status = lookup_value(&p.member_status),
  ),
  InfoRule::protected(
    Campus,
    |p| p.campus_id.is_meaningful(),
    |p, _, o| o.campus_id = present(&p.campus_id),
  ),
  InfoRule::protected(
    Staff,
    |p| p.staff_member.is_meaningful(),
    |p, _, o| o.staff = present(&p.staff_member),
  ),
  InfoRule::protected(
    RecordStatus,
    |p| p.record_status.is_meaningful(),
    |p, _, o| o.record_status = Field::Present(p.record_status.to_string()),
  ),
  InfoRule::protected(
    Photo,
    |p| p.blob_id.is_meaningful(),
    |p, ctx, o| o.image_url = Field::Present(ctx.image_url(p.blob_id)),
  ),
];

const DETAILS: &[DetailRule] = &[
  DetailRule::public(
    |p| p.created_by.is_meaningful(),
    |p, _, o| o.created_by = present(&p.created_by),
  ),
  DetailRule::public(|_| true, |p, _, o| o.date_created = present(&p.date_created)),
  DetailRule::public(
    |p| p.modified_by.is_meaningful(),
    |p, _, o| o.modified_by = present(&p.modified_by),
  ),
  DetailRule::public(|_| true, |p, _, o| o.date_modified = present(&p.date_modified)),
  DetailRule::public(
    |_| true,
    |p, ctx, o| o.navigation_url = Field::Present(ctx.person_url(p.person_id)),
  ),
  DetailRule::protected(
    MaritalStatus,
    |p| p.marital_status.is_meaningful(),
    |p, _, o| o.marital_status = lookup_value(&p.marital_status),
  ),
  DetailRule::protected(
    Anniversary,
    |p| p.anniversary_date.is_meaningful(),
    |p, _, o| o.anniversary_date = present(&p.anniversary_date),
  ),
  DetailRule::protected(
    Employment,
    |p| p.employer.is_meaningful(),
    |p, _, o| o.employer = present(&p.employer),
  ),
  DetailRule::protected(
    Employment,
    |p| p.position.is_meaningful(),
    |p, _, o| o.position = present(&p.position),
  ),
  DetailRule::protected(
    MedicalInformation,
    |p| p.medical_information.is_meaningful(),
    |p, _, o| o.medical_information = present(&p.medical_information),
  ),
  DetailRule::protected(
    EnvelopeNumber,
    |p| p.envelope_number.is_meaningful(),
    |p, _, o| o.envelope_number = present(&p.envelope_number),
  ),
  DetailRule::protected(
    Contributions,
    |_| true,
    |p, _, o| {
      o.contribute_individually = present(&p.contribute_individually);
      o.print_statement = present(&p.print_statement);
      o.email_statement = present(&p.email_statement);
    },
  ),
  DetailRule::protected(
    Family,
    |p| p.family_id.is_meaningful(),
    |p, _, o| o.family_id = present(&p.family_id),
  ),
  DetailRule::protected(
    Notes,
    |p| p.notes.is_meaningful(),
    |p, _, o| o.notes = present(&p.notes),
  ),
];

/// Project a person into the summary structure.
pub async fn person_information<A: Authorizer>(
  person: Option<&Person>,
  ctx: &ProjectionContext,
  authorizer: &A,
) -> PersonInformation {
  project(INFORMATION, person, ctx, authorizer).await
}

/// Project a person into the details structure.
pub async fn person_details<A: Authorizer>(
  person: Option<&Person>,
  ctx: &ProjectionContext,
  authorizer: &A,
) -> PersonDetails {
  project(DETAILS, person, ctx, authorizer).await
}
