//! Addresses, phone numbers and email addresses of a person.
//!
//! Each collection is guarded as a whole; inside a permitted collection the
//! element sub-fields still follow sentinel omission.

use flock_core::{
  Field, Meaningful as _,
  access::ProtectedField::{Addresses, Emails, Phones},
  record::{Person, PersonAddress, PersonEmail, PersonPhone},
};

use crate::{
  Authorizer, ProjectionContext,
  rules::{Rule, lookup_value, project, text},
  wire::{Address, ContactInformation, Email, Phone},
};

type ContactRule = Rule<Person, ContactInformation>;

const CONTACT: &[ContactRule] = &[
  ContactRule::protected(
    Addresses,
    |p| p.addresses.is_meaningful(),
    |p, _, o| o.addresses = Field::Present(p.addresses.iter().map(address).collect()),
  ),
  ContactRule::protected(
    Phones,
    |p| p.phones.is_meaningful(),
    |p, _, o| o.phones = Field::Present(p.phones.iter().map(phone).collect()),
  ),
  ContactRule::protected(
    Emails,
    |p| p.emails.is_meaningful(),
    |p, _, o| o.emails = Field::Present(emails(&p.emails)),
  ),
];

fn address(a: &PersonAddress) -> Address {
  Address {
    address_id:    a.address_id,
    address_type:  lookup_value(&a.address_type),
    street_line_1: text(&a.street_line_1),
    street_line_2: text(&a.street_line_2),
    city:          text(&a.city),
    state:         text(&a.state),
    postal_code:   text(&a.postal_code),
    country:       text(&a.country),
    primary:       a.primary,
  }
}

fn phone(p: &PersonPhone) -> Phone {
  Phone {
    phone_type:  lookup_value(&p.phone_type),
    number:      text(&p.number),
    extension:   text(&p.extension),
    unlisted:    p.unlisted,
    sms_enabled: p.sms_enabled,
  }
}

/// Preferred address first; ties broken by id so output is stable.
fn emails(emails: &[PersonEmail]) -> Vec<Email> {
  let mut sorted: Vec<&PersonEmail> = emails.iter().collect();
  sorted.sort_by_key(|e| (e.order, e.email_id));
  sorted
    .into_iter()
    .map(|e| Email {
      email_id: e.email_id,
      address:  text(&e.address),
      active:   e.active,
      order:    e.order,
    })
    .collect()
}

/// Project a person's contact collections.
///
/// Collections are filled only for a person that exists; a missing person
/// yields the not-found structure with no collections at all.
pub async fn contact_information<A: Authorizer>(
  person: Option<&Person>,
  ctx: &ProjectionContext,
  authorizer: &A,
) -> ContactInformation {
  project(CONTACT, person, ctx, authorizer).await
}

#[cfg(test)]
mod tests {
  use flock_core::{access::ProtectedField, record::NOT_FOUND};

  use super::*;
  use crate::{
    testing::{Allow, ctx, full_person},
    wire::Keyed as _,
  };

  fn all_contact() -> Allow {
    Allow::fields(&[
      ProtectedField::Addresses,
      ProtectedField::Phones,
      ProtectedField::Emails,
    ])
  }

  #[tokio::test]
  async fn found_person_gets_permitted_collections() {
    let person = full_person(42);
    let info = contact_information(Some(&person), &ctx(), &all_contact()).await;

    assert_eq!(info.person_id, 42);
    let addresses = info.addresses.as_option().expect("addresses");
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].city, Field::Present("Springfield".to_string()));
    assert_eq!(addresses[0].address_type, Field::Present("Home".to_string()));
    assert!(info.phones.is_present());
    assert!(info.emails.is_present());
  }

  #[tokio::test]
  async fn missing_person_gets_no_collections() {
    let info = contact_information(None, &ctx(), &all_contact()).await;
    assert_eq!(info, ContactInformation::not_found());
    assert_eq!(info.person_id, NOT_FOUND);
    assert!(info.addresses.is_absent());
    assert!(info.phones.is_absent());
    assert!(info.emails.is_absent());
  }

  #[tokio::test]
  async fn each_collection_has_its_own_grant() {
    let person = full_person(42);
    let only_phones = Allow::fields(&[ProtectedField::Phones]);
    let info = contact_information(Some(&person), &ctx(), &only_phones).await;

    assert!(info.addresses.is_absent());
    assert!(info.phones.is_present());
    assert!(info.emails.is_absent());
  }

  #[tokio::test]
  async fn empty_element_fields_are_omitted() {
    let person = full_person(42);
    let info = contact_information(Some(&person), &ctx(), &all_contact()).await;

    let json = serde_json::to_value(&info).unwrap();
    let address = &json["addresses"][0];
    assert!(address.get("street_line_1").is_some());
    assert!(address.get("street_line_2").is_none());
    let phone = &json["phones"][0];
    assert!(phone.get("extension").is_none());
    assert_eq!(phone["sms_enabled"], serde_json::Value::Bool(true));
  }

  #[tokio::test]
  async fn empty_collections_are_omitted() {
    let mut person = full_person(42);
    person.addresses.clear();
    let info = contact_information(Some(&person), &ctx(), &all_contact()).await;
    assert!(info.addresses.is_absent());
  }

  #[tokio::test]
  async fn emails_are_ordered_by_preference() {
    let person = full_person(42);
    let info = contact_information(Some(&person), &ctx(), &all_contact()).await;

    let ids: Vec<i64> = info
      .emails
      .as_option()
      .expect("emails")
      .iter()
      .map(|e| e.email_id)
      .collect();
    assert_eq!(ids, vec![1, 2]);
  }
}
