//! Handlers for `/rpc/people` and `/rpc/me`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/rpc/me` | The authenticated identity |
//! | `POST` | `/rpc/people/find` | Body: `PersonQuery` |
//! | `GET`  | `/rpc/people/{id}` | Summary |
//! | `GET`  | `/rpc/people/{id}/details` | Details |
//! | `GET`  | `/rpc/people/{id}/contact` | Addresses, phones, emails |
//! | `GET`  | `/rpc/people/{id}/profiles` | Optional `?profile_type=<code>` |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use flock_access::{
  project,
  wire::{ContactInformation, PersonDetails, PersonInformation, PersonList, ProfileList},
};
use flock_core::{
  access::Identity,
  record::{PersonId, ProfileType},
  store::PersonQuery,
};
use serde::Deserialize;

use super::{context, evaluator};
use crate::{AppState, Backend, auth::Caller, error::Error};

/// `GET /rpc/me`
pub async fn me(Caller(identity): Caller) -> Json<Identity> { Json(identity) }

/// `POST /rpc/people/find`
///
/// A first+last name pair searches by name. Other criteria are accepted but
/// not evaluated, so a query without a name pair finds nobody.
pub async fn find<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Json(query): Json<PersonQuery>,
) -> Result<Json<PersonList>, Error> {
  let person_ids = match query.name_pair() {
    Some((first, last)) => state
      .store
      .find_people_by_name(first, last)
      .await
      .map_err(Error::store)?,
    None => {
      tracing::debug!(username = %identity.username, ?query, "no name pair; criteria not evaluated");
      Vec::new()
    }
  };
  Ok(Json(PersonList { person_ids }))
}

/// `GET /rpc/people/{id}`
pub async fn information<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Path(id): Path<PersonId>,
) -> Result<Json<PersonInformation>, Error> {
  let person = state.store.load_person(id).await.map_err(Error::store)?;
  let eval = evaluator(&state, &identity);
  let out = project::person_information(person.as_ref(), &context(&state), &eval).await;
  Ok(Json(out))
}

/// `GET /rpc/people/{id}/details`
pub async fn details<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Path(id): Path<PersonId>,
) -> Result<Json<PersonDetails>, Error> {
  let person = state.store.load_person(id).await.map_err(Error::store)?;
  let eval = evaluator(&state, &identity);
  let out = project::person_details(person.as_ref(), &context(&state), &eval).await;
  Ok(Json(out))
}

/// `GET /rpc/people/{id}/contact`
pub async fn contact<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Path(id): Path<PersonId>,
) -> Result<Json<ContactInformation>, Error> {
  let person = state.store.load_person(id).await.map_err(Error::store)?;
  let eval = evaluator(&state, &identity);
  let out = project::contact_information(person.as_ref(), &context(&state), &eval).await;
  Ok(Json(out))
}

#[derive(Debug, Deserialize)]
pub struct ProfileParams {
  pub profile_type: Option<i32>,
}

/// `GET /rpc/people/{id}/profiles[?profile_type=<code>]`
pub async fn profiles<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Path(id): Path<PersonId>,
  Query(params): Query<ProfileParams>,
) -> Result<Json<ProfileList>, Error> {
  let profile_type = params.profile_type.map(ProfileType::from_code).transpose()?;

  let person = state.store.load_person(id).await.map_err(Error::store)?;
  let memberships = match &person {
    Some(p) => state.store.person_profiles(p.person_id).await.map_err(Error::store)?,
    None => Vec::new(),
  };

  let eval = evaluator(&state, &identity);
  let out = project::person_profiles(person.as_ref(), &memberships, profile_type, &eval).await;
  Ok(Json(out))
}
