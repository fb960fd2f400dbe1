//! Handlers for `/rpc/profiles`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/rpc/profiles/{id}` | Requires View on the profile |
//! | `GET`  | `/rpc/profiles/{id}/members` | Requires View on the profile |

use axum::{
  Json,
  extract::{Path, State},
};
use flock_access::{
  project,
  wire::{ProfileInformation, ProfileMembers},
};
use flock_core::record::ProfileId;

use super::{context, evaluator};
use crate::{AppState, Backend, auth::Caller, error::Error};

/// `GET /rpc/profiles/{id}`
pub async fn information<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Path(id): Path<ProfileId>,
) -> Result<Json<ProfileInformation>, Error> {
  let profile = state.store.load_profile(id).await.map_err(Error::store)?;
  let eval = evaluator(&state, &identity);
  let out = project::profile_information(profile.as_ref(), &context(&state), &eval).await;
  Ok(Json(out))
}

/// `GET /rpc/profiles/{id}/members`
pub async fn members<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Path(id): Path<ProfileId>,
) -> Result<Json<ProfileMembers>, Error> {
  let profile = state.store.load_profile(id).await.map_err(Error::store)?;
  let member_ids = match &profile {
    Some(p) => state.store.profile_members(p.profile_id).await.map_err(Error::store)?,
    None => Vec::new(),
  };
  let eval = evaluator(&state, &identity);
  Ok(Json(project::profile_members(profile.as_ref(), &member_ids, &eval).await))
}
