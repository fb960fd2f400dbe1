//! Handlers for small groups and their hierarchy. Still authenticated, even
//! though every field is public.
//!
//! | Method | Path |
//! |--------|------|
//! | `GET`  | `/rpc/groups/{id}` |
//! | `GET`  | `/rpc/clusters/{id}` |
//! | `GET`  | `/rpc/categories/{id}` |

use axum::{
  Json,
  extract::{Path, State},
};
use flock_access::{
  project,
  wire::{CategoryInformation, ClusterInformation, SmallGroupInformation},
};
use flock_core::record::{CategoryId, ClusterId, SmallGroupId};

use super::{context, evaluator};
use crate::{AppState, Backend, auth::Caller, error::Error};

/// `GET /rpc/groups/{id}`
pub async fn small_group<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Path(id): Path<SmallGroupId>,
) -> Result<Json<SmallGroupInformation>, Error> {
  let group = state.store.load_small_group(id).await.map_err(Error::store)?;
  let eval = evaluator(&state, &identity);
  let out = project::small_group_information(group.as_ref(), &context(&state), &eval).await;
  Ok(Json(out))
}

/// `GET /rpc/clusters/{id}`
pub async fn cluster<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Path(id): Path<ClusterId>,
) -> Result<Json<ClusterInformation>, Error> {
  let cluster = state.store.load_cluster(id).await.map_err(Error::store)?;
  let eval = evaluator(&state, &identity);
  let out = project::cluster_information(cluster.as_ref(), &context(&state), &eval).await;
  Ok(Json(out))
}

/// `GET /rpc/categories/{id}`
pub async fn category<S: Backend>(
  State(state): State<AppState<S>>,
  Caller(identity): Caller,
  Path(id): Path<CategoryId>,
) -> Result<Json<CategoryInformation>, Error> {
  let category = state.store.load_category(id).await.map_err(Error::store)?;
  let eval = evaluator(&state, &identity);
  let out = project::category_information(category.as_ref(), &context(&state), &eval).await;
  Ok(Json(out))
}
