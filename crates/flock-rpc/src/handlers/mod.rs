//! Route handlers, one module per record family.
//!
//! Every authenticated handler follows the same shape: resolve the caller,
//! load the record(s) through the [`Directory`](flock_core::store::Directory),
//! then hand them to a projection with a fresh per-call
//! [`AccessEvaluator`](flock_access::AccessEvaluator).

pub mod groups;
pub mod people;
pub mod profiles;
pub mod version;

use chrono::Utc;
use flock_access::{AccessEvaluator, ProjectionContext};
use flock_core::access::Identity;

use crate::{AppState, Backend};

/// A per-call evaluator for `identity`, scoped to the configured
/// organisation.
pub(crate) fn evaluator<'a, S: Backend>(
  state: &'a AppState<S>,
  identity: &'a Identity,
) -> AccessEvaluator<'a, S, S> {
  AccessEvaluator::new(
    identity,
    state.store.as_ref(),
    state.store.as_ref(),
    state.config.default_organization_id,
  )
}

/// Projection inputs fixed for the duration of one call.
pub(crate) fn context<S: Backend>(state: &AppState<S>) -> ProjectionContext {
  state.config.projection_context(Utc::now().date_naive())
}
