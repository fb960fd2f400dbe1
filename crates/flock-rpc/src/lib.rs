//! JSON-over-HTTP RPC façade for Flock.
//!
//! Exposes an axum [`Router`] backed by any store implementing the
//! collaborator traits in [`flock_core::store`]. Each authenticated call
//! carries HTTP Basic credentials; responses contain only the fields the
//! caller may view.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod auth;
pub mod error;
pub mod handlers;
pub mod version;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use chrono::NaiveDate;
use flock_access::{GradePromotion, ProjectionContext};
use flock_core::{
  record::OrganizationId,
  store::{Authenticator, Directory, PermissionStore, RoleResolver},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{groups, people, profiles};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FLOCK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                    String,
  pub port:                    u16,
  /// Prefix for navigation and image URLs in responses.
  pub base_url:                String,
  pub store_path:              PathBuf,
  /// Organisation whose roles are consulted during access evaluation.
  pub default_organization_id: OrganizationId,
  #[serde(default = "default_promotion_month")]
  pub grade_promotion_month:   u32,
  #[serde(default = "default_promotion_day")]
  pub grade_promotion_day:     u32,
}

fn default_promotion_month() -> u32 { GradePromotion::default().month }

fn default_promotion_day() -> u32 { GradePromotion::default().day }

impl ServerConfig {
  pub fn projection_context(&self, today: NaiveDate) -> ProjectionContext {
    ProjectionContext {
      base_url: self.base_url.clone(),
      today,
      promotion: GradePromotion {
        month: self.grade_promotion_month,
        day:   self.grade_promotion_day,
      },
    }
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Everything a store must provide to back the RPC surface.
pub trait Backend:
  Directory + Authenticator + RoleResolver + PermissionStore + Clone + 'static
{
}

impl<T> Backend for T where
  T: Directory + Authenticator + RoleResolver + PermissionStore + Clone + 'static
{
}

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: Backend> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the RPC [`Router`].
pub fn router<S: Backend>(state: AppState<S>) -> Router {
  Router::new()
    // Version (anonymous)
    .route("/rpc/version", get(handlers::version::protocol_version))
    .route("/rpc/version/supported", get(handlers::version::supported))
    // People
    .route("/rpc/me", get(people::me))
    .route("/rpc/people/find", post(people::find::<S>))
    .route("/rpc/people/{id}", get(people::information::<S>))
    .route("/rpc/people/{id}/details", get(people::details::<S>))
    .route("/rpc/people/{id}/contact", get(people::contact::<S>))
    .route("/rpc/people/{id}/profiles", get(people::profiles::<S>))
    // Profiles
    .route("/rpc/profiles/{id}", get(profiles::information::<S>))
    .route("/rpc/profiles/{id}/members", get(profiles::members::<S>))
    // Small groups
    .route("/rpc/groups/{id}", get(groups::small_group::<S>))
    .route("/rpc/clusters/{id}", get(groups::cluster::<S>))
    .route("/rpc/categories/{id}", get(groups::category::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
