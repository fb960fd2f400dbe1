//! Handlers for the unauthenticated version endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/rpc/version` | Server protocol version |
//! | `GET`  | `/rpc/version/supported` | `?major=&minor=` |

use axum::{Json, extract::Query};
use flock_access::wire::{ProtocolVersion, VersionSupport};
use serde::Deserialize;

use crate::version::{PROTOCOL_VERSION, is_client_version_supported};

/// `GET /rpc/version`
pub async fn protocol_version() -> Json<ProtocolVersion> { Json(PROTOCOL_VERSION) }

#[derive(Debug, Deserialize)]
pub struct ClientVersion {
  pub major: u32,
  pub minor: u32,
}

/// `GET /rpc/version/supported?major=<n>&minor=<n>`
pub async fn supported(Query(client): Query<ClientVersion>) -> Json<VersionSupport> {
  Json(VersionSupport {
    supported: is_client_version_supported(client.major, client.minor),
  })
}
