//! HTTP Basic-auth extractor.
//!
//! Every authenticated call carries its own credentials; nothing is cached
//! between calls.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use flock_core::{AuthError, access::Identity};

use crate::{AppState, Backend, error::Error};

/// The authenticated caller, resolved from the request's credentials.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

/// Split a `Basic` authorization header into username and password.
pub fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), Error> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds = String::from_utf8(decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;
  Ok((username.to_owned(), password.to_owned()))
}

impl<S: Backend> FromRequestParts<AppState<S>> for Caller {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let (username, password) = basic_credentials(&parts.headers)?;

    match state.store.authenticate(&username, &password).await {
      Ok(identity) => Ok(Caller(identity)),
      Err(AuthError::Backend(e)) => Err(Error::Store(e)),
      Err(e) => {
        tracing::info!(%username, reason = %e, "authentication failed");
        Err(Error::Unauthorized)
      }
    }
  }
}
