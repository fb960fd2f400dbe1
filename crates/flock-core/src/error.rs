//! Error types for `flock-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown operation: {0:?}")]
  UnknownOperation(String),

  #[error("unknown subject kind: {0:?}")]
  UnknownSubjectKind(String),

  #[error("unknown gender: {0:?}")]
  UnknownGender(String),

  #[error("unknown record status: {0:?}")]
  UnknownRecordStatus(String),

  #[error("unknown profile type code: {0}")]
  UnknownProfileType(i32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why a set of credentials did not produce an
/// [`Identity`](crate::access::Identity).
#[derive(Debug, Error)]
pub enum AuthError {
  /// Unknown username or a password that does not verify.
  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("account is locked")]
  AccountLocked,

  /// The credential store itself could not be consulted.
  #[error("authentication backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
