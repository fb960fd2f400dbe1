//! Protocol versioning.
//!
//! Peers sharing a major version can talk to each other. A client on a
//! different major version must ask before assuming anything.

use flock_access::wire::ProtocolVersion;

pub const PROTOCOL_VERSION: ProtocolVersion = ProtocolVersion { major: 0, minor: 1 };

/// Whether a client speaking `major.minor` is compatible with this server.
/// Minor versions never break compatibility.
pub fn is_client_version_supported(major: u32, _minor: u32) -> bool {
  major == PROTOCOL_VERSION.major
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_major_is_supported() {
    assert!(is_client_version_supported(0, 1));
    assert!(is_client_version_supported(0, 5));
    assert!(is_client_version_supported(0, 0));
  }

  #[test]
  fn other_majors_are_not() {
    assert!(!is_client_version_supported(1, 0));
    assert!(!is_client_version_supported(2, 1));
  }
}
