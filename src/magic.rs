//! Version and purpose tags, and the magic prefixes that bind keys and tokens
//! to them.

use crate::errors::PasetoError;

use std::fmt;
use std::str::FromStr;

/// Default maximum JSON nesting depth for payloads and footers.
pub const MAX_DEPTH_DEFAULT: usize = 32;
/// Default maximum number of JSON keys for payloads and footers.
pub const MAX_KEYS_DEFAULT: usize = 128;

/// The PASETO protocol version. Only version 4 is implemented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
  V4,
}

impl Default for Version {
  fn default() -> Self {
    Version::V4
  }
}

impl FromStr for Version {
  type Err = PasetoError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "v4" => Ok(Version::V4),
      other => Err(PasetoError::NotSupported(other.to_owned())),
    }
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Version::V4 => f.write_str("v4"),
    }
  }
}

/// What a key is for. `Local` keys encrypt, `Secret` keys sign and `Public`
/// keys verify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Purpose {
  Local,
  Secret,
  Public,
}

impl Purpose {
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Purpose::Local => "local",
      Purpose::Secret => "secret",
      Purpose::Public => "public",
    }
  }
}

impl FromStr for Purpose {
  type Err = PasetoError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "local" => Ok(Purpose::Local),
      "secret" => Ok(Purpose::Secret),
      "public" => Ok(Purpose::Public),
      other => Err(PasetoError::PurposeInvalid(format!(
        "Must be one of 'local', 'secret' or 'public'. Received: {}",
        other
      ))),
    }
  }
}

impl fmt::Display for Purpose {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The two kinds of token. Secret and public keys both belong to `Public`
/// tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenPurpose {
  Local,
  Public,
}

/// The text prefix a key of this version and purpose must start with.
#[must_use]
pub fn key_magic_string(version: Version, purpose: Purpose) -> &'static str {
  match (version, purpose) {
    (Version::V4, Purpose::Local) => "k4.local.",
    (Version::V4, Purpose::Secret) => "k4.secret.",
    (Version::V4, Purpose::Public) => "k4.public.",
  }
}

/// The byte prefix binary keys must start with, trailing dot included.
#[must_use]
pub fn key_magic_bytes(version: Version, purpose: Purpose) -> &'static [u8] {
  key_magic_string(version, purpose).as_bytes()
}

/// Exact length of a key of this version and purpose once the prefix is gone.
#[must_use]
pub fn key_length(version: Version, purpose: Purpose) -> usize {
  match (version, purpose) {
    (Version::V4, Purpose::Local) => 32,
    (Version::V4, Purpose::Secret) => 64,
    (Version::V4, Purpose::Public) => 32,
  }
}

/// The header every token of this version and purpose starts with.
#[must_use]
pub fn token_magic_string(version: Version, purpose: TokenPurpose) -> &'static str {
  match (version, purpose) {
    (Version::V4, TokenPurpose::Local) => "v4.local.",
    (Version::V4, TokenPurpose::Public) => "v4.public.",
  }
}

#[must_use]
pub fn token_magic_bytes(version: Version, purpose: TokenPurpose) -> &'static [u8] {
  token_magic_string(version, purpose).as_bytes()
}
