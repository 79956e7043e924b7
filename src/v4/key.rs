//! Parsing and generation of version 4 keys.
//!
//! Keys always travel with their version and purpose attached, either as text
//! (`k4.local.<base64url>`) or as bytes (`b"k4.local."` followed by the raw
//! key). A key is only ever accepted for the exact purpose it was made for.

use crate::errors::PasetoError;
use crate::magic::{key_length, key_magic_bytes, key_magic_string, Purpose, Version};
use crate::primitives::constant_time_eq;
use crate::primitives::random_bytes;
use crate::primitives::sign::ed25519_key_pair_from_seed;

use base64::{decode_config, encode_config, URL_SAFE_NO_PAD};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Key material as handed to any operation that needs a key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum KeyData<'a> {
  /// A PASERK style string such as `k4.local.<base64url>`.
  Text(&'a str),
  /// The magic prefix bytes followed by the raw key.
  Bytes(&'a [u8]),
}

// Key material never ends up in logs or panic messages.
impl fmt::Debug for KeyData<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      KeyData::Text(_) => f.write_str("KeyData::Text(<redacted>)"),
      KeyData::Bytes(_) => f.write_str("KeyData::Bytes(<redacted>)"),
    }
  }
}

impl<'a> From<&'a str> for KeyData<'a> {
  fn from(key: &'a str) -> Self {
    KeyData::Text(key)
  }
}

impl<'a> From<&'a String> for KeyData<'a> {
  fn from(key: &'a String) -> Self {
    KeyData::Text(key.as_str())
  }
}

impl<'a> From<&'a [u8]> for KeyData<'a> {
  fn from(key: &'a [u8]) -> Self {
    KeyData::Bytes(key)
  }
}

impl<'a> From<&'a Vec<u8>> for KeyData<'a> {
  fn from(key: &'a Vec<u8>) -> Self {
    KeyData::Bytes(key.as_slice())
  }
}

impl<'a> From<&'a KeyOutput> for KeyData<'a> {
  fn from(key: &'a KeyOutput) -> Self {
    match key {
      KeyOutput::Paserk(text) => KeyData::Text(text.as_str()),
      KeyOutput::Buffer(bytes) => KeyData::Bytes(bytes.as_slice()),
    }
  }
}

fn key_error(purpose: Purpose, reason: &str) -> PasetoError {
  debug!(%purpose, reason, "rejected key");
  PasetoError::KeyInvalid(format!("Invalid {} key: {}", purpose, reason))
}

/// Parses a version 4 key for `purpose`, returning the raw key bytes.
pub fn parse_key<'a, K: Into<KeyData<'a>>>(purpose: Purpose, key: K) -> Result<Vec<u8>, PasetoError> {
  parse_key_for(Version::V4, purpose, key.into())
}

/// Parses a key of any supported version, returning the raw key bytes.
///
/// Text keys must start with the exact magic string for the version and
/// purpose, and the third dot separated segment is decoded. Byte keys must
/// start with the magic bytes, compared in constant time, which are then
/// stripped. Either way the result must be exactly the key length.
pub fn parse_key_for(version: Version, purpose: Purpose, key: KeyData<'_>) -> Result<Vec<u8>, PasetoError> {
  let raw = match key {
    KeyData::Text(text) => {
      if text.is_empty() {
        return Err(PasetoError::TypeError(String::from("Key must be a string or a byte buffer")));
      }
      if !text.starts_with(key_magic_string(version, purpose)) {
        return Err(key_error(purpose, "wrong version or purpose"));
      }
      let encoded = text
        .split('.')
        .nth(2)
        .ok_or_else(|| key_error(purpose, "missing key data"))?;
      decode_config(encoded, URL_SAFE_NO_PAD).map_err(|_| key_error(purpose, "key data is not base64url"))?
    }
    KeyData::Bytes(bytes) => {
      if bytes.is_empty() {
        return Err(PasetoError::TypeError(String::from("Key must be a string or a byte buffer")));
      }
      let magic = key_magic_bytes(version, purpose);
      if bytes.len() < magic.len() || !constant_time_eq(&bytes[..magic.len()], magic) {
        return Err(key_error(purpose, "wrong version or purpose"));
      }
      bytes[magic.len()..].to_vec()
    }
  };

  if raw.len() != key_length(version, purpose) {
    return Err(key_error(purpose, "wrong key length"));
  }
  Ok(raw)
}

/// How generated keys are handed back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyFormat {
  /// `k4.<purpose>.<base64url>` strings.
  Paserk,
  /// Magic prefix bytes followed by the raw key.
  Buffer,
}

impl Default for KeyFormat {
  fn default() -> Self {
    KeyFormat::Paserk
  }
}

impl FromStr for KeyFormat {
  type Err = PasetoError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "paserk" => Ok(KeyFormat::Paserk),
      "buffer" => Ok(KeyFormat::Buffer),
      other => Err(PasetoError::FormatInvalid(format!("Invalid format: {}", other))),
    }
  }
}

/// A single generated key in the requested format.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyOutput {
  Paserk(String),
  Buffer(Vec<u8>),
}

impl fmt::Debug for KeyOutput {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      KeyOutput::Paserk(_) => f.write_str("KeyOutput::Paserk(<redacted>)"),
      KeyOutput::Buffer(_) => f.write_str("KeyOutput::Buffer(<redacted>)"),
    }
  }
}

impl KeyOutput {
  fn new(format: KeyFormat, purpose: Purpose, raw: &[u8]) -> Self {
    match format {
      KeyFormat::Paserk => KeyOutput::Paserk(format!(
        "{}{}",
        key_magic_string(Version::V4, purpose),
        encode_config(raw, URL_SAFE_NO_PAD)
      )),
      KeyFormat::Buffer => {
        let magic = key_magic_bytes(Version::V4, purpose);
        let mut bytes = Vec::with_capacity(magic.len() + raw.len());
        bytes.extend_from_slice(magic);
        bytes.extend_from_slice(raw);
        KeyOutput::Buffer(bytes)
      }
    }
  }
}

/// The result of key generation: one shared key, or a signing key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneratedKeys {
  Local(KeyOutput),
  Public { secret_key: KeyOutput, public_key: KeyOutput },
}

/// Generates a fresh 32 byte `local` key.
pub fn generate_local_key(format: KeyFormat) -> Result<KeyOutput, PasetoError> {
  let raw = random_bytes::<32>()?;
  Ok(KeyOutput::new(format, Purpose::Local, &raw))
}

/// Generates a fresh Ed25519 key pair, returned as `(secret_key, public_key)`.
pub fn generate_key_pair(format: KeyFormat) -> Result<(KeyOutput, KeyOutput), PasetoError> {
  let seed = random_bytes::<32>()?;
  let (secret_key, public_key) = ed25519_key_pair_from_seed(&seed)?;
  Ok((
    KeyOutput::new(format, Purpose::Secret, &secret_key),
    KeyOutput::new(format, Purpose::Public, &public_key),
  ))
}

/// Generates a key (`local`) or key pair (`public`) from string arguments.
///
/// `purpose` must be `local` or `public`, and `format` must be `paserk` or
/// `buffer`.
pub fn generate_keys(purpose: &str, format: &str) -> Result<GeneratedKeys, PasetoError> {
  match Purpose::from_str(purpose) {
    Ok(Purpose::Local) => Ok(GeneratedKeys::Local(generate_local_key(format.parse()?)?)),
    Ok(Purpose::Public) => {
      let (secret_key, public_key) = generate_key_pair(format.parse()?)?;
      Ok(GeneratedKeys::Public { secret_key, public_key })
    }
    _ => Err(PasetoError::PurposeInvalid(format!("Invalid purpose: {}", purpose))),
  }
}
