//! Thin wrappers around the audited primitives this crate orchestrates.
//!
//! Nothing in here knows about tokens: these are the keyed hash (BLAKE2b),
//! the stream cipher (XChaCha20), the signature scheme (Ed25519), the secure
//! random source and constant time comparison.

pub mod hash;
pub mod sign;
pub mod stream;

use crate::errors::PasetoError;

use ring::rand::{SecureRandom, SystemRandom};

/// Fills a fresh buffer of `N` bytes from the operating system CSPRNG.
pub fn random_bytes<const N: usize>() -> Result<[u8; N], PasetoError> {
  let rng = SystemRandom::new();
  let mut buff = [0_u8; N];
  rng.fill(&mut buff).map_err(|_| PasetoError::RandomError)?;
  Ok(buff)
}

/// Compares two byte strings in time that only depends on their length.
///
/// Slices of different length are unequal without looking at the contents.
#[allow(deprecated)]
#[must_use]
pub fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
  ring::constant_time::verify_slices_are_equal(left, right).is_ok()
}
