//! Provides a "nice" wrapper around paseto tokens: a builder, and validation
//! helpers that also pin the footer a token must carry.

use crate::claims::{Claims, Data};
use crate::errors::PasetoError;
use crate::options::Options;
use crate::primitives::constant_time_eq;
use crate::v4::key::KeyData;
use crate::v4::token::{split_local_token, split_public_token};
use crate::v4::{decrypt, verify};

use tracing::debug;

pub mod builder;
pub use self::builder::*;

/// Fails unless the token carries exactly the footer expected. No expected
/// footer means any footer is accepted.
fn check_footer(actual: &[u8], expected: Option<&str>) -> Result<(), PasetoError> {
  match expected {
    Some(expected) if !constant_time_eq(actual, expected.as_bytes()) => {
      debug!("token footer does not match the expected footer");
      Err(PasetoError::FooterInvalid(String::from("Token footer does not match")))
    }
    _ => Ok(()),
  }
}

/// Validate a local token, returning its claims.
///
/// On top of everything `decrypt` checks, the footer must equal `footer`
/// when one is given.
pub fn validate_local_token<'a, K: Into<KeyData<'a>>>(
  token: &str,
  footer: Option<&str>,
  key: K,
  assertion: Option<Data<'_>>,
  options: &Options,
) -> Result<Claims, PasetoError> {
  check_footer(&split_local_token(token)?.footer, footer)?;
  Ok(decrypt(key, token, assertion, options)?.payload)
}

/// Validate a public token, returning its claims.
///
/// On top of everything `verify` checks, the footer must equal `footer`
/// when one is given.
pub fn validate_public_token<'a, K: Into<KeyData<'a>>>(
  token: &str,
  footer: Option<&str>,
  key: K,
  assertion: Option<Data<'_>>,
  options: &Options,
) -> Result<Claims, PasetoError> {
  check_footer(&split_public_token(token)?.footer, footer)?;
  Ok(verify(key, token, assertion, options)?.payload)
}
