//! An Implementation of Paseto V4 "public" tokens (or tokens that are signed
//! with an Ed25519 secret key, and verified with its public key).

use crate::claims::{optional_assertion, optional_footer, validate_footer, validate_payload_at, Data};
use crate::errors::PasetoError;
use crate::magic::{token_magic_bytes, token_magic_string, Purpose, TokenPurpose, Version};
use crate::options::Options;
use crate::pae::pae;
use crate::primitives::sign::{ed25519_sign, ed25519_verify, SIGNATURE_BYTES};
use crate::v4::key::{parse_key, KeyData};
use crate::v4::token::split_public_token;
use crate::v4::DecodedToken;

use base64::{encode_config, URL_SAFE_NO_PAD};
use chrono::prelude::*;
use tracing::debug;

/// Sign a "v4.public" paseto token.
///
/// `key` must be a `k4.secret` key. The payload travels in the clear, so
/// never put anything in it the verifier's side should not read.
pub fn sign<'a, 'p, K, P>(
  key: K,
  payload: P,
  footer: Option<Data<'_>>,
  assertion: Option<Data<'_>>,
  options: &Options,
) -> Result<String, PasetoError>
where
  K: Into<KeyData<'a>>,
  P: Into<Data<'p>>,
{
  underlying_sign(key.into(), payload.into(), footer, assertion, options, Utc::now())
}

fn underlying_sign(
  key: KeyData<'_>,
  payload: Data<'_>,
  footer: Option<Data<'_>>,
  assertion: Option<Data<'_>>,
  options: &Options,
  now: DateTime<Utc>,
) -> Result<String, PasetoError> {
  let key = parse_key(Purpose::Secret, key)?;
  let claims = validate_payload_at(payload, options, now)?;
  let message = serde_json::to_vec(&claims).map_err(|err| PasetoError::PayloadInvalid(err.to_string()))?;
  let footer = optional_footer(footer, options)?;
  let assertion = optional_assertion(assertion)?;

  let header = token_magic_bytes(Version::V4, TokenPurpose::Public);
  let pre_auth = pae(&[header, &message, &footer, &assertion]);
  let signature = ed25519_sign(&pre_auth, &key)?;

  let mut body = Vec::with_capacity(message.len() + SIGNATURE_BYTES);
  body.extend_from_slice(&message);
  body.extend_from_slice(&signature);

  let header = token_magic_string(Version::V4, TokenPurpose::Public);
  let token = if footer.is_empty() {
    format!("{}{}", header, encode_config(&body, URL_SAFE_NO_PAD))
  } else {
    format!(
      "{}{}.{}",
      header,
      encode_config(&body, URL_SAFE_NO_PAD),
      encode_config(&footer, URL_SAFE_NO_PAD)
    )
  };

  Ok(token)
}

/// Verify a "v4.public" paseto token.
///
/// `key` must be a `k4.public` key. The signature is checked before the
/// message is parsed, and the payload claims are validated afterwards unless
/// `options.validate` is off. Verification never adds claims.
pub fn verify<'a, K, T>(
  key: K,
  token: T,
  assertion: Option<Data<'_>>,
  options: &Options,
) -> Result<DecodedToken, PasetoError>
where
  K: Into<KeyData<'a>>,
  T: AsRef<[u8]>,
{
  underlying_verify(key.into(), token.as_ref(), assertion, options, Utc::now())
}

fn underlying_verify(
  key: KeyData<'_>,
  token: &[u8],
  assertion: Option<Data<'_>>,
  options: &Options,
  now: DateTime<Utc>,
) -> Result<DecodedToken, PasetoError> {
  // Bail out on anything that is not a public token before touching the key.
  if !token.starts_with(token_magic_bytes(Version::V4, TokenPurpose::Public)) {
    debug!("rejected token without a v4.public header");
    return Err(PasetoError::TokenInvalid(String::from(
      "Token does not have the expected version and purpose",
    )));
  }
  let key = parse_key(Purpose::Public, key)?;
  let parts = split_public_token(token)?;
  if !parts.footer.is_empty() {
    validate_footer(Data::Bytes(&parts.footer), options)?;
  }
  let assertion = optional_assertion(assertion)?;

  let header = token_magic_bytes(Version::V4, TokenPurpose::Public);
  let pre_auth = pae(&[header, &parts.message, &parts.footer, &assertion]);
  if !ed25519_verify(&parts.signature, &pre_auth, &key) {
    debug!("v4.public token failed signature verification");
    return Err(PasetoError::SignatureInvalid);
  }

  let payload = validate_payload_at(Data::Bytes(&parts.message), &options.for_decoding(), now)?;
  Ok(DecodedToken::new(payload, &parts.footer))
}
