//! Validation and normalization of token payloads, footers and assertions.
//!
//! This specifically validates the registered payload claims:
//!   * `iss`, `sub`, `aud` and `jti` are strings
//!   * `iat` is a date that is not in the future
//!   * `exp` is a time after `iat` that has not passed yet
//!   * `nbf` is a time no earlier than `iat` that has already been reached
//!
//! and the registered footer claims `kid` and `wpk`, which must be strings.
//! Any other claim is passed through untouched.

pub mod json;
pub mod time;

use self::json::{assert_json_size, looks_like_object};
use self::time::{is_iso_date, parse_iso_date, parse_time, to_iso_string};
use crate::errors::PasetoError;
use crate::options::Options;

use chrono::prelude::*;
use chrono::{Duration, SubsecRound};
use serde_json::{Map, Value as JsonValue};

pub use self::json::FooterContent;
pub use self::validate_footer as parse_footer;

/// A normalized payload: a JSON object with its keys in insertion order.
pub type Claims = Map<String, JsonValue>;

/// How long an automatically added `exp` claim is valid for.
const DEFAULT_EXPIRY_MS: i64 = 3_600_000;

/// Something that can become a payload, footer or assertion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Data<'a> {
  /// An already structured JSON object.
  Object(&'a Claims),
  /// Any JSON value. Only objects are accepted.
  Value(&'a JsonValue),
  /// UTF-8 text, usually JSON.
  Text(&'a str),
  /// Raw bytes, usually UTF-8 encoded JSON.
  Bytes(&'a [u8]),
}

impl<'a> From<&'a Claims> for Data<'a> {
  fn from(claims: &'a Claims) -> Self {
    Data::Object(claims)
  }
}

impl<'a> From<&'a JsonValue> for Data<'a> {
  fn from(value: &'a JsonValue) -> Self {
    Data::Value(value)
  }
}

impl<'a> From<&'a str> for Data<'a> {
  fn from(text: &'a str) -> Self {
    Data::Text(text)
  }
}

impl<'a> From<&'a String> for Data<'a> {
  fn from(text: &'a String) -> Self {
    Data::Text(text.as_str())
  }
}

impl<'a> From<&'a [u8]> for Data<'a> {
  fn from(bytes: &'a [u8]) -> Self {
    Data::Bytes(bytes)
  }
}

impl<'a> From<&'a Vec<u8>> for Data<'a> {
  fn from(bytes: &'a Vec<u8>) -> Self {
    Data::Bytes(bytes.as_slice())
  }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Data<'a> {
  fn from(bytes: &'a [u8; N]) -> Self {
    Data::Bytes(&bytes[..])
  }
}

impl<'a> Data<'a> {
  fn is_empty(&self) -> bool {
    match self {
      Data::Text(text) => text.is_empty(),
      Data::Bytes(bytes) => bytes.is_empty(),
      Data::Object(_) | Data::Value(_) => false,
    }
  }
}

fn claim_error(claim: &str, reason: &str) -> PasetoError {
  PasetoError::ClaimInvalid(format!("Payload must have a valid \"{}\" claim ({})", claim, reason))
}

fn assert_string_claim(claims: &Claims, claim: &str) -> Result<(), PasetoError> {
  match claims.get(claim) {
    Some(JsonValue::String(_)) | None => Ok(()),
    Some(_) => Err(claim_error(claim, "is not a string")),
  }
}

/// Turns payload input into a JSON object without looking at any claims.
fn payload_to_claims(input: Data<'_>, options: &Options) -> Result<Claims, PasetoError> {
  let text = match input {
    Data::Object(claims) => return Ok(claims.clone()),
    Data::Value(JsonValue::Object(claims)) => return Ok(claims.clone()),
    Data::Value(_) => {
      return Err(PasetoError::PayloadInvalid(String::from(
        "Payload must be valid JSON (is not an object)",
      )))
    }
    Data::Text(text) => text,
    Data::Bytes(bytes) => std::str::from_utf8(bytes)
      .map_err(|_| PasetoError::PayloadInvalid(String::from("Payload must be valid UTF-8")))?,
  };

  // The topmost value must be an object, never a list.
  if text.starts_with('[') {
    return Err(PasetoError::PayloadInvalid(String::from(
      "Payload must be valid JSON (is an array)",
    )));
  }
  assert_json_size(text, options.max_depth, options.max_keys)?;

  match serde_json::from_str::<JsonValue>(text) {
    Ok(JsonValue::Object(claims)) => Ok(claims),
    Ok(_) => Err(PasetoError::PayloadInvalid(String::from(
      "Payload must be valid JSON (is not an object)",
    ))),
    Err(_) => Err(PasetoError::PayloadInvalid(String::from("Payload must be valid JSON"))),
  }
}

/// Parses and validates a payload against the registered claims, using the
/// current time.
pub fn validate_payload(input: Data<'_>, options: &Options) -> Result<Claims, PasetoError> {
  validate_payload_at(input, options, Utc::now())
}

/// Parses and validates a payload against the registered claims as of `now`.
///
/// The claims are checked in a fixed order and the first failure wins: `iss`,
/// `sub`, `aud`, `iat`, `exp`, `nbf`, then `jti`. `exp` and `nbf` are compared
/// against `iat`, so `iat` is always known good by the time they are looked at.
/// Times given as epoch milliseconds or relative expressions are rewritten as
/// ISO strings.
pub fn validate_payload_at(input: Data<'_>, options: &Options, now: DateTime<Utc>) -> Result<Claims, PasetoError> {
  // Claims are stored with millisecond precision, so compare at that precision too.
  let now = now.trunc_subsecs(3);
  let mut claims = payload_to_claims(input, options)?;
  let validate = options.validate;

  if validate {
    assert_string_claim(&claims, "iss")?;
    assert_string_claim(&claims, "sub")?;
    assert_string_claim(&claims, "aud")?;
  }

  let mut issued_at = None;
  match claims.get("iat") {
    Some(iat) if validate => {
      // Relative times make no sense for issuance, only dates are accepted.
      let parsed = iat
        .as_str()
        .and_then(parse_iso_date)
        .ok_or_else(|| claim_error("iat", "is not an ISO date"))?;
      if parsed > now {
        return Err(claim_error("iat", "is in the future"));
      }
      issued_at = Some(parsed);
    }
    Some(_) => {}
    None if options.add_iat => {
      claims.insert(String::from("iat"), JsonValue::String(to_iso_string(&now)));
      issued_at = Some(now);
    }
    None => {}
  }

  match claims.get("exp") {
    Some(exp) if validate => {
      let parsed = parse_time(exp, &now)
        .map_err(|_| claim_error("exp", "is not a date or a valid relative time string (e.g. \"1 hour\")"))?;
      if issued_at.map_or(false, |iat| parsed <= iat) {
        return Err(claim_error("exp", "is not greater than \"iat\""));
      }
      if parsed <= now {
        return Err(claim_error("exp", "has expired"));
      }
      if !exp.as_str().map_or(false, is_iso_date) {
        claims.insert(String::from("exp"), JsonValue::String(to_iso_string(&parsed)));
      }
    }
    Some(_) => {}
    None if options.add_exp => {
      let expires = now + Duration::milliseconds(DEFAULT_EXPIRY_MS);
      claims.insert(String::from("exp"), JsonValue::String(to_iso_string(&expires)));
    }
    None => {}
  }

  if let Some(nbf) = claims.get("nbf").filter(|_| validate) {
    let parsed = parse_time(nbf, &now)
      .map_err(|_| claim_error("nbf", "is not a date or a valid relative time string (e.g. \"1 hour\")"))?;
    // Equal to "iat" is fine, only strictly earlier is rejected.
    if issued_at.map_or(false, |iat| parsed < iat) {
      return Err(claim_error("nbf", "is before \"iat\""));
    }
    if parsed > now {
      return Err(claim_error("nbf", "is in the future"));
    }
    if !nbf.as_str().map_or(false, is_iso_date) {
      claims.insert(String::from("nbf"), JsonValue::String(to_iso_string(&parsed)));
    }
  }

  if validate {
    assert_string_claim(&claims, "jti")?;
  }

  Ok(claims)
}

/// Checks the registered footer claims `kid` and `wpk`.
pub fn validate_footer_claims(footer: &Claims) -> Result<(), PasetoError> {
  for claim in ["kid", "wpk"].iter() {
    match footer.get(*claim) {
      Some(JsonValue::String(_)) | None => {}
      Some(_) => {
        return Err(PasetoError::ClaimInvalid(format!(
          "Footer must have a valid \"{}\" claim (is not a string)",
          claim
        )))
      }
    }
  }
  Ok(())
}

fn validate_footer_text(text: &str, options: &Options) -> Result<(), PasetoError> {
  if !options.validate || !looks_like_object(text) {
    return Ok(());
  }

  assert_json_size(text, options.max_depth, options.max_keys).map_err(|err| match err {
    PasetoError::PayloadInvalid(reason) => PasetoError::FooterInvalid(reason),
    other => other,
  })?;
  match serde_json::from_str::<JsonValue>(text) {
    Ok(JsonValue::Object(claims)) => validate_footer_claims(&claims),
    _ => Err(PasetoError::FooterInvalid(String::from("Footer must be valid JSON"))),
  }
}

/// Validates a footer and returns the bytes that go into the token.
///
/// Text and bytes that look like a JSON object are size checked, parsed and
/// have their `kid` and `wpk` claims checked. Anything else is carried as-is.
/// With validation disabled the footer is never inspected.
pub fn validate_footer(footer: Data<'_>, options: &Options) -> Result<Vec<u8>, PasetoError> {
  match footer {
    Data::Text(text) => {
      validate_footer_text(text, options)?;
      Ok(text.as_bytes().to_vec())
    }
    Data::Bytes(bytes) => {
      if let Ok(text) = std::str::from_utf8(bytes) {
        validate_footer_text(text, options)?;
      }
      Ok(bytes.to_vec())
    }
    Data::Object(claims) => {
      if options.validate {
        validate_footer_claims(claims)?;
      }
      Ok(serde_json::to_vec(claims).map_err(|err| PasetoError::FooterInvalid(err.to_string()))?)
    }
    Data::Value(JsonValue::Object(claims)) => validate_footer(Data::Object(claims), options),
    Data::Value(_) => Err(PasetoError::TypeError(String::from(
      "Footer must be a string, byte buffer, or object",
    ))),
  }
}

/// Turns an assertion into the bytes that are authenticated with the token.
pub fn parse_assertion(assertion: Data<'_>) -> Result<Vec<u8>, PasetoError> {
  match assertion {
    Data::Text(text) => Ok(text.as_bytes().to_vec()),
    Data::Bytes(bytes) => Ok(bytes.to_vec()),
    Data::Object(claims) => serde_json::to_vec(claims).map_err(|err| PasetoError::TypeError(err.to_string())),
    Data::Value(JsonValue::Object(claims)) => parse_assertion(Data::Object(claims)),
    Data::Value(_) => Err(PasetoError::TypeError(String::from(
      "Assertion must be a string, byte buffer, or object",
    ))),
  }
}

/// Normalizes an optional footer, an absent footer being empty.
pub(crate) fn optional_footer(footer: Option<Data<'_>>, options: &Options) -> Result<Vec<u8>, PasetoError> {
  match footer {
    Some(footer) if !footer.is_empty() => validate_footer(footer, options),
    _ => Ok(Vec::new()),
  }
}

/// Normalizes an optional assertion, an absent assertion being empty.
pub(crate) fn optional_assertion(assertion: Option<Data<'_>>) -> Result<Vec<u8>, PasetoError> {
  assertion.map_or_else(|| Ok(Vec::new()), parse_assertion)
}
