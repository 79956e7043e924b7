//! An Implementation of Paseto V4 "local" tokens (or tokens that are encrypted with a shared secret).

use crate::claims::{optional_assertion, optional_footer, validate_footer, validate_payload_at, Data};
use crate::errors::PasetoError;
use crate::magic::{token_magic_bytes, token_magic_string, Purpose, TokenPurpose, Version};
use crate::options::Options;
use crate::pae::pae;
use crate::primitives::hash::keyed_hash;
use crate::primitives::stream::xchacha20_xor;
use crate::primitives::{constant_time_eq, random_bytes};
use crate::v4::key::{parse_key, KeyData};
use crate::v4::token::{split_local_token, NONCE_BYTES, TAG_BYTES};
use crate::v4::DecodedToken;

use base64::{encode_config, URL_SAFE_NO_PAD};
use chrono::prelude::*;
use std::convert::TryInto;
use tracing::debug;

const ENCRYPTION_KEY_DOMAIN: &[u8] = b"paseto-encryption-key";
const AUTH_KEY_DOMAIN: &[u8] = b"paseto-auth-key-for-aead";

/// The per token subkeys derived from the shared key and the nonce.
struct DerivedKeys {
  encryption_key: [u8; 32],
  counter_nonce: [u8; 24],
  auth_key: Vec<u8>,
}

fn derive_keys(key: &[u8], nonce: &[u8]) -> Result<DerivedKeys, PasetoError> {
  let mut to_hash = Vec::with_capacity(ENCRYPTION_KEY_DOMAIN.len() + nonce.len());
  to_hash.extend_from_slice(ENCRYPTION_KEY_DOMAIN);
  to_hash.extend_from_slice(nonce);
  let tmp = keyed_hash(&to_hash, key, 56)?;

  let mut to_hash = Vec::with_capacity(AUTH_KEY_DOMAIN.len() + nonce.len());
  to_hash.extend_from_slice(AUTH_KEY_DOMAIN);
  to_hash.extend_from_slice(nonce);
  let auth_key = keyed_hash(&to_hash, key, 32)?;

  let (encryption_key, counter_nonce) = tmp.split_at(32);
  Ok(DerivedKeys {
    encryption_key: encryption_key
      .try_into()
      .map_err(|_| PasetoError::CryptoError(String::from("Derived encryption key has the wrong length")))?,
    counter_nonce: counter_nonce
      .try_into()
      .map_err(|_| PasetoError::CryptoError(String::from("Derived nonce has the wrong length")))?,
    auth_key,
  })
}

/// Encrypt a "v4.local" paseto token.
///
/// `key` must be a `k4.local` key. The payload is validated (and `iat`/`exp`
/// added as `options` say) before it is encrypted. A footer is stored in
/// the clear but authenticated, an assertion is authenticated but never
/// stored.
pub fn encrypt<'a, 'p, K, P>(
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
  let nonce = random_bytes::<NONCE_BYTES>()?;
  underlying_encrypt(key.into(), payload.into(), footer, assertion, options, &nonce, Utc::now())
}

/// Performs the underlying encryption of a paseto token. Split for unit testing.
fn underlying_encrypt(
  key: KeyData<'_>,
  payload: Data<'_>,
  footer: Option<Data<'_>>,
  assertion: Option<Data<'_>>,
  options: &Options,
  nonce: &[u8; NONCE_BYTES],
  now: DateTime<Utc>,
) -> Result<String, PasetoError> {
  let key = parse_key(Purpose::Local, key)?;
  let claims = validate_payload_at(payload, options, now)?;
  let message = serde_json::to_vec(&claims).map_err(|err| PasetoError::PayloadInvalid(err.to_string()))?;
  let footer = optional_footer(footer, options)?;
  let assertion = optional_assertion(assertion)?;

  let keys = derive_keys(&key, nonce)?;
  let ciphertext = xchacha20_xor(&keys.encryption_key, &keys.counter_nonce, &message);

  let header = token_magic_bytes(Version::V4, TokenPurpose::Local);
  let pre_auth = pae(&[header, nonce, &ciphertext, &footer, &assertion]);
  let tag = keyed_hash(&pre_auth, &keys.auth_key, TAG_BYTES)?;

  let mut body = Vec::with_capacity(NONCE_BYTES + ciphertext.len() + TAG_BYTES);
  body.extend_from_slice(nonce);
  body.extend_from_slice(&ciphertext);
  body.extend_from_slice(&tag);

  let header = token_magic_string(Version::V4, TokenPurpose::Local);
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

/// Decrypt a "v4.local" paseto token.
///
/// The tag is checked before anything is decrypted, and the payload claims
/// are validated afterwards unless `options.validate` is off. Decryption never
/// adds claims. The assertion must match the one the token was made with.
pub fn decrypt<'a, K, T>(
  key: K,
  token: T,
  assertion: Option<Data<'_>>,
  options: &Options,
) -> Result<DecodedToken, PasetoError>
where
  K: Into<KeyData<'a>>,
  T: AsRef<[u8]>,
{
  underlying_decrypt(key.into(), token.as_ref(), assertion, options, Utc::now())
}

fn underlying_decrypt(
  key: KeyData<'_>,
  token: &[u8],
  assertion: Option<Data<'_>>,
  options: &Options,
  now: DateTime<Utc>,
) -> Result<DecodedToken, PasetoError> {
  let key = parse_key(Purpose::Local, key)?;
  let parts = split_local_token(token)?;
  if !parts.footer.is_empty() {
    validate_footer(Data::Bytes(&parts.footer), options)?;
  }
  let assertion = optional_assertion(assertion)?;

  let keys = derive_keys(&key, &parts.nonce)?;
  let header = token_magic_bytes(Version::V4, TokenPurpose::Local);
  let pre_auth = pae(&[header, &parts.nonce, &parts.ciphertext, &parts.footer, &assertion]);
  let expected_tag = keyed_hash(&pre_auth, &keys.auth_key, TAG_BYTES)?;

  if !constant_time_eq(&expected_tag, &parts.tag) {
    debug!("v4.local token failed authentication");
    return Err(PasetoError::DecryptionFailed);
  }

  let message = xchacha20_xor(&keys.encryption_key, &keys.counter_nonce, &parts.ciphertext);
  let payload = validate_payload_at(Data::Bytes(&message), &options.for_decoding(), now)?;

  Ok(DecodedToken::new(payload, &parts.footer))
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  use crate::claims::time::parse_iso_date;
  use crate::claims::FooterContent;
  use serde_json::json;

  const LOCAL_KEY: &str = "k4.local.TTcJUvQkRlymND41zGOLoykZNhoIKk1jtr82bTl9EHA";
  const OTHER_KEY: &str = "k4.local.xqT1zDwAZcNCTd5Ee1B0Wpcjx-xpjbe5oNsFQfEEf-M";
  const MESSAGE: &str = r#"{"sub":"johndoe","iat":"2023-01-09T15:34:46.865Z"}"#;

  fn no_exp() -> Options {
    Options::new().with_add_exp(false)
  }

  // Key 0x70..=0x8f, shared by the known answer tokens below.
  const VECTOR_KEY: &str = "k4.local.cHFyc3R1dnd4eXp7fH1-f4CBgoOEhYaHiImKi4yNjo8";
  const VECTOR_PAYLOAD: &str = r#"{"data":"this is a secret message","exp":"2022-01-01T00:00:00+00:00"}"#;

  // The vector payload expired long ago, so claims are left alone.
  fn as_is() -> Options {
    Options::new().with_validate(false).with_add_iat(false).with_add_exp(false)
  }

  fn vector_now() -> DateTime<Utc> {
    parse_iso_date("2021-12-31T00:00:00Z").expect("Failed to parse time!")
  }

  #[test]
  fn encrypts_into_three_parts() {
    let token = encrypt(LOCAL_KEY, MESSAGE, None, None, &no_exp()).expect("Failed to encrypt token!");
    let parts = token.split('.').collect::<Vec<_>>();
    assert_eq!(3, parts.len());
    assert_eq!("v4", parts[0]);
    assert_eq!("local", parts[1]);
  }

  #[test]
  fn round_trips_payload_and_footer() {
    let footer = json!({"kid": "key-1"});
    let token = encrypt(
      LOCAL_KEY,
      MESSAGE,
      Some(Data::Value(&footer)),
      Some(Data::Text("bound to this request")),
      &Options::default(),
    )
    .expect("Failed to encrypt token!");
    assert_eq!(4, token.split('.').count());

    let decoded = decrypt(LOCAL_KEY, &token, Some(Data::Text("bound to this request")), &Options::default())
      .expect("Failed to decrypt token!");
    assert_eq!(Some(&json!("johndoe")), decoded.payload.get("sub"));
    assert_eq!(Some(&json!("2023-01-09T15:34:46.865Z")), decoded.payload.get("iat"));
    assert!(decoded.payload.get("exp").is_some());
    assert_eq!(Some(FooterContent::Json(footer)), decoded.footer);
  }

  #[test]
  fn fixed_nonce_is_deterministic() {
    let now = parse_iso_date("2023-01-09T15:34:46.865Z").expect("Failed to parse time!");
    let first = underlying_encrypt(LOCAL_KEY.into(), MESSAGE.into(), None, None, &no_exp(), &[0; 32], now)
      .expect("Failed to encrypt token!");
    let second = underlying_encrypt(LOCAL_KEY.into(), MESSAGE.into(), None, None, &no_exp(), &[0; 32], now)
      .expect("Failed to encrypt token!");
    assert_eq!(first, second);
    // 32 byte nonce, 51 byte payload, 32 byte tag.
    let parts = split_local_token(&first).expect("Failed to split token!");
    assert_eq!(vec![0; 32], parts.nonce);
    assert_eq!(MESSAGE.len(), parts.ciphertext.len());
  }

  #[test]
  fn random_nonces_give_distinct_tokens() {
    let first = encrypt(LOCAL_KEY, MESSAGE, None, None, &no_exp()).expect("Failed to encrypt token!");
    let second = encrypt(LOCAL_KEY, MESSAGE, None, None, &no_exp()).expect("Failed to encrypt token!");
    assert_ne!(first, second);
  }

  #[test]
  fn text_footers_come_back_as_text() {
    let token = encrypt(LOCAL_KEY, MESSAGE, Some(Data::Text("plain footer")), None, &no_exp())
      .expect("Failed to encrypt token!");
    let decoded = decrypt(LOCAL_KEY, token.as_bytes(), None, &Options::default()).expect("Failed to decrypt token!");
    assert_eq!(Some(FooterContent::Text(String::from("plain footer"))), decoded.footer);
  }

  #[test]
  fn every_flipped_bit_in_the_body_is_caught() {
    let token = encrypt(LOCAL_KEY, MESSAGE, None, None, &no_exp()).expect("Failed to encrypt token!");
    let parts = split_local_token(&token).expect("Failed to split token!");
    let mut body = parts.nonce.clone();
    body.extend_from_slice(&parts.ciphertext);
    body.extend_from_slice(&parts.tag);

    for idx in 0..body.len() {
      let mut tampered = body.clone();
      tampered[idx] ^= 1;
      let tampered = format!("v4.local.{}", encode_config(&tampered, URL_SAFE_NO_PAD));
      assert_eq!(
        Err(PasetoError::DecryptionFailed),
        decrypt(LOCAL_KEY, &tampered, None, &Options::default()),
        "byte {}",
        idx
      );
    }
  }

  #[test]
  fn wrong_key_footer_or_assertion_fails() {
    let token = encrypt(LOCAL_KEY, MESSAGE, Some(Data::Text("footer")), Some(Data::Text("a")), &no_exp())
      .expect("Failed to encrypt token!");
    let options = Options::default();

    assert_eq!(
      Err(PasetoError::DecryptionFailed),
      decrypt(OTHER_KEY, &token, Some(Data::Text("a")), &options)
    );
    assert_eq!(
      Err(PasetoError::DecryptionFailed),
      decrypt(LOCAL_KEY, &token, Some(Data::Text("b")), &options)
    );
    assert_eq!(Err(PasetoError::DecryptionFailed), decrypt(LOCAL_KEY, &token, None, &options));

    let swapped_footer = format!(
      "{}.{}",
      token.rsplitn(2, '.').nth(1).expect("Failed to strip footer!"),
      encode_config(b"other", URL_SAFE_NO_PAD)
    );
    assert_eq!(
      Err(PasetoError::DecryptionFailed),
      decrypt(LOCAL_KEY, &swapped_footer, Some(Data::Text("a")), &options)
    );
  }

  #[test]
  fn rejects_public_keys_and_tokens() {
    let public = "k4.public.-0I7SWH6aqly35b_DmvNoGpyc4nKBccILXI3XOYzAmA";
    assert!(matches!(
      encrypt(public, MESSAGE, None, None, &no_exp()),
      Err(PasetoError::KeyInvalid(_))
    ));
    let token = encrypt(LOCAL_KEY, MESSAGE, None, None, &no_exp()).expect("Failed to encrypt token!");
    let as_public = token.replacen("v4.local.", "v4.public.", 1);
    assert!(matches!(
      decrypt(LOCAL_KEY, &as_public, None, &Options::default()),
      Err(PasetoError::TokenInvalid(_))
    ));
  }

  #[test]
  fn expired_payloads_are_rejected_after_authentication() {
    let issued = parse_iso_date("2023-01-09T15:34:46.865Z").expect("Failed to parse time!");
    let token = underlying_encrypt(LOCAL_KEY.into(), MESSAGE.into(), None, None, &Options::default(), &[1; 32], issued)
      .expect("Failed to encrypt token!");

    let within_the_hour = parse_iso_date("2023-01-09T16:00:00Z").expect("Failed to parse time!");
    assert!(underlying_decrypt(LOCAL_KEY.into(), token.as_bytes(), None, &Options::default(), within_the_hour).is_ok());

    let later = parse_iso_date("2023-01-09T17:00:00Z").expect("Failed to parse time!");
    assert!(matches!(
      underlying_decrypt(LOCAL_KEY.into(), token.as_bytes(), None, &Options::default(), later),
      Err(PasetoError::ClaimInvalid(_))
    ));
    let unchecked = Options::new().with_validate(false);
    assert!(underlying_decrypt(LOCAL_KEY.into(), token.as_bytes(), None, &unchecked, later).is_ok());
  }

  #[test]
  fn rejects_invalid_payloads_before_encrypting() {
    assert!(matches!(
      encrypt(LOCAL_KEY, "[]", None, None, &Options::default()),
      Err(PasetoError::PayloadInvalid(_))
    ));
    assert!(matches!(
      encrypt(LOCAL_KEY, &json!({"exp": "bubbles"}), None, None, &Options::default()),
      Err(PasetoError::ClaimInvalid(_))
    ));
  }

  #[test]
  fn matches_known_token_with_zero_nonce() {
    let expected = "v4.local.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAQAr68PS4AXe7If_ZgesdkUMvSwscFlAl1pk5HC0e8kApeaqMfGo_7OpBnwJOAbY9V7WU6abu74MmcUE8YWAiaArVI8XJ5hOb_4v9RmDkneN0S92dx0OW4pgy7omxgf3S8c3LlQg";
    let token = underlying_encrypt(
      VECTOR_KEY.into(),
      VECTOR_PAYLOAD.into(),
      None,
      None,
      &as_is(),
      &[0; 32],
      vector_now(),
    )
    .expect("Failed to encrypt token!");
    assert_eq!(expected, token);

    let decoded = decrypt(VECTOR_KEY, expected, None, &as_is()).expect("Failed to decrypt token!");
    assert_eq!(Some(&json!("this is a secret message")), decoded.payload.get("data"));
    assert_eq!(Some(&json!("2022-01-01T00:00:00+00:00")), decoded.payload.get("exp"));
    assert_eq!(None, decoded.footer);
  }

  #[test]
  fn matches_known_token_with_nonce_and_footer() {
    let expected = "v4.local.32VIErrEkmY4JVILovbmfPXKW9wT1OdQepjMTC_MOtjA4kiqw7_tcaOM5GNEcnTxl60WkwMsYXw6FSNb_UdJPXjpzm0KW9ojM5f4O2mRvE2IcweP-PRdoHjd5-RHCiExR1IK6t4x-RMNXtQNbz7FvFZ_G-lFpk5RG3EOrwDL6CgDqcerSQ.eyJraWQiOiJ6VmhNaVBCUDlmUmYyc25FY1Q3Z0ZUaW9lQTlDT2NOeTlEZmdMMVc2MGhhTiJ9";
    let footer = r#"{"kid":"zVhMiPBP9fRf2snEcT7gFTioeA9COcNy9DfgL1W60haN"}"#;
    let nonce: [u8; NONCE_BYTES] = hex::decode("df654812bac492663825520ba2f6e67cf5ca5bdc13d4e7507a98cc4c2fcc3ad8")
      .expect("Failed to decode nonce!")
      .try_into()
      .expect("Failed to size nonce!");

    let token = underlying_encrypt(
      VECTOR_KEY.into(),
      VECTOR_PAYLOAD.into(),
      Some(Data::Text(footer)),
      None,
      &as_is(),
      &nonce,
      vector_now(),
    )
    .expect("Failed to encrypt token!");
    assert_eq!(expected, token);

    let decoded = decrypt(VECTOR_KEY, expected, None, &as_is()).expect("Failed to decrypt token!");
    assert_eq!(Some(&json!("this is a secret message")), decoded.payload.get("data"));
    assert_eq!(
      Some(FooterContent::Json(json!({"kid": "zVhMiPBP9fRf2snEcT7gFTioeA9COcNy9DfgL1W60haN"}))),
      decoded.footer
    );
    // Same token under the default options: the footer is fine, the payload has expired.
    assert!(matches!(
      decrypt(VECTOR_KEY, expected, None, &Options::default()),
      Err(PasetoError::ClaimInvalid(_))
    ));
  }
}
