//! Splitting version 4 tokens into their decoded framing.
//!
//! A token is `v4.<purpose>.<base64url body>` with an optional
//! `.<base64url footer>` on the end. Nothing here checks a tag or signature,
//! the pieces are only taken apart so the codecs can check them.

use crate::errors::PasetoError;
use crate::magic::{token_magic_bytes, TokenPurpose, Version};
use crate::primitives::sign::SIGNATURE_BYTES;

use base64::{decode_config, URL_SAFE_NO_PAD};
use tracing::debug;

/// Length of the random nonce at the front of a local token body.
pub const NONCE_BYTES: usize = 32;
/// Length of the authentication tag at the back of a local token body.
pub const TAG_BYTES: usize = 32;

/// The decoded pieces of a `v4.local` token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalTokenParts {
  pub nonce: Vec<u8>,
  pub ciphertext: Vec<u8>,
  pub tag: Vec<u8>,
  /// Empty when the token has no footer.
  pub footer: Vec<u8>,
}

/// The decoded pieces of a `v4.public` token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicTokenParts {
  pub message: Vec<u8>,
  pub signature: Vec<u8>,
  /// Empty when the token has no footer.
  pub footer: Vec<u8>,
}

fn token_error(reason: &str) -> PasetoError {
  debug!(reason, "rejected token");
  PasetoError::TokenInvalid(String::from(reason))
}

/// Checks the header and decodes the body and footer segments.
fn split_token(token: &[u8], purpose: TokenPurpose) -> Result<(Vec<u8>, Vec<u8>), PasetoError> {
  if !token.starts_with(token_magic_bytes(Version::V4, purpose)) {
    return Err(token_error("Token does not have the expected version and purpose"));
  }

  let parts = token.split(|byte| *byte == b'.').collect::<Vec<_>>();
  if parts.len() != 3 && parts.len() != 4 {
    return Err(token_error("Token must have three or four parts"));
  }

  let body = decode_config(parts[2], URL_SAFE_NO_PAD)?;
  let footer = match parts.get(3) {
    Some(encoded) if encoded.is_empty() => return Err(token_error("Token footer must not be empty when present")),
    Some(encoded) => decode_config(encoded, URL_SAFE_NO_PAD)?,
    None => Vec::new(),
  };

  Ok((body, footer))
}

/// Splits a `v4.local` token into nonce, ciphertext, tag and footer.
pub fn split_local_token<T: AsRef<[u8]>>(token: T) -> Result<LocalTokenParts, PasetoError> {
  let (mut body, footer) = split_token(token.as_ref(), TokenPurpose::Local)?;
  if body.len() < NONCE_BYTES + TAG_BYTES {
    return Err(token_error("Token payload is too short"));
  }

  let tag = body.split_off(body.len() - TAG_BYTES);
  let ciphertext = body.split_off(NONCE_BYTES);
  Ok(LocalTokenParts {
    nonce: body,
    ciphertext,
    tag,
    footer,
  })
}

/// Splits a `v4.public` token into message, signature and footer.
pub fn split_public_token<T: AsRef<[u8]>>(token: T) -> Result<PublicTokenParts, PasetoError> {
  let (mut message, footer) = split_token(token.as_ref(), TokenPurpose::Public)?;
  if message.len() < SIGNATURE_BYTES {
    return Err(token_error("Token payload is too short"));
  }

  let signature = message.split_off(message.len() - SIGNATURE_BYTES);
  Ok(PublicTokenParts {
    message,
    signature,
    footer,
  })
}
