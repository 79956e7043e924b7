use crate::errors::PasetoError;

use ring::signature::{Ed25519KeyPair, KeyPair, UnparsedPublicKey, ED25519};

/// Length of every Ed25519 signature.
pub const SIGNATURE_BYTES: usize = 64;

/// Signs `msg` with a 64 byte Ed25519 secret key (32 byte seed followed by
/// the 32 byte public key). The public half must belong to the seed.
pub fn ed25519_sign(msg: &[u8], secret_key: &[u8]) -> Result<[u8; SIGNATURE_BYTES], PasetoError> {
  if secret_key.len() != 64 {
    return Err(PasetoError::KeyInvalid(format!(
      "Ed25519 secret keys are 64 bytes, got {}",
      secret_key.len()
    )));
  }
  let (seed, public_key) = secret_key.split_at(32);
  let key_pair = Ed25519KeyPair::from_seed_and_public_key(seed, public_key)
    .map_err(|err| PasetoError::KeyInvalid(format!("Rejected Ed25519 key pair: {}", err)))?;

  let mut signature = [0_u8; SIGNATURE_BYTES];
  signature.copy_from_slice(key_pair.sign(msg).as_ref());
  Ok(signature)
}

/// Returns true only if `signature` is a valid signature of `msg` by `public_key`.
#[must_use]
pub fn ed25519_verify(signature: &[u8], msg: &[u8], public_key: &[u8]) -> bool {
  UnparsedPublicKey::new(&ED25519, public_key).verify(msg, signature).is_ok()
}

/// Derives the 64 byte secret key and 32 byte public key for a 32 byte seed.
pub fn ed25519_key_pair_from_seed(seed: &[u8; 32]) -> Result<(Vec<u8>, Vec<u8>), PasetoError> {
  let key_pair = Ed25519KeyPair::from_seed_unchecked(seed)
    .map_err(|err| PasetoError::CryptoError(format!("Failed to derive Ed25519 key pair: {}", err)))?;
  let public_key = key_pair.public_key().as_ref().to_vec();

  let mut secret_key = Vec::with_capacity(64);
  secret_key.extend_from_slice(seed);
  secret_key.extend_from_slice(&public_key);

  Ok((secret_key, public_key))
}
