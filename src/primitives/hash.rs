use crate::errors::PasetoError;

use blake2::digest::{Update, VariableOutput};
use blake2::VarBlake2b;

/// Largest key and output length BLAKE2b accepts.
const BLAKE2B_MAX_BYTES: usize = 64;

/// Keyed BLAKE2b with a caller chosen output length.
///
/// `to_hash` -> the input data to hash.
/// `key_bytes` -> the key, at most 64 bytes.
/// `outlen` -> the length of output, between 1 and 64 bytes.
pub fn keyed_hash(to_hash: &[u8], key_bytes: &[u8], outlen: usize) -> Result<Vec<u8>, PasetoError> {
  if outlen == 0 || outlen > BLAKE2B_MAX_BYTES {
    return Err(PasetoError::CryptoError(format!("invalid BLAKE2b output size {}", outlen)));
  }
  if key_bytes.len() > BLAKE2B_MAX_BYTES {
    return Err(PasetoError::CryptoError(format!(
      "invalid BLAKE2b key size {}",
      key_bytes.len()
    )));
  }

  let mut state = VarBlake2b::new_keyed(key_bytes, outlen);
  state.update(to_hash);

  let mut out = Vec::with_capacity(outlen);
  state.finalize_variable(|res| out.extend_from_slice(res));

  Ok(out)
}
