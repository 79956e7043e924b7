use chacha20::cipher::{NewCipher, StreamCipher};
use chacha20::{Key, XChaCha20, XNonce};

/// XORs `data` with the XChaCha20 keystream for `key` and `nonce`.
///
/// Encryption and decryption are the same operation, and the output is
/// always as long as the input.
#[must_use]
pub fn xchacha20_xor(key: &[u8; 32], nonce: &[u8; 24], data: &[u8]) -> Vec<u8> {
  let mut cipher = XChaCha20::new(&Key::from(*key), &XNonce::from(*nonce));
  let mut buffer = data.to_vec();
  cipher.apply_keystream(&mut buffer);
  buffer
}
