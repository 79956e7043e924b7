//! PASETO version 4: `v4.local` tokens (XChaCha20 + BLAKE2b-MAC) and
//! `v4.public` tokens (Ed25519).

pub mod key;
pub mod local;
pub mod public;
pub mod token;

use crate::claims::{Claims, FooterContent};

pub use self::key::{
  generate_key_pair, generate_keys, generate_local_key, parse_key, parse_key_for, GeneratedKeys, KeyData, KeyFormat,
  KeyOutput,
};
pub use self::local::{decrypt, encrypt};
pub use self::public::{sign, verify};
pub use self::token::{split_local_token, split_public_token, LocalTokenParts, PublicTokenParts};

/// What a successfully decrypted or verified token carries.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedToken {
  /// The validated payload.
  pub payload: Claims,
  /// The footer, if the token had one.
  pub footer: Option<FooterContent>,
}

impl DecodedToken {
  pub(crate) fn new(payload: Claims, footer: &[u8]) -> Self {
    DecodedToken {
      payload,
      footer: if footer.is_empty() {
        None
      } else {
        Some(FooterContent::from_bytes(footer))
      },
    }
  }
}
