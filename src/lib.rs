//! PASETO version 4 tokens.
//!
//! `v4.local` tokens are encrypted and authenticated with a shared key,
//! `v4.public` tokens are signed with an Ed25519 key. Payloads are JSON
//! objects whose registered claims (`iss`, `sub`, `aud`, `iat`, `exp`, `nbf`,
//! `jti`) are validated whenever a token is made or read.
//!
//! ```no_run
//! use paseto_v4::{decrypt, encrypt, generate_local_key, KeyFormat, Options};
//!
//! let key = generate_local_key(KeyFormat::Paserk).expect("Failed to generate key!");
//! let token = encrypt(&key, r#"{"sub":"johndoe"}"#, None, None, &Options::default())
//!   .expect("Failed to encrypt token!");
//! let decoded = decrypt(&key, &token, None, &Options::default()).expect("Failed to decrypt token!");
//! assert_eq!(Some("johndoe"), decoded.payload.get("sub").and_then(|sub| sub.as_str()));
//! ```

pub mod claims;
pub mod errors;
pub mod magic;
pub mod options;
pub mod pae;

#[cfg(feature = "v4")]
pub mod primitives;
#[cfg(feature = "v4")]
pub mod tokens;
#[cfg(feature = "v4")]
pub mod v4;

pub use self::claims::{Claims, Data, FooterContent};
pub use self::errors::PasetoError;
pub use self::magic::{Purpose, Version};
pub use self::options::Options;
#[cfg(feature = "v4")]
pub use self::tokens::*;
#[cfg(feature = "v4")]
pub use self::v4::{
  decrypt, encrypt, generate_key_pair, generate_keys, generate_local_key, parse_key, sign, verify, DecodedToken,
  GeneratedKeys, KeyData, KeyFormat, KeyOutput,
};
