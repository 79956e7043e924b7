use thiserror::Error;

/// Every failure surfaced by this crate. Nothing is recovered internally, the
/// first failed check is returned to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasetoError {
  #[error("Unsupported PASETO version: {0}")]
  NotSupported(String),
  #[error("Invalid purpose: {0}")]
  PurposeInvalid(String),
  #[error("Invalid key format: {0}")]
  FormatInvalid(String),
  #[error("Invalid key: {0}")]
  KeyInvalid(String),
  #[error("Invalid token: {0}")]
  TokenInvalid(String),
  #[error("Invalid payload: {0}")]
  PayloadInvalid(String),
  #[error("Invalid claim: {0}")]
  ClaimInvalid(String),
  #[error("Invalid footer: {0}")]
  FooterInvalid(String),
  /// Deliberately carries no detail, a bad tag and a bad ciphertext look the same.
  #[error("Decryption failed")]
  DecryptionFailed,
  #[error("Invalid token signature")]
  SignatureInvalid,
  #[error("Invalid time: {0}")]
  InvalidTime(String),
  #[error("Type error: {0}")]
  TypeError(String),
  #[error("Failed to generate enough random bytes.")]
  RandomError,
  #[error("Cryptographic primitive failed: {0}")]
  CryptoError(String),
}

impl PasetoError {
  /// A stable machine readable code for this kind of error.
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      PasetoError::NotSupported(_) => "ERR_PASETO_NOT_SUPPORTED",
      PasetoError::PurposeInvalid(_) => "ERR_PASETO_PURPOSE_INVALID",
      PasetoError::FormatInvalid(_) => "ERR_PASETO_FORMAT_INVALID",
      PasetoError::KeyInvalid(_) => "ERR_PASETO_KEY_INVALID",
      PasetoError::TokenInvalid(_) => "ERR_PASETO_TOKEN_INVALID",
      PasetoError::PayloadInvalid(_) => "ERR_PASETO_PAYLOAD_INVALID",
      PasetoError::ClaimInvalid(_) => "ERR_PASETO_CLAIM_INVALID",
      PasetoError::FooterInvalid(_) => "ERR_PASETO_FOOTER_INVALID",
      PasetoError::DecryptionFailed => "ERR_PASETO_DECRYPTION_FAILED",
      PasetoError::SignatureInvalid => "ERR_PASETO_SIGNATURE_INVALID",
      PasetoError::InvalidTime(_) => "ERR_PASETO_INVALID_TIME",
      PasetoError::TypeError(_) => "ERR_PASETO_TYPE_ERROR",
      PasetoError::RandomError => "ERR_PASETO_RANDOM",
      PasetoError::CryptoError(_) => "ERR_PASETO_CRYPTO",
    }
  }
}

impl From<base64::DecodeError> for PasetoError {
  fn from(err: base64::DecodeError) -> Self {
    PasetoError::TokenInvalid(format!("Base64 decoding failed: {}", err))
  }
}

pub type Result<T> = std::result::Result<T, PasetoError>;
