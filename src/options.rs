//! Per call configuration for encoding and decoding tokens.

use crate::magic::{MAX_DEPTH_DEFAULT, MAX_KEYS_DEFAULT};

/// Options shared by every token operation.
///
/// | option      | default | effect                                              |
/// |-------------|---------|-----------------------------------------------------|
/// | `add_iat`   | `true`  | add `iat` set to now when absent (encoding only)    |
/// | `add_exp`   | `true`  | add `exp` set to now + 1 hour when absent (encoding only) |
/// | `max_depth` | `32`    | maximum JSON nesting depth, `0` disables the check  |
/// | `max_keys`  | `128`   | maximum JSON key count, `0` disables the check      |
/// | `validate`  | `true`  | validate the registered payload and footer claims   |
///
/// Decoding never adds claims, whatever `add_iat` and `add_exp` say.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
  pub add_iat: bool,
  pub add_exp: bool,
  pub max_depth: usize,
  pub max_keys: usize,
  pub validate: bool,
}

impl Default for Options {
  fn default() -> Self {
    Options {
      add_iat: true,
      add_exp: true,
      max_depth: MAX_DEPTH_DEFAULT,
      max_keys: MAX_KEYS_DEFAULT,
      validate: true,
    }
  }
}

impl Options {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_add_iat(mut self, add_iat: bool) -> Self {
    self.add_iat = add_iat;
    self
  }

  #[must_use]
  pub fn with_add_exp(mut self, add_exp: bool) -> Self {
    self.add_exp = add_exp;
    self
  }

  #[must_use]
  pub fn with_max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = max_depth;
    self
  }

  #[must_use]
  pub fn with_max_keys(mut self, max_keys: usize) -> Self {
    self.max_keys = max_keys;
    self
  }

  #[must_use]
  pub fn with_validate(mut self, validate: bool) -> Self {
    self.validate = validate;
    self
  }

  /// The same options with claim auto-adding switched off, as used when
  /// decoding.
  #[must_use]
  pub(crate) fn for_decoding(self) -> Self {
    self.with_add_iat(false).with_add_exp(false)
  }
}
