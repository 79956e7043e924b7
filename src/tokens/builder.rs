use crate::claims::time::to_iso_string;
use crate::claims::{Claims, Data};
use crate::errors::PasetoError;
use crate::magic::TokenPurpose;
use crate::options::Options;
use crate::v4::key::KeyData;
use crate::v4::{encrypt, sign};

use chrono::prelude::*;
use serde_json::{json, Value};

/// A paseto builder.
///
/// Claims are kept in the order they are set, and are validated exactly like
/// any other payload when the token is built.
#[derive(Clone, Debug, Default)]
pub struct PasetoBuilder<'a> {
  /// The key to use, and whether it encrypts (`Local`) or signs (`Public`).
  key: Option<(TokenPurpose, KeyData<'a>)>,
  /// Set the footer to use for this token.
  footer: Option<String>,
  /// Authenticated with the token, but never part of it.
  assertion: Option<String>,
  options: Options,
  claims: Claims,
}

impl<'a> PasetoBuilder<'a> {
  /// Creates a new Paseto builder.
  #[must_use]
  pub fn new() -> PasetoBuilder<'a> {
    PasetoBuilder::default()
  }

  /// Builds a token.
  pub fn build(&self) -> Result<String, PasetoError> {
    let footer = self.footer.as_deref().map(Data::Text);
    let assertion = self.assertion.as_deref().map(Data::Text);

    match self.key {
      Some((TokenPurpose::Local, key)) => encrypt(key, &self.claims, footer, assertion, &self.options),
      Some((TokenPurpose::Public, key)) => sign(key, &self.claims, footer, assertion, &self.options),
      None => Err(PasetoError::KeyInvalid(String::from("No key was provided to the builder"))),
    }
  }

  /// Sets a `k4.local` key to use for the paseto token.
  ///
  /// NOTE: If you set this we _*will*_ use a local token. Setting a secret key
  /// afterwards replaces it.
  pub fn set_local_key<K: Into<KeyData<'a>>>(mut self, key: K) -> Self {
    self.key = Some((TokenPurpose::Local, key.into()));
    self
  }

  /// Sets a `k4.secret` key to sign a public token with.
  ///
  /// NOTE: Setting a local key afterwards replaces it.
  pub fn set_secret_key<K: Into<KeyData<'a>>>(mut self, key: K) -> Self {
    self.key = Some((TokenPurpose::Public, key.into()));
    self
  }

  /// Sets the footer to use for this token.
  pub fn set_footer(mut self, footer: String) -> Self {
    self.footer = Some(footer);
    self
  }

  /// Sets an implicit assertion the token is bound to.
  pub fn set_assertion(mut self, assertion: String) -> Self {
    self.assertion = Some(assertion);
    self
  }

  pub fn set_options(mut self, options: Options) -> Self {
    self.options = options;
    self
  }

  /// Sets an arbitrary claim (a key inside the json token).
  pub fn set_claim(mut self, key: String, value: Value) -> Self {
    self.claims.insert(key, value);
    self
  }

  /// Sets the audience for this token.
  pub fn set_audience(self, audience: String) -> Self {
    self.set_claim(String::from("aud"), json!(audience))
  }

  /// Sets the expiration date for this token.
  pub fn set_expiration(self, expiration: DateTime<Utc>) -> Self {
    self.set_claim(String::from("exp"), json!(to_iso_string(&expiration)))
  }

  /// Sets the time this token was issued at.
  ///
  /// issued_at defaults to: Utc::now();
  pub fn set_issued_at(self, issued_at: Option<DateTime<Utc>>) -> Self {
    let issued_at = issued_at.unwrap_or_else(Utc::now);
    self.set_claim(String::from("iat"), json!(to_iso_string(&issued_at)))
  }

  /// Sets the issuer for this token.
  pub fn set_issuer(self, issuer: String) -> Self {
    self.set_claim(String::from("iss"), json!(issuer))
  }

  /// Sets the JTI ID for this token.
  pub fn set_jti(self, id: String) -> Self {
    self.set_claim(String::from("jti"), json!(id))
  }

  /// Sets the not before time.
  pub fn set_not_before(self, not_before: DateTime<Utc>) -> Self {
    self.set_claim(String::from("nbf"), json!(to_iso_string(&not_before)))
  }

  /// Sets the subject for this token.
  pub fn set_subject(self, subject: String) -> Self {
    self.set_claim(String::from("sub"), json!(subject))
  }
}
