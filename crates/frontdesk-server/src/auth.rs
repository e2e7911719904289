//! HTTP Basic authentication for the admin surface.
//!
//! A single operator account, configured as a username plus an argon2 PHC
//! hash. Handlers opt in by taking an [`Authenticated`] extractor argument;
//! public routes simply omit it.

use argon2::{Argon2, PasswordHash, PasswordVerifier as _};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{AppState, Notifier, Store, error::Error};

#[derive(Debug, Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// Argon2 PHC string, e.g. `$argon2id$v=19$...`.
  pub password_hash: String,
}

/// Proof that the request carried valid admin credentials.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
  let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
  let encoded = value.strip_prefix("Basic ")?;
  let decoded = STANDARD.decode(encoded).ok()?;
  let decoded = String::from_utf8(decoded).ok()?;
  let (user, pass) = decoded.split_once(':')?;
  Some((user.to_string(), pass.to_string()))
}

pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> bool {
  let Some((username, password)) = basic_credentials(headers) else {
    return false;
  };
  if username != config.username {
    return false;
  }
  let Ok(hash) = PasswordHash::new(&config.password_hash) else {
    tracing::error!("configured password hash is not a valid PHC string");
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &hash)
    .is_ok()
}

impl<S: Store, N: Notifier> FromRequestParts<AppState<S, N>> for Authenticated {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, N>,
  ) -> Result<Self, Self::Rejection> {
    if verify_auth(&parts.headers, &state.auth) {
      Ok(Authenticated)
    } else {
      Err(Error::Unauthorized)
    }
  }
}

#[cfg(test)]
mod tests {
  use argon2::password_hash::{PasswordHasher as _, SaltString};
  use axum::http::HeaderValue;

  use super::*;

  fn config() -> AuthConfig {
    let salt = SaltString::from_b64("kKBdmOWX4MvS3xOqjx3mpg").unwrap();
    let hash = Argon2::default()
      .hash_password(b"letmein", &salt)
      .unwrap()
      .to_string();
    AuthConfig {
      username:      "admin".to_string(),
      password_hash: hash,
    }
  }

  fn headers_with(user: &str, pass: &str) -> HeaderMap {
    let token = STANDARD.encode(format!("{user}:{pass}"));
    let mut headers = HeaderMap::new();
    headers.insert(
      header::AUTHORIZATION,
      HeaderValue::from_str(&format!("Basic {token}")).unwrap(),
    );
    headers
  }

  #[test]
  fn accepts_valid_credentials() {
    assert!(verify_auth(&headers_with("admin", "letmein"), &config()));
  }

  #[test]
  fn rejects_wrong_password() {
    assert!(!verify_auth(&headers_with("admin", "guessing"), &config()));
  }

  #[test]
  fn rejects_unknown_user() {
    assert!(!verify_auth(&headers_with("intruder", "letmein"), &config()));
  }

  #[test]
  fn rejects_missing_header() {
    assert!(!verify_auth(&HeaderMap::new(), &config()));
  }

  #[test]
  fn rejects_malformed_header() {
    let mut headers = HeaderMap::new();
    headers.insert(
      header::AUTHORIZATION,
      HeaderValue::from_static("Bearer whatever"),
    );
    assert!(!verify_auth(&headers, &config()));
  }
}
