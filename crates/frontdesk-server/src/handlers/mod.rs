//! HTTP handlers, grouped by resource.

use serde::Serialize;

pub mod checkins;
pub mod documents;
pub mod reports;
pub mod settings;

/// Uniform `{ success, message }` response body for mutations.
#[derive(Debug, Serialize)]
pub struct ApiStatus {
  pub success: bool,
  pub message: String,
}

impl ApiStatus {
  pub fn ok(message: impl Into<String>) -> Self {
    Self { success: true, message: message.into() }
  }

  pub fn failed(message: impl Into<String>) -> Self {
    Self { success: false, message: message.into() }
  }
}

/// Like [`ApiStatus`], with a payload on success.
#[derive(Debug, Serialize)]
pub struct ApiData<T> {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
}

impl<T> ApiData<T> {
  pub fn ok(message: impl Into<String>, data: T) -> Self {
    Self { success: true, message: message.into(), data: Some(data) }
  }

  pub fn failed(message: impl Into<String>) -> Self {
    Self { success: false, message: message.into(), data: None }
  }
}
