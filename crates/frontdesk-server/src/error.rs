//! Error types and axum `IntoResponse` implementation.
//!
//! Store failures are logged server-side with full detail; the response body
//! only ever carries a generic message.

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  #[error("not found")]
  NotFound,

  #[error("artifact error: {0}")]
  Artifact(#[from] frontdesk_core::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res =
          (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"frontdesk\""),
        );
        res
      }
      Error::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      Error::Artifact(e) => {
        tracing::error!(error = %e, "stored artifact could not be decoded");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
      }
    }
  }
}
