//! Error types for `frontdesk-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The stored artifact does not start with the PDF data-URI prefix.
  #[error("not a PDF data URI")]
  NotPdfDataUri,

  #[error("base64 decode error: {0}")]
  Base64(#[from] base64::DecodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
