//! Error type for `frontdesk-report`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("pdf generation error: {0}")]
  Pdf(String),

  #[error("render clock out of range: {0}")]
  Clock(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
