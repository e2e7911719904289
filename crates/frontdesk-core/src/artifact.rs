//! Report artifact codec.
//!
//! Report bytes are stored as a self-describing data URI
//! (`data:application/pdf;base64,...`) so the same field round-trips through
//! text-oriented storage and can be handed to a browser unchanged.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use crate::{Error, Result};

pub const PDF_DATA_URI_PREFIX: &str = "data:application/pdf;base64,";

/// Wrap raw PDF bytes in the storage representation.
pub fn encode_pdf(bytes: &[u8]) -> String {
  format!("{PDF_DATA_URI_PREFIX}{}", B64.encode(bytes))
}

/// Recover raw PDF bytes from the storage representation.
pub fn decode_pdf(uri: &str) -> Result<Vec<u8>> {
  let payload = uri
    .strip_prefix(PDF_DATA_URI_PREFIX)
    .ok_or(Error::NotPdfDataUri)?;
  Ok(B64.decode(payload)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trip() {
    let bytes = b"%PDF-1.3 not a real document";
    let uri = encode_pdf(bytes);
    assert!(uri.starts_with(PDF_DATA_URI_PREFIX));
    assert_eq!(decode_pdf(&uri).unwrap(), bytes);
  }

  #[test]
  fn rejects_foreign_mime_type() {
    let err = decode_pdf("data:image/png;base64,AAAA").unwrap_err();
    assert!(matches!(err, Error::NotPdfDataUri));
  }

  #[test]
  fn rejects_invalid_base64() {
    let uri = format!("{PDF_DATA_URI_PREFIX}!!!");
    assert!(matches!(decode_pdf(&uri), Err(Error::Base64(_))));
  }
}
