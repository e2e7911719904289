//! Serving stored visit reports as raw PDF bytes.

use axum::{
  extract::{Path, State},
  http::header,
  response::{IntoResponse, Response},
};
use frontdesk_core::{artifact, store::CheckinStore as _};
use uuid::Uuid;

use crate::{AppState, Notifier, Store, error::Error};

/// `GET /api/reports/{id}` — decodes the stored data URI and serves it as
/// `application/pdf`. 404 when the record is missing or carries no report.
pub async fn fetch<S: Store, N: Notifier>(
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<Response, Error> {
  let record = state
    .store
    .get_checkin(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;
  let uri = record.report_pdf.ok_or(Error::NotFound)?;
  let bytes = artifact::decode_pdf(&uri)?;
  Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes).into_response())
}
