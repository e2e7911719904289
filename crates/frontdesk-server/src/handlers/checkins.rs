//! Check-in submission and the admin check-in listing.

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::{NaiveDate, Utc};
use frontdesk_core::{store::CheckinStore as _, visit::CheckinInput};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState, Notifier, Store,
  auth::Authenticated,
  error::Error,
  handlers::ApiStatus,
  workflow::{self, SubmissionOutcome},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinBody {
  pub first_name:         String,
  pub last_name:          String,
  pub company:            String,
  pub visit_reason:       Option<String>,
  pub visit_date:         NaiveDate,
  pub visit_time:         Option<String>,
  #[serde(default)]
  pub accepted_documents: Vec<Uuid>,
}

/// `POST /api/checkin` — public, the kiosk form posts here.
pub async fn submit<S: Store, N: Notifier>(
  State(state): State<AppState<S, N>>,
  Json(body): Json<CheckinBody>,
) -> Json<SubmissionOutcome> {
  let input = CheckinInput {
    first_name:         body.first_name,
    last_name:          body.last_name,
    company:            body.company,
    visit_reason:       body.visit_reason,
    visit_date:         body.visit_date,
    visit_time:         body.visit_time,
    accepted_documents: body.accepted_documents,
  };
  Json(
    workflow::submit_checkin(
      state.store.as_ref(),
      state.notifier.as_ref(),
      state.timezone,
      Utc::now(),
      input,
    )
    .await,
  )
}

/// `GET /api/checkins` — admin. Summaries only, the PDF payload stays out.
pub async fn list<S: Store, N: Notifier>(
  _auth: Authenticated,
  State(state): State<AppState<S, N>>,
) -> Result<Json<Vec<frontdesk_core::visit::VisitSummary>>, Error> {
  let records = state.store.list_checkins().await.map_err(Error::store)?;
  Ok(Json(records.iter().map(Into::into).collect()))
}

/// `DELETE /api/checkin/{id}` — admin, idempotent.
pub async fn remove<S: Store, N: Notifier>(
  _auth: Authenticated,
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ApiStatus>, Error> {
  let removed = state.store.delete_checkin(id).await.map_err(Error::store)?;
  Ok(Json(if removed {
    ApiStatus::ok("Check-in deleted.")
  } else {
    ApiStatus::failed("Check-in not found.")
  }))
}
