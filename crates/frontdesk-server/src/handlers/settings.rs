//! Company settings — a single lazily-created row.

use axum::{Json, extract::State};
use chrono::Utc;
use frontdesk_core::{
  settings::{CompanySettings, SettingsPatch},
  store::SettingsStore as _,
};

use crate::{AppState, Notifier, Store, auth::Authenticated, handlers::ApiStatus};

/// `GET /api/company-settings` — public; the kiosk shows the company name.
/// A broken store degrades to the placeholder so the form still renders.
pub async fn fetch<S: Store, N: Notifier>(
  State(state): State<AppState<S, N>>,
) -> Json<CompanySettings> {
  match state.store.get_settings().await {
    Ok(settings) => Json(settings),
    Err(error) => {
      tracing::warn!(%error, "settings unavailable, serving placeholder");
      Json(CompanySettings::placeholder(Utc::now()))
    }
  }
}

/// `POST /api/company-settings` — admin. Omitted fields keep their value.
pub async fn update<S: Store, N: Notifier>(
  _auth: Authenticated,
  State(state): State<AppState<S, N>>,
  Json(patch): Json<SettingsPatch>,
) -> Json<ApiStatus> {
  match state.store.update_settings(patch).await {
    Ok(_) => Json(ApiStatus::ok("Settings saved.")),
    Err(error) => {
      tracing::error!(%error, "settings could not be saved");
      Json(ApiStatus::failed("Settings could not be saved."))
    }
  }
}
