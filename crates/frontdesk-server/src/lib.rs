//! Visitor check-in HTTP server.
//!
//! A kiosk-facing API (submit a check-in, list documents, read company
//! settings) plus an admin surface (check-in listing and deletion, document
//! and settings management) behind HTTP Basic auth. Generic over the store
//! and the notifier so tests can swap in stubs.

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post},
};
use chrono_tz::Tz;
use frontdesk_core::{
  notify::ReportNotifier,
  store::{CheckinStore, DocumentStore, SettingsStore},
};
use frontdesk_notify::MailConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod workflow;

pub use auth::AuthConfig;
pub use error::Error;

/// Everything the router needs from its store.
pub trait Store:
  CheckinStore + DocumentStore + SettingsStore + Clone + Send + Sync + 'static
{
}
impl<T> Store for T where
  T: CheckinStore + DocumentStore + SettingsStore + Clone + Send + Sync + 'static
{
}

pub trait Notifier: ReportNotifier + Clone + Send + Sync + 'static {}
impl<T> Notifier for T where T: ReportNotifier + Clone + Send + Sync + 'static {}

// ─── Configuration ───────────────────────────────────────────────────────────

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8333 }
fn default_timezone() -> String { "Europe/Berlin".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  /// SQLite database path.
  pub store_path:         PathBuf,
  /// IANA zone name used to localise report timestamps.
  #[serde(default = "default_timezone")]
  pub timezone:           String,
  pub auth_username:      String,
  /// Argon2 PHC hash of the admin password.
  pub auth_password_hash: String,
  /// Optional `[mail]` table; absent means notifications are disabled.
  pub mail:               Option<MailConfig>,
}

// ─── State & router ──────────────────────────────────────────────────────────

pub struct AppState<S: Store, N: Notifier> {
  pub store:    Arc<S>,
  pub notifier: Arc<N>,
  pub auth:     Arc<AuthConfig>,
  pub timezone: Tz,
}

impl<S: Store, N: Notifier> Clone for AppState<S, N> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      notifier: Arc::clone(&self.notifier),
      auth:     Arc::clone(&self.auth),
      timezone: self.timezone,
    }
  }
}

pub fn router<S: Store, N: Notifier>(state: AppState<S, N>) -> Router {
  Router::new()
    .route("/api/checkin", post(handlers::checkins::submit))
    .route("/api/checkins", get(handlers::checkins::list))
    .route("/api/checkin/{id}", delete(handlers::checkins::remove))
    .route("/api/reports/{id}", get(handlers::reports::fetch))
    .route("/api/documents", get(handlers::documents::list))
    .route("/api/document", post(handlers::documents::create))
    .route("/api/document/{id}", delete(handlers::documents::remove))
    .route(
      "/api/company-settings",
      get(handlers::settings::fetch).post(handlers::settings::update),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
