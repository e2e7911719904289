//! The three storage traits backing the check-in service.
//!
//! Implemented by storage backends (e.g. `frontdesk-store-sqlite`). Higher
//! layers depend on these abstractions, not on any concrete backend. Each
//! store exclusively owns its collection; the submission workflow only reads
//! documents and settings and exclusively creates visit records.

use std::future::Future;

use uuid::Uuid;

use crate::{
  document::{Document, NewDocument},
  settings::{CompanySettings, SettingsPatch},
  visit::VisitRecord,
};

/// CRUD over uploaded compliance documents.
///
/// All methods return `Send` futures so the traits can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All documents, newest creation time first.
  fn list_documents(
    &self,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + '_;

  /// Persist a new document, assigning id and creation timestamp when the
  /// caller did not supply them. Returns the stored row.
  fn add_document(
    &self,
    input: NewDocument,
  ) -> impl Future<Output = Result<Document, Self::Error>> + Send + '_;

  /// Remove a document. Returns whether a row was actually removed; an
  /// unknown id is a reported "not found", not a fault.
  fn delete_document(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

/// Read/update access to the company-settings singleton.
pub trait SettingsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the singleton, creating it with placeholder defaults on first
  /// read. Repeated calls observe the same persisted row.
  fn get_settings(
    &self,
  ) -> impl Future<Output = Result<CompanySettings, Self::Error>> + Send + '_;

  /// Merge `patch` onto the current values, stamp the update time, and
  /// return the stored result. Identity stays pinned to the singleton.
  fn update_settings(
    &self,
    patch: SettingsPatch,
  ) -> impl Future<Output = Result<CompanySettings, Self::Error>> + Send + '_;
}

/// CRUD over visit records. Records are insert-only; no update exists.
pub trait CheckinStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a fully-assembled record, embedded report included.
  fn insert_checkin(
    &self,
    record: VisitRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All records, newest submission first, acknowledged-document ids decoded
  /// from their persisted form.
  fn list_checkins(
    &self,
  ) -> impl Future<Output = Result<Vec<VisitRecord>, Self::Error>> + Send + '_;

  /// Retrieve one record by id. Returns `None` if not found.
  fn get_checkin(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<VisitRecord>, Self::Error>> + Send + '_;

  /// Remove a record. Returns whether a row was actually removed.
  fn delete_checkin(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
