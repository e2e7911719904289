//! Compliance documents visitors must read before checking in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded policy document. `content` is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
  pub document_id: Uuid,
  pub name:        String,
  pub description: Option<String>,
  /// Text-encoded binary payload (a data URI), stored as-is.
  pub content:     String,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::DocumentStore::add_document`].
///
/// `document_id` and `created_at` are assigned by the store when absent.
#[derive(Debug, Clone)]
pub struct NewDocument {
  pub document_id: Option<Uuid>,
  pub name:        String,
  pub description: Option<String>,
  pub content:     String,
  pub created_at:  Option<DateTime<Utc>>,
}
