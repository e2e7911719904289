//! Compliance document CRUD. Listing is public (the kiosk shows the
//! documents to visitors); mutations require admin credentials.

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::{DateTime, Utc};
use frontdesk_core::{
  document::{Document, NewDocument},
  store::DocumentStore as _,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  AppState, Notifier, Store,
  auth::Authenticated,
  handlers::ApiData,
};

/// Fields are optional so validation errors surface as a `success: false`
/// body instead of a bare 422.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBody {
  pub id:          Option<Uuid>,
  pub name:        Option<String>,
  pub description: Option<String>,
  pub content:     Option<String>,
  pub created_at:  Option<DateTime<Utc>>,
}

/// `GET /api/documents` — public. A broken store degrades to an empty list
/// so the kiosk form still loads.
pub async fn list<S: Store, N: Notifier>(
  State(state): State<AppState<S, N>>,
) -> Json<Vec<Document>> {
  match state.store.list_documents().await {
    Ok(documents) => Json(documents),
    Err(error) => {
      tracing::warn!(%error, "document store unavailable, returning empty list");
      Json(Vec::new())
    }
  }
}

/// `POST /api/document` — admin.
pub async fn create<S: Store, N: Notifier>(
  _auth: Authenticated,
  State(state): State<AppState<S, N>>,
  Json(body): Json<DocumentBody>,
) -> Json<ApiData<Document>> {
  let name = body.name.filter(|n| !n.trim().is_empty());
  let content = body.content.filter(|c| !c.trim().is_empty());
  let (Some(name), Some(content)) = (name, content) else {
    return Json(ApiData::failed("Document name and content are required."));
  };

  let new = NewDocument {
    document_id: body.id,
    name,
    description: body.description,
    content,
    created_at: body.created_at,
  };
  match state.store.add_document(new).await {
    Ok(document) => Json(ApiData::ok("Document saved.", document)),
    Err(error) => {
      tracing::error!(%error, "document could not be saved");
      Json(ApiData::failed("Document could not be saved."))
    }
  }
}

/// `DELETE /api/document/{id}` — admin, idempotent. Historical check-ins
/// keep their acknowledged ids; reports render those as removed.
pub async fn remove<S: Store, N: Notifier>(
  _auth: Authenticated,
  State(state): State<AppState<S, N>>,
  Path(id): Path<Uuid>,
) -> Json<ApiData<Uuid>> {
  match state.store.delete_document(id).await {
    Ok(true) => Json(ApiData::ok("Document deleted.", id)),
    Ok(false) => Json(ApiData::failed("Document not found.")),
    Err(error) => {
      tracing::error!(%error, "document could not be deleted");
      Json(ApiData::failed("Document could not be deleted."))
    }
  }
}
