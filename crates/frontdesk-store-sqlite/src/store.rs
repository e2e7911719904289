//! [`SqliteStore`] — the SQLite implementation of all three store traits.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use frontdesk_core::{
  document::{Document, NewDocument},
  settings::{CompanySettings, SettingsPatch},
  store::{CheckinStore, DocumentStore, SettingsStore},
  visit::VisitRecord,
};

use crate::{
  Error, Result,
  encode::{
    RawCheckin, RawDocument, RawSettings, encode_date, encode_dt, encode_ids,
    encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Frontdesk store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The store is
/// handed to the server explicitly; there is no process-wide singleton.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = Error;

  async fn list_documents(&self) -> Result<Vec<Document>> {
    let raws: Vec<RawDocument> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT document_id, name, description, content, created_at
           FROM documents
           ORDER BY created_at DESC, document_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawDocument {
              document_id: row.get(0)?,
              name:        row.get(1)?,
              description: row.get(2)?,
              content:     row.get(3)?,
              created_at:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document).collect()
  }

  async fn add_document(&self, input: NewDocument) -> Result<Document> {
    let document = Document {
      document_id: input.document_id.unwrap_or_else(Uuid::new_v4),
      name:        input.name,
      description: input.description,
      content:     input.content,
      created_at:  input.created_at.unwrap_or_else(Utc::now),
    };

    let id_str      = encode_uuid(document.document_id);
    let name        = document.name.clone();
    let description = document.description.clone();
    let content     = document.content.clone();
    let at_str      = encode_dt(document.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (document_id, name, description, content, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, description, content, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(document)
  }

  async fn delete_document(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM documents WHERE document_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(n > 0)
      })
      .await?;
    Ok(removed)
  }
}

// ─── SettingsStore impl ──────────────────────────────────────────────────────

impl SettingsStore for SqliteStore {
  type Error = Error;

  async fn get_settings(&self) -> Result<CompanySettings> {
    let defaults = CompanySettings::placeholder(Utc::now());
    let def_address = defaults.address.clone();
    let def_at_str  = encode_dt(defaults.updated_at);

    let raw: RawSettings = self
      .conn
      .call(move |conn| {
        // Lazy singleton creation: insert defaults only when no row exists,
        // then read back whatever is persisted.
        conn.execute(
          "INSERT INTO company_settings (settings_id, address, logo, updated_at)
           VALUES (1, ?1, NULL, ?2)
           ON CONFLICT(settings_id) DO NOTHING",
          rusqlite::params![def_address, def_at_str],
        )?;

        let raw = conn.query_row(
          "SELECT address, logo, updated_at FROM company_settings WHERE settings_id = 1",
          [],
          |row| {
            Ok(RawSettings {
              address:    row.get(0)?,
              logo:       row.get(1)?,
              updated_at: row.get(2)?,
            })
          },
        )?;
        Ok(raw)
      })
      .await?;

    raw.into_settings()
  }

  async fn update_settings(&self, patch: SettingsPatch) -> Result<CompanySettings> {
    // Ensure the singleton exists before patching it.
    self.get_settings().await?;

    let address = patch.address;
    let logo    = patch.logo;
    let at_str  = encode_dt(Utc::now());

    let raw: RawSettings = self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE company_settings
           SET address    = COALESCE(?1, address),
               logo       = COALESCE(?2, logo),
               updated_at = ?3
           WHERE settings_id = 1",
          rusqlite::params![address, logo, at_str],
        )?;

        let raw = conn.query_row(
          "SELECT address, logo, updated_at FROM company_settings WHERE settings_id = 1",
          [],
          |row| {
            Ok(RawSettings {
              address:    row.get(0)?,
              logo:       row.get(1)?,
              updated_at: row.get(2)?,
            })
          },
        )?;
        Ok(raw)
      })
      .await?;

    raw.into_settings()
  }
}

// ─── CheckinStore impl ───────────────────────────────────────────────────────

const CHECKIN_COLUMNS: &str = "record_id, first_name, last_name, company, \
  visit_reason, visit_date, visit_time, accepted_documents, accepted_rules, \
  submitted_at, timezone, report_pdf";

fn checkin_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCheckin> {
  Ok(RawCheckin {
    record_id:          row.get(0)?,
    first_name:         row.get(1)?,
    last_name:          row.get(2)?,
    company:            row.get(3)?,
    visit_reason:       row.get(4)?,
    visit_date:         row.get(5)?,
    visit_time:         row.get(6)?,
    accepted_documents: row.get(7)?,
    accepted_rules:     row.get(8)?,
    submitted_at:       row.get(9)?,
    timezone:           row.get(10)?,
    report_pdf:         row.get(11)?,
  })
}

impl CheckinStore for SqliteStore {
  type Error = Error;

  async fn insert_checkin(&self, record: VisitRecord) -> Result<()> {
    let record_id_str = encode_uuid(record.record_id);
    let ids_str       = encode_ids(&record.accepted_documents)?;
    let date_str      = encode_date(record.visit_date);
    let at_str        = encode_dt(record.submitted_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO checkins ({CHECKIN_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
          ),
          rusqlite::params![
            record_id_str,
            record.first_name,
            record.last_name,
            record.company,
            record.visit_reason,
            date_str,
            record.visit_time,
            ids_str,
            record.accepted_rules,
            at_str,
            record.timezone,
            record.report_pdf,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_checkins(&self) -> Result<Vec<VisitRecord>> {
    let raws: Vec<RawCheckin> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CHECKIN_COLUMNS} FROM checkins
           ORDER BY submitted_at DESC, record_id"
        ))?;
        let rows = stmt
          .query_map([], checkin_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCheckin::into_record).collect()
  }

  async fn get_checkin(&self, id: Uuid) -> Result<Option<VisitRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCheckin> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CHECKIN_COLUMNS} FROM checkins WHERE record_id = ?1"),
              rusqlite::params![id_str],
              checkin_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCheckin::into_record).transpose()
  }

  async fn delete_checkin(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM checkins WHERE record_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(n > 0)
      })
      .await?;
    Ok(removed)
  }
}
