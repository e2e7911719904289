//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Instants are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! acknowledged-document ids as a compact JSON array. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use frontdesk_core::{
  document::Document, settings::CompanySettings, visit::VisitRecord,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Acknowledged-document ids ───────────────────────────────────────────────

pub fn encode_ids(ids: &[Uuid]) -> Result<String> {
  let strings: Vec<String> = ids.iter().copied().map(encode_uuid).collect();
  Ok(serde_json::to_string(&strings)?)
}

pub fn decode_ids(s: &str) -> Result<Vec<Uuid>> {
  let strings: Vec<String> = serde_json::from_str(s)?;
  strings.iter().map(|s| decode_uuid(s)).collect()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `documents` row.
pub struct RawDocument {
  pub document_id: String,
  pub name:        String,
  pub description: Option<String>,
  pub content:     String,
  pub created_at:  String,
}

impl RawDocument {
  pub fn into_document(self) -> Result<Document> {
    Ok(Document {
      document_id: decode_uuid(&self.document_id)?,
      name:        self.name,
      description: self.description,
      content:     self.content,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from the `company_settings` row.
pub struct RawSettings {
  pub address:    String,
  pub logo:       Option<String>,
  pub updated_at: String,
}

impl RawSettings {
  pub fn into_settings(self) -> Result<CompanySettings> {
    Ok(CompanySettings {
      address:    self.address,
      logo:       self.logo,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `checkins` row.
pub struct RawCheckin {
  pub record_id:          String,
  pub first_name:         String,
  pub last_name:          String,
  pub company:            String,
  pub visit_reason:       String,
  pub visit_date:         String,
  pub visit_time:         Option<String>,
  pub accepted_documents: String,
  pub accepted_rules:     bool,
  pub submitted_at:       String,
  pub timezone:           String,
  pub report_pdf:         Option<String>,
}

impl RawCheckin {
  pub fn into_record(self) -> Result<VisitRecord> {
    Ok(VisitRecord {
      record_id:          decode_uuid(&self.record_id)?,
      first_name:         self.first_name,
      last_name:          self.last_name,
      company:            self.company,
      visit_reason:       self.visit_reason,
      visit_date:         decode_date(&self.visit_date)?,
      visit_time:         self.visit_time,
      accepted_documents: decode_ids(&self.accepted_documents)?,
      accepted_rules:     self.accepted_rules,
      submitted_at:       decode_dt(&self.submitted_at)?,
      timezone:           self.timezone,
      report_pdf:         self.report_pdf,
    })
  }
}
