//! Visit records — one row per completed visitor check-in.
//!
//! A record is created only by the submission workflow and is immutable once
//! persisted; the only mutation that exists afterwards is deletion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted visitor check-in.
///
/// `accepted_documents` is the set of document ids the visitor acknowledged
/// at submission time. It is a historical snapshot: deleting a document later
/// does not rewrite it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
  pub record_id:          Uuid,
  pub first_name:         String,
  pub last_name:          String,
  pub company:            String,
  /// Free text; empty when the visitor gave no reason.
  pub visit_reason:       String,
  /// Calendar date of the visit, independent of `submitted_at`.
  pub visit_date:         NaiveDate,
  /// Bare `HH:MM`-shaped string, independent of `visit_date`.
  pub visit_time:         Option<String>,
  pub accepted_documents: Vec<Uuid>,
  /// True iff every document offered at submission time was acknowledged.
  /// Computed by the workflow, never trusted from caller input.
  pub accepted_rules:     bool,
  /// Absolute instant captured at submission.
  pub submitted_at:       DateTime<Utc>,
  /// IANA zone label the submission instant was normalised to,
  /// e.g. "Europe/Berlin".
  pub timezone:           String,
  /// Rendered visit report as a `data:application/pdf;base64,` URI.
  /// `None` when rendering failed; the record is still valid.
  pub report_pdf:         Option<String>,
}

impl VisitRecord {
  /// First and last name joined with a single space.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

// ─── Submission input ────────────────────────────────────────────────────────

/// Input to the submission workflow. Record id, provenance, and the
/// `accepted_rules` flag are assigned server-side.
///
/// Required-field validation (non-empty name, company) is the upstream
/// client's responsibility; the workflow tolerates missing optional fields.
#[derive(Debug, Clone)]
pub struct CheckinInput {
  pub first_name:         String,
  pub last_name:          String,
  pub company:            String,
  pub visit_reason:       Option<String>,
  pub visit_date:         NaiveDate,
  pub visit_time:         Option<String>,
  pub accepted_documents: Vec<Uuid>,
}

// ─── Listing projection ──────────────────────────────────────────────────────

/// A visit record without the embedded report payload, as returned by the
/// admin listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitSummary {
  pub record_id:          Uuid,
  pub first_name:         String,
  pub last_name:          String,
  pub full_name:          String,
  pub company:            String,
  pub visit_reason:       String,
  pub visit_date:         NaiveDate,
  pub visit_time:         Option<String>,
  pub accepted_documents: Vec<Uuid>,
  pub accepted_rules:     bool,
  pub submitted_at:       DateTime<Utc>,
  pub timezone:           String,
  /// Whether a rendered report exists for this record.
  pub has_report:         bool,
}

impl From<&VisitRecord> for VisitSummary {
  fn from(record: &VisitRecord) -> Self {
    Self {
      record_id:          record.record_id,
      first_name:         record.first_name.clone(),
      last_name:          record.last_name.clone(),
      full_name:          record.full_name(),
      company:            record.company.clone(),
      visit_reason:       record.visit_reason.clone(),
      visit_date:         record.visit_date,
      visit_time:         record.visit_time.clone(),
      accepted_documents: record.accepted_documents.clone(),
      accepted_rules:     record.accepted_rules,
      submitted_at:       record.submitted_at,
      timezone:           record.timezone.clone(),
      has_report:         record.report_pdf.is_some(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record() -> VisitRecord {
    VisitRecord {
      record_id:          Uuid::new_v4(),
      first_name:         "Ada".to_string(),
      last_name:          "Lovelace".to_string(),
      company:            "Analytical Engines Ltd".to_string(),
      visit_reason:       "audit".to_string(),
      visit_date:         NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
      visit_time:         Some("09:30".to_string()),
      accepted_documents: vec![],
      accepted_rules:     true,
      submitted_at:       Utc::now(),
      timezone:           "Europe/Berlin".to_string(),
      report_pdf:         None,
    }
  }

  #[test]
  fn full_name_joins_with_single_space() {
    assert_eq!(record().full_name(), "Ada Lovelace");
  }

  #[test]
  fn summary_omits_report_but_flags_presence() {
    let mut rec = record();
    rec.report_pdf = Some("data:application/pdf;base64,AAAA".to_string());
    let summary = VisitSummary::from(&rec);
    assert!(summary.has_report);
    assert_eq!(summary.full_name, "Ada Lovelace");

    let json = serde_json::to_string(&summary).unwrap();
    assert!(!json.contains("base64,AAAA"), "payload leaked: {json}");
    assert!(json.contains("\"hasReport\":true"));
  }
}
