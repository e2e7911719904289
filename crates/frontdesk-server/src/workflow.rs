//! The check-in submission workflow.
//!
//! Runs entirely within one request: load documents and settings, render the
//! report, attempt delivery, persist. The submission instant is captured by
//! the caller, never taken from client input. Only a persistence failure
//! makes the submission fail — every earlier step degrades instead.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use frontdesk_core::{
  artifact,
  notify::{Delivery, ReportEmail, ReportNotifier},
  store::{CheckinStore, DocumentStore, SettingsStore},
  visit::{CheckinInput, VisitRecord},
};
use serde::Serialize;
use uuid::Uuid;

/// Outcome reported back to the kiosk after a submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
  pub success:    bool,
  pub message:    String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub report_url: Option<String>,
}

pub async fn submit_checkin<S, N>(
  store: &S,
  notifier: &N,
  timezone: Tz,
  submitted_at: DateTime<Utc>,
  input: CheckinInput,
) -> SubmissionOutcome
where
  S: CheckinStore + DocumentStore + SettingsStore,
  N: ReportNotifier,
{
  let local = submitted_at.with_timezone(&timezone);

  // An unreachable document store degrades to an empty acknowledgement list.
  let documents = match store.list_documents().await {
    Ok(documents) => documents,
    Err(error) => {
      tracing::warn!(%error, "document store unavailable, treating list as empty");
      Vec::new()
    }
  };

  // Missing settings degrade to an unbranded report.
  let settings = match store.get_settings().await {
    Ok(settings) => Some(settings),
    Err(error) => {
      tracing::warn!(%error, "settings unavailable, rendering without branding");
      None
    }
  };

  let accepted_rules =
    input.accepted_documents.len() == documents.len();

  let mut record = VisitRecord {
    record_id: Uuid::new_v4(),
    first_name: input.first_name,
    last_name: input.last_name,
    company: input.company,
    visit_reason: input.visit_reason.unwrap_or_default(),
    visit_date: input.visit_date,
    visit_time: input.visit_time,
    accepted_documents: input.accepted_documents,
    accepted_rules,
    submitted_at,
    timezone: timezone.name().to_string(),
    report_pdf: None,
  };

  let pdf =
    match frontdesk_report::render(&record, &documents, settings.as_ref(), local)
    {
      Ok(bytes) => {
        record.report_pdf = Some(artifact::encode_pdf(&bytes));
        Some(bytes)
      }
      Err(error) => {
        tracing::warn!(%error, "report rendering failed, record will carry no artifact");
        None
      }
    };

  let delivery = match pdf {
    Some(pdf) => {
      notifier
        .send_report(ReportEmail {
          subject:      format!(
            "Visitor check-in: {} ({})",
            record.full_name(),
            record.company,
          ),
          filename:     format!("visit-report-{}.pdf", record.record_id),
          visitor_name: record.full_name(),
          company:      record.company.clone(),
          visit_reason: record.visit_reason.clone(),
          pdf,
        })
        .await
    }
    // No report, nothing to attach; skip the attempt without marking the
    // outcome as a delivery failure.
    None => Delivery::Disabled,
  };

  let record_id = record.record_id;
  let has_report = record.report_pdf.is_some();
  if let Err(error) = store.insert_checkin(record).await {
    tracing::error!(%error, "check-in could not be persisted");
    return SubmissionOutcome {
      success:    false,
      message:    "Check-in could not be saved. Please try again.".to_string(),
      report_url: None,
    };
  }

  let mut message = String::from("Check-in recorded.");
  if delivery.failed() {
    message.push_str(" The report email could not be delivered.");
  }

  SubmissionOutcome {
    success: true,
    message,
    // No locator for a record without an artifact; it would only 404.
    report_url: has_report.then(|| format!("/api/reports/{record_id}")),
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use chrono::{NaiveDate, TimeZone as _};
  use frontdesk_core::document::NewDocument;
  use frontdesk_core::settings::SettingsPatch;
  use frontdesk_store_sqlite::SqliteStore;
  use thiserror::Error;

  use super::*;

  #[derive(Clone)]
  struct StubNotifier {
    outcome: Delivery,
    seen:    Arc<Mutex<Vec<String>>>,
  }

  impl StubNotifier {
    fn new(outcome: Delivery) -> Self {
      Self { outcome, seen: Arc::new(Mutex::new(Vec::new())) }
    }
  }

  impl ReportNotifier for StubNotifier {
    async fn send_report(&self, email: ReportEmail) -> Delivery {
      self.seen.lock().unwrap().push(email.subject);
      self.outcome
    }
  }

  #[derive(Debug, Error)]
  enum MockError {
    #[error("disk full")]
    DiskFull,
    #[error(transparent)]
    Store(#[from] frontdesk_store_sqlite::Error),
  }

  /// Reads succeed, writes to the check-in table fail.
  #[derive(Clone)]
  struct FailingStore {
    inner: SqliteStore,
  }

  impl DocumentStore for FailingStore {
    type Error = MockError;

    async fn list_documents(
      &self,
    ) -> Result<Vec<frontdesk_core::document::Document>, MockError> {
      Ok(self.inner.list_documents().await?)
    }
    async fn add_document(
      &self,
      document: NewDocument,
    ) -> Result<frontdesk_core::document::Document, MockError> {
      Ok(self.inner.add_document(document).await?)
    }
    async fn delete_document(&self, id: Uuid) -> Result<bool, MockError> {
      Ok(self.inner.delete_document(id).await?)
    }
  }

  impl SettingsStore for FailingStore {
    type Error = MockError;

    async fn get_settings(
      &self,
    ) -> Result<frontdesk_core::settings::CompanySettings, MockError> {
      Ok(self.inner.get_settings().await?)
    }
    async fn update_settings(
      &self,
      patch: SettingsPatch,
    ) -> Result<frontdesk_core::settings::CompanySettings, MockError> {
      Ok(self.inner.update_settings(patch).await?)
    }
  }

  impl CheckinStore for FailingStore {
    type Error = MockError;

    async fn insert_checkin(&self, _record: VisitRecord) -> Result<(), MockError> {
      Err(MockError::DiskFull)
    }
    async fn list_checkins(&self) -> Result<Vec<VisitRecord>, MockError> {
      Ok(self.inner.list_checkins().await?)
    }
    async fn get_checkin(
      &self,
      id: Uuid,
    ) -> Result<Option<VisitRecord>, MockError> {
      Ok(self.inner.get_checkin(id).await?)
    }
    async fn delete_checkin(&self, id: Uuid) -> Result<bool, MockError> {
      Ok(self.inner.delete_checkin(id).await?)
    }
  }

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory().await.unwrap()
  }

  fn input(accepted: Vec<Uuid>) -> CheckinInput {
    CheckinInput {
      first_name:         "Ada".to_string(),
      last_name:          "Lovelace".to_string(),
      company:            "Analytical Engines Ltd".to_string(),
      visit_reason:       Some("kickoff meeting".to_string()),
      visit_date:         NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
      visit_time:         Some("10:30".to_string()),
      accepted_documents: accepted,
    }
  }

  fn berlin() -> Tz {
    "Europe/Berlin".parse().unwrap()
  }

  #[tokio::test]
  async fn full_acceptance_persists_record_with_report() {
    let store = store().await;
    let doc = store
      .add_document(NewDocument {
        document_id: None,
        name:        "Safety rules".to_string(),
        description: None,
        content:     "No running.".to_string(),
        created_at:  None,
      })
      .await
      .unwrap();
    let notifier = StubNotifier::new(Delivery::Sent);

    let outcome =
      submit_checkin(&store, &notifier, berlin(), Utc::now(), input(vec![doc.document_id]))
        .await;
    assert!(outcome.success);
    assert!(!outcome.message.contains("could not be delivered"));

    let records = store.list_checkins().await.unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert!(record.accepted_rules);
    assert_eq!(record.accepted_documents, vec![doc.document_id]);
    assert_eq!(record.timezone, "Europe/Berlin");
    assert!(record.report_pdf.is_some(), "record should carry the report");
    assert_eq!(
      outcome.report_url.as_deref(),
      Some(format!("/api/reports/{}", record.record_id).as_str()),
    );
    assert_eq!(notifier.seen.lock().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn empty_document_list_counts_as_full_acceptance() {
    let store = store().await;
    let notifier = StubNotifier::new(Delivery::Sent);

    let outcome = submit_checkin(&store, &notifier, berlin(), Utc::now(), input(vec![])).await;
    assert!(outcome.success);
    assert!(store.list_checkins().await.unwrap()[0].accepted_rules);
  }

  #[tokio::test]
  async fn partial_acceptance_is_recorded_honestly() {
    let store = store().await;
    let mut first = None;
    for name in ["Safety rules", "NDA"] {
      let doc = store
        .add_document(NewDocument {
          document_id: None,
          name:        name.to_string(),
          description: None,
          content:     "...".to_string(),
          created_at:  None,
        })
        .await
        .unwrap();
      first.get_or_insert(doc.document_id);
    }
    let notifier = StubNotifier::new(Delivery::Sent);

    let outcome =
      submit_checkin(&store, &notifier, berlin(), Utc::now(), input(vec![first.unwrap()]))
        .await;
    assert!(outcome.success);
    assert!(!store.list_checkins().await.unwrap()[0].accepted_rules);
  }

  #[tokio::test]
  async fn delivery_failure_does_not_fail_the_submission() {
    let store = store().await;
    let notifier = StubNotifier::new(Delivery::Failed);

    let outcome = submit_checkin(&store, &notifier, berlin(), Utc::now(), input(vec![])).await;
    assert!(outcome.success);
    assert!(outcome.message.contains("could not be delivered"));
    assert!(outcome.report_url.is_some());
    assert_eq!(store.list_checkins().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn disabled_mail_is_not_reported_as_a_failure() {
    let store = store().await;
    let notifier = StubNotifier::new(Delivery::Disabled);

    let outcome = submit_checkin(&store, &notifier, berlin(), Utc::now(), input(vec![])).await;
    assert!(outcome.success);
    assert!(!outcome.message.contains("could not be delivered"));
  }

  #[tokio::test]
  async fn persistence_failure_fails_the_submission() {
    let failing = FailingStore { inner: store().await };
    let notifier = StubNotifier::new(Delivery::Sent);

    let outcome =
      submit_checkin(&failing, &notifier, berlin(), Utc::now(), input(vec![])).await;
    assert!(!outcome.success);
    assert!(outcome.report_url.is_none());
    assert!(failing.inner.list_checkins().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn failed_render_omits_the_report_url() {
    let store = store().await;
    let notifier = StubNotifier::new(Delivery::Sent);

    // An instant beyond the representable PDF date range makes rendering
    // fail; the record must still persist, just without an artifact or a
    // locator pointing at one.
    let far_future = Utc.with_ymd_and_hms(20_000, 1, 1, 0, 0, 0).unwrap();
    let outcome =
      submit_checkin(&store, &notifier, berlin(), far_future, input(vec![]))
        .await;

    assert!(outcome.success);
    assert!(outcome.report_url.is_none());
    assert!(!outcome.message.contains("could not be delivered"));

    let records = store.list_checkins().await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].report_pdf.is_none());
    assert!(notifier.seen.lock().unwrap().is_empty(), "no mail attempt");
  }

  #[tokio::test]
  async fn company_settings_feed_the_report() {
    let store = store().await;
    store
      .update_settings(SettingsPatch {
        address: Some("Acme GmbH\nWerkstr. 9\n10115 Berlin".to_string()),
        logo:    None,
      })
      .await
      .unwrap();
    let notifier = StubNotifier::new(Delivery::Sent);

    let outcome = submit_checkin(&store, &notifier, berlin(), Utc::now(), input(vec![])).await;
    assert!(outcome.success);
    assert!(store.list_checkins().await.unwrap()[0].report_pdf.is_some());
  }
}
