//! SMTP implementation of the report notifier.
//!
//! One delivery attempt per check-in, no retries. Every failure — transport
//! construction, message assembly, SMTP errors — is logged and collapsed into
//! [`Delivery::Failed`]; nothing propagates to the submission workflow.

use frontdesk_core::notify::{Delivery, ReportEmail, ReportNotifier};
use lettre::{
  AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
  message::{Attachment, Body, MultiPart, SinglePart, header::ContentType},
  transport::smtp::authentication::Credentials,
};
use serde::Deserialize;
use thiserror::Error;

// ─── Configuration ───────────────────────────────────────────────────────────

/// SMTP connection settings, deserialised from the `[mail]` config table.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
  pub host:     String,
  pub port:     u16,
  pub username: String,
  pub password: String,
  /// Sender mailbox, e.g. `"Reception <reception@example.com>"`.
  pub from:     String,
  /// Recipient mailbox for all visit reports.
  pub to:       String,
}

// ─── Errors (internal only) ──────────────────────────────────────────────────

#[derive(Debug, Error)]
enum Error {
  #[error("invalid mailbox address: {0}")]
  Address(#[from] lettre::address::AddressError),

  #[error("message assembly error: {0}")]
  Message(#[from] lettre::error::Error),

  #[error("invalid content type: {0}")]
  ContentType(#[from] lettre::message::header::ContentTypeErr),

  #[error("smtp error: {0}")]
  Smtp(#[from] lettre::transport::smtp::Error),
}

// ─── Notifier ────────────────────────────────────────────────────────────────

/// Sends visit reports over SMTP. Constructed once at startup; without a
/// `[mail]` config table every send resolves to [`Delivery::Disabled`].
///
/// Cloning is cheap — the transport shares its connection pool.
#[derive(Clone)]
pub struct SmtpNotifier {
  inner: Option<(MailConfig, AsyncSmtpTransport<Tokio1Executor>)>,
}

impl SmtpNotifier {
  pub fn new(config: Option<MailConfig>) -> Self {
    let inner = config.and_then(|cfg| {
      match AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host) {
        Ok(builder) => {
          let transport = builder
            .port(cfg.port)
            .credentials(Credentials::new(
              cfg.username.clone(),
              cfg.password.clone(),
            ))
            .build();
          Some((cfg, transport))
        }
        Err(error) => {
          tracing::warn!(%error, "mail transport could not be built, notifications disabled");
          None
        }
      }
    });
    Self { inner }
  }

  fn build_message(config: &MailConfig, email: &ReportEmail) -> Result<Message, Error> {
    let body_text = format!(
      "A visitor has checked in.\n\nVisitor: {}\nCompany: {}\nReason: {}\n\n\
       The visit report is attached.\n",
      email.visitor_name, email.company, email.visit_reason,
    );

    let pdf_type = ContentType::parse("application/pdf")?;

    Ok(
      Message::builder()
        .from(config.from.parse()?)
        .to(config.to.parse()?)
        .subject(email.subject.clone())
        .multipart(
          MultiPart::mixed()
            .singlepart(
              SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(body_text),
            )
            .singlepart(
              Attachment::new(email.filename.clone())
                .body(Body::new(email.pdf.clone()), pdf_type),
            ),
        )?,
    )
  }
}

impl ReportNotifier for SmtpNotifier {
  async fn send_report(&self, email: ReportEmail) -> Delivery {
    let Some((config, transport)) = &self.inner else {
      tracing::debug!("no mail transport configured, skipping notification");
      return Delivery::Disabled;
    };

    let message = match Self::build_message(config, &email) {
      Ok(message) => message,
      Err(error) => {
        tracing::warn!(%error, "report email could not be assembled");
        return Delivery::Failed;
      }
    };

    match transport.send(message).await {
      Ok(_) => {
        tracing::info!(subject = %email.subject, "report email delivered");
        Delivery::Sent
      }
      Err(error) => {
        tracing::warn!(%error, "report email delivery failed");
        Delivery::Failed
      }
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use frontdesk_core::notify::{Delivery, ReportEmail, ReportNotifier as _};

  use super::*;

  fn config() -> MailConfig {
    MailConfig {
      host:     "smtp.example.com".to_string(),
      port:     587,
      username: "reception".to_string(),
      password: "secret".to_string(),
      from:     "Frontdesk <frontdesk@example.com>".to_string(),
      to:       "reception@example.com".to_string(),
    }
  }

  fn email() -> ReportEmail {
    ReportEmail {
      subject:      "Visitor check-in: Ada Lovelace (Acme)".to_string(),
      pdf:          b"%PDF-1.3 stub".to_vec(),
      filename:     "visit-report.pdf".to_string(),
      visitor_name: "Ada Lovelace".to_string(),
      company:      "Acme".to_string(),
      visit_reason: "audit".to_string(),
    }
  }

  #[test]
  fn message_carries_subject_and_attachment() {
    let message = SmtpNotifier::build_message(&config(), &email()).unwrap();
    let rendered = String::from_utf8_lossy(&message.formatted()).to_string();

    assert!(rendered.contains("Subject: Visitor check-in: Ada Lovelace (Acme)"));
    assert!(rendered.contains("visit-report.pdf"), "attachment filename missing");
    assert!(rendered.contains("application/pdf"));
    assert!(rendered.contains("Company: Acme"));
  }

  #[test]
  fn message_rejects_invalid_recipient() {
    let mut cfg = config();
    cfg.to = "not an address".to_string();
    assert!(SmtpNotifier::build_message(&cfg, &email()).is_err());
  }

  #[tokio::test]
  async fn unconfigured_notifier_reports_disabled() {
    let notifier = SmtpNotifier::new(None);
    assert_eq!(notifier.send_report(email()).await, Delivery::Disabled);
  }
}
