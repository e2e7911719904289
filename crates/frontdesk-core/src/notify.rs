//! The notifier contract — best-effort outbound mail.
//!
//! Report generation and persistence must succeed independent of mail
//! delivery, so implementations never surface an error to the caller: every
//! failure collapses into [`Delivery::Failed`].

use std::future::Future;

/// Outcome of one notification attempt. There are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
  /// The transport accepted the message.
  Sent,
  /// The attempt failed (connection, auth, timeout, malformed address).
  /// The submission still succeeds; the outcome message is annotated.
  Failed,
  /// No mail transport is configured. Not a failure.
  Disabled,
}

impl Delivery {
  pub fn failed(self) -> bool { matches!(self, Self::Failed) }
}

/// Everything the mailer needs to announce one check-in.
#[derive(Debug, Clone)]
pub struct ReportEmail {
  pub subject:      String,
  /// Rendered report bytes, attached as `application/pdf`.
  pub pdf:          Vec<u8>,
  pub filename:     String,
  pub visitor_name: String,
  pub company:      String,
  pub visit_reason: String,
}

/// Abstraction over the outbound mail channel. One attempt per call.
pub trait ReportNotifier: Send + Sync {
  fn send_report(
    &self,
    email: ReportEmail,
  ) -> impl Future<Output = Delivery> + Send + '_;
}
