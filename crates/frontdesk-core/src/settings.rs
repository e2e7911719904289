//! Company settings — singleton branding configuration.
//!
//! Exactly one instance exists at any time. The store creates it lazily with
//! placeholder defaults on first read; it is only ever updated, never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Address text used until an admin saves real settings.
pub const PLACEHOLDER_ADDRESS: &str = "Your Company\nStreet 1\n12345 City";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
  /// Free-text, possibly multi-line; the first line doubles as the
  /// company display name.
  pub address:    String,
  /// Logo image as a data URI, rendered into the report header.
  pub logo:       Option<String>,
  pub updated_at: DateTime<Utc>,
}

impl CompanySettings {
  /// The documented defaults returned before any admin update, and whenever
  /// the settings store is unreachable.
  pub fn placeholder(now: DateTime<Utc>) -> Self {
    Self {
      address:    PLACEHOLDER_ADDRESS.to_string(),
      logo:       None,
      updated_at: now,
    }
  }

  /// First address line, used where a bare company name is needed.
  pub fn display_name(&self) -> &str {
    self.address.lines().next().unwrap_or("")
  }
}

/// Partial update applied by [`crate::store::SettingsStore::update_settings`].
/// Absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
  pub address: Option<String>,
  pub logo:    Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_name_is_first_address_line() {
    let settings = CompanySettings {
      address:    "Acme GmbH\nHauptstr. 5\n10115 Berlin".to_string(),
      logo:       None,
      updated_at: Utc::now(),
    };
    assert_eq!(settings.display_name(), "Acme GmbH");
  }

  #[test]
  fn placeholder_has_no_logo() {
    let settings = CompanySettings::placeholder(Utc::now());
    assert!(settings.logo.is_none());
    assert_eq!(settings.address, PLACEHOLDER_ADDRESS);
  }
}
