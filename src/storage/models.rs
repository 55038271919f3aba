use serde::{Deserialize, Serialize};

/// Target location and credential for remote uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub credential: String,
}

impl Settings {
    pub fn new(
        account: impl Into<String>,
        repository: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            repository: repository.into(),
            credential: credential.into(),
        }
    }

    /// Copy of these settings with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.account.trim(),
            self.repository.trim(),
            self.credential.trim(),
        )
    }
}

/// One successful upload. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub url: String,
    /// ISO 8601 upload time (e.g., "2026-02-11T08:30:00.000Z").
    #[serde(rename = "date")]
    pub timestamp: String,
}
