//! The upload-and-link workflow: settings check, encode, publish, record.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::encoder::{self, LocalFile};
use crate::error::{LinkError, Result};
use crate::links;
use crate::publisher::{self, PublishRequest, Publisher};
use crate::storage::models::Settings;
use crate::storage::{HistoryStore, KeyValueStore, SettingsStore};

/// How a chosen file is turned into a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Templated GitHub Pages URL, no network.
    Pages,
    /// Inline Base64 data URL, no network.
    Data,
    /// Upload through the Contents API and record in history.
    #[default]
    Upload,
}

impl std::str::FromStr for Mode {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pages" => Ok(Mode::Pages),
            "data" => Ok(Mode::Data),
            "upload" | "" => Ok(Mode::Upload),
            other => Err(LinkError::validation(format!("Unknown link mode '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    Idle,
    Busy,
}

/// Result of one triggered workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Link(String),
    Failed(LinkError),
    /// Another workflow was in flight; nothing was done.
    Ignored,
}

/// Single-flight orchestrator. Only one file is processed at a time; files arriving
/// while busy are ignored rather than queued.
pub struct Workflow {
    settings: SettingsStore,
    history: HistoryStore,
    publisher: Arc<dyn Publisher>,
    busy: AtomicBool,
}

/// Returns the workflow to idle when dropped, on every exit path.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Workflow {
    pub fn new(kv: Arc<dyn KeyValueStore>, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            settings: SettingsStore::new(Arc::clone(&kv)),
            history: HistoryStore::new(kv),
            publisher,
            busy: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn state(&self) -> UiState {
        if self.busy.load(Ordering::Acquire) {
            UiState::Busy
        } else {
            UiState::Idle
        }
    }

    /// Handle a chosen or dropped file.
    pub async fn handle_file(&self, mode: Mode, file: LocalFile) -> Outcome {
        if self.state() == UiState::Busy {
            tracing::debug!(file_name = %file.name, "Ignoring file while busy");
            return Outcome::Ignored;
        }

        let settings = match self.settings.load() {
            Ok(settings) => settings.trimmed(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load settings");
                return Outcome::Failed(LinkError::Io(format!("Could not read settings: {e}")));
            }
        };

        // Completeness is checked before going busy, so a rejected file leaves no trace.
        if let Err(e) = check_settings(mode, &settings) {
            return Outcome::Failed(e);
        }

        let Some(_guard) = self.try_begin() else {
            return Outcome::Ignored;
        };

        match self.run(mode, &settings, &file).await {
            Ok(url) => {
                tracing::info!(file_name = %file.name, mode = ?mode, "Link ready");
                Outcome::Link(url)
            }
            Err(e) => {
                tracing::warn!(file_name = %file.name, mode = ?mode, kind = e.kind(), error = %e, "Link failed");
                Outcome::Failed(e)
            }
        }
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }

    async fn run(&self, mode: Mode, settings: &Settings, file: &LocalFile) -> Result<String> {
        match mode {
            Mode::Pages => links::pages_url(&settings.account, &settings.repository, &file.name),
            Mode::Data => links::data_url(file).await,
            Mode::Upload => {
                let data_url = encoder::encode(file).await?;
                let content = encoder::strip_data_url_prefix(&data_url)?;
                let request = PublishRequest::new(settings, file.name.clone(), content)?;
                let url = self.publisher.publish(&request).await?;

                // The upload already happened; a history write failure must not hide the link.
                if let Err(e) = self.history.append(&file.name, &url) {
                    tracing::warn!(error = %e, "Failed to record upload history");
                }
                Ok(url)
            }
        }
    }
}

fn check_settings(mode: Mode, settings: &Settings) -> Result<()> {
    match mode {
        Mode::Data => Ok(()),
        Mode::Pages => {
            if settings.account.is_empty() || settings.repository.is_empty() {
                Err(LinkError::validation(links::MISSING_LOCATION))
            } else {
                Ok(())
            }
        }
        Mode::Upload => publisher::check_settings(settings).map(|_| ()),
    }
}
