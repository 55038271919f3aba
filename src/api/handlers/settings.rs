use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppJson, JSend};
use crate::storage::models::Settings;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsBody {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub credential: String,
}

impl From<Settings> for SettingsBody {
    fn from(s: Settings) -> Self {
        Self {
            account: s.account,
            repository: s.repository,
            credential: s.credential,
        }
    }
}

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JSend<SettingsBody>>, ApiError> {
    let settings = state.workflow.settings().load()?;
    Ok(JSend::success(settings.into()))
}

/// Replace all three settings at once; omitted fields are saved as empty.
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<SettingsBody>,
) -> Result<Json<JSend<SettingsBody>>, ApiError> {
    let store = state.workflow.settings();
    store.save(&Settings::new(body.account, body.repository, body.credential))?;
    let saved = store.load()?;
    Ok(JSend::success(saved.into()))
}
