use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppQuery, JSend, JSendPaginated, Pagination};
use crate::storage::models::HistoryEntry;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    /// Position in the full list; pass back to delete.
    pub index: usize,
    pub name: String,
    pub url: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub removed: Option<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ListHistoryParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    50
}

pub async fn list_history(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<ListHistoryParams>,
) -> Result<Json<JSendPaginated<HistoryItem>>, ApiError> {
    if params.limit == 0 {
        return Err(ApiError::bad_request("limit must be greater than 0"));
    }

    let entries = state.workflow.history().list();
    let total = entries.len() as u64;
    let items = entries
        .into_iter()
        .enumerate()
        .skip(params.offset as usize)
        .take(params.limit as usize)
        .map(|(index, e)| HistoryItem {
            index,
            name: e.name,
            url: e.url,
            date: e.timestamp,
        })
        .collect();

    Ok(JSendPaginated::success(
        items,
        Pagination {
            limit: params.limit,
            offset: params.offset,
            total,
        },
    ))
}

/// Remove one entry by position. Out-of-range positions succeed with nothing removed.
pub async fn delete_history(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
) -> Result<Json<JSend<DeleteResponse>>, ApiError> {
    let index: usize = index
        .parse()
        .map_err(|_| ApiError::bad_request("index must be a non-negative integer"))?;

    let removed = state.workflow.history().remove_at(index)?;
    if let Some(ref entry) = removed {
        tracing::debug!(index, name = %entry.name, "Deleted history entry");
    }
    Ok(JSend::success(DeleteResponse { removed }))
}
