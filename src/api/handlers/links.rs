use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::api::response::{ApiError, JSend};
use crate::encoder::LocalFile;
use crate::error::LinkError;
use crate::workflow::{Mode, Outcome};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub mode: Mode,
    pub url: String,
}

/// Multipart fields: `file` (required) and `mode` (`pages`, `data` or `upload`).
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<JSend<LinkResponse>>, ApiError> {
    let mut file: Option<LocalFile> = None;
    let mut mode = Mode::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| ApiError::bad_request("file field must carry a file name"))?;
                let content_type = field.content_type().map(|s| s.to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;

                if data.len() as u64 > state.config.max_upload_size {
                    return Err(ApiError::payload_too_large(format!(
                        "File exceeds maximum upload size of {} bytes",
                        state.config.max_upload_size
                    )));
                }

                let mut local = LocalFile::from_bytes(file_name, data);
                if let Some(ct) = content_type {
                    local = local.with_content_type(ct);
                }
                file = Some(local);
            }
            "mode" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid mode: {e}")))?;
                mode = text
                    .parse()
                    .map_err(|e: LinkError| ApiError::bad_request(e.to_string()))?;
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let file = file.ok_or_else(|| ApiError::bad_request("file field is required"))?;

    match state.workflow.handle_file(mode, file).await {
        Outcome::Link(url) => Ok(JSend::success(LinkResponse { mode, url })),
        Outcome::Failed(e) => Err(e.into()),
        Outcome::Ignored => Err(ApiError::conflict(
            "Another file is still being processed",
        )),
    }
}
