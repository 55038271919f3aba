//! File-to-data-URL encoding.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

use crate::error::{LinkError, Result};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Where a file's bytes come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Already buffered, e.g. a multipart part.
    Memory(Bytes),
    /// Read from disk when encoded.
    Path(PathBuf),
}

/// A user-chosen file: its name, optional declared type, and content.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub content_type: Option<String>,
    pub source: FileSource,
}

impl LocalFile {
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            source: FileSource::Memory(data.into()),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            name,
            content_type: None,
            source: FileSource::Path(path),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// MIME type: the declared type unless generic, else guessed from the name.
    pub fn mime_type(&self) -> String {
        self.content_type
            .clone()
            .filter(|ct| !ct.is_empty() && ct != FALLBACK_MIME)
            .or_else(|| mime_guess::from_path(&self.name).first().map(|m| m.to_string()))
            .unwrap_or_else(|| FALLBACK_MIME.to_string())
    }

    /// Read the whole content.
    pub async fn read(&self) -> Result<Bytes> {
        match &self.source {
            FileSource::Memory(data) => Ok(data.clone()),
            FileSource::Path(path) => tokio::fs::read(path).await.map(Bytes::from).map_err(|e| {
                tracing::debug!(path = %path.display(), error = %e, "Failed to read file");
                LinkError::Io(format!("Could not read file '{}': {e}", path.display()))
            }),
        }
    }
}

/// Encode a file as `data:<mime>;base64,<payload>`.
pub async fn encode(file: &LocalFile) -> Result<String> {
    let data = file.read().await?;
    Ok(format!(
        "data:{};base64,{}",
        file.mime_type(),
        STANDARD.encode(&data)
    ))
}

/// Everything after the first comma of a data URL.
pub fn strip_data_url_prefix(data_url: &str) -> Result<&str> {
    data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .ok_or_else(|| LinkError::format("Malformed data URL: missing ',' separator"))
}
