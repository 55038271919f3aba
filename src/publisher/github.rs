use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use super::{PublishRequest, Publisher, BRANCH};
use crate::error::{LinkError, Result};

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// Publisher backed by the GitHub Contents API (`PUT /repos/.../contents/...`).
pub struct GitHubPublisher {
    api_base: Url,
    client: Client,
}

#[derive(Serialize)]
struct PutContentsBody<'a> {
    message: String,
    content: &'a str,
    branch: &'a str,
}

#[derive(Deserialize)]
struct PutContentsResponse {
    content: Option<ContentInfo>,
}

#[derive(Deserialize)]
struct ContentInfo {
    download_url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl GitHubPublisher {
    pub fn new(api_base: &str) -> Result<Self, anyhow::Error> {
        let api_base = Url::parse(api_base)?;
        let client = Client::builder()
            .user_agent(concat!("pagelink/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { api_base, client })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }
}

#[async_trait]
impl Publisher for GitHubPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<String> {
        let url = request.contents_url(&self.api_base);
        let body = PutContentsBody {
            message: request.commit_message(),
            content: request.content(),
            branch: BRANCH,
        };

        tracing::debug!(
            account = %request.account(),
            repository = %request.repository(),
            file_name = %request.file_name(),
            "Publishing file"
        );

        let resp = self
            .client
            .put(url)
            .header(AUTHORIZATION, format!("token {}", request.credential()))
            .header(ACCEPT, ACCEPT_V3)
            .json(&body)
            .send()
            .await
            .map_err(|e| LinkError::Network(format!("Network error while uploading: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| LinkError::Network(format!("Network error while uploading: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Upload failed (HTTP {})", status.as_u16()));
            tracing::debug!(status = status.as_u16(), message = %message, "Upload rejected");
            return Err(LinkError::Remote(message));
        }

        serde_json::from_str::<PutContentsResponse>(&text)
            .ok()
            .and_then(|r| r.content)
            .and_then(|c| c.download_url)
            .ok_or_else(|| LinkError::format("Upload response did not include a download URL"))
    }
}
