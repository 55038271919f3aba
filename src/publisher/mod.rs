mod github;

pub use github::GitHubPublisher;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::{LinkError, Result};
use crate::links::encode_component;
use crate::storage::models::Settings;

/// Every upload targets this branch.
pub const BRANCH: &str = "main";

pub const MISSING_UPLOAD_SETTINGS: &str =
    "Please enter the GitHub username, repository, and access token.";

/// Trimmed copy of `settings`, or a validation error when any of account,
/// repository, or credential is blank or is not a usable path segment.
pub fn check_settings(settings: &Settings) -> Result<Settings> {
    let settings = settings.trimmed();
    if settings.account.is_empty()
        || settings.repository.is_empty()
        || settings.credential.is_empty()
    {
        return Err(LinkError::validation(MISSING_UPLOAD_SETTINGS));
    }
    for (what, value) in [
        ("username", &settings.account),
        ("repository", &settings.repository),
    ] {
        if is_dot_segment(value) {
            return Err(LinkError::validation(format!(
                "'{value}' is not a valid GitHub {what}."
            )));
        }
    }
    Ok(settings)
}

/// `.` and `..` are resolved away by URL parsing even when percent-encoded.
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// A validated create-or-update request for one file at the repository root.
#[derive(Clone)]
pub struct PublishRequest {
    account: String,
    repository: String,
    credential: String,
    file_name: String,
    content: String,
}

impl std::fmt::Debug for PublishRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishRequest")
            .field("account", &self.account)
            .field("repository", &self.repository)
            .field("file_name", &self.file_name)
            .field("content_len", &self.content.len())
            .finish_non_exhaustive()
    }
}

impl PublishRequest {
    /// Fails with a validation error when the settings are incomplete (see
    /// [`check_settings`]) or the file name is empty, `.` or `..`.
    pub fn new(
        settings: &Settings,
        file_name: impl Into<String>,
        base64_content: impl Into<String>,
    ) -> Result<Self> {
        let settings = check_settings(settings)?;
        let file_name = file_name.into();
        if file_name.is_empty() || is_dot_segment(&file_name) {
            return Err(LinkError::validation("File name cannot be empty, '.' or '..'."));
        }
        Ok(Self {
            account: settings.account,
            repository: settings.repository,
            credential: settings.credential,
            file_name,
            content: base64_content.into(),
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn commit_message(&self) -> String {
        format!("Upload {}", self.file_name)
    }

    /// `<base>/repos/{account}/{repository}/contents/{file_name}` with every segment
    /// escaped on its own.
    pub fn contents_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let path = format!(
            "{}/repos/{}/{}/contents/{}",
            base.path().trim_end_matches('/'),
            encode_component(&self.account),
            encode_component(&self.repository),
            encode_component(&self.file_name),
        );
        url.set_path(&path);
        url.set_query(None);
        url
    }
}

/// Writes a file to a remote repository and returns its public download URL.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, request: &PublishRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::new("al", "r1", "tok")
    }

    #[test]
    fn request_requires_every_setting() {
        for s in [
            Settings::new("", "r1", "tok"),
            Settings::new("al", "", "tok"),
            Settings::new("al", "r1", ""),
            Settings::new("al", "r1", "   "),
        ] {
            let err = PublishRequest::new(&s, "x.txt", "eA==").unwrap_err();
            assert_eq!(err, LinkError::validation(MISSING_UPLOAD_SETTINGS));
        }
    }

    #[test]
    fn request_trims_settings() {
        let req = PublishRequest::new(&Settings::new(" al ", " r1 ", " tok "), "x", "").unwrap();
        assert_eq!(req.account(), "al");
        assert_eq!(req.repository(), "r1");
        assert_eq!(req.credential(), "tok");
    }

    #[test]
    fn contents_url_escapes_each_segment() {
        let req = PublishRequest::new(&settings(), "my file/../x?.png", "").unwrap();
        let url = req.contents_url(&Url::parse("https://api.github.com").unwrap());
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/al/r1/contents/my%20file%2F..%2Fx%3F.png"
        );
    }

    #[test]
    fn request_rejects_dot_segments() {
        for name in ["", ".", ".."] {
            let err = PublishRequest::new(&settings(), name, "").unwrap_err();
            assert!(matches!(err, LinkError::Validation(_)), "{name:?}: {err:?}");
        }
        for s in [Settings::new("..", "r1", "tok"), Settings::new("al", ".", "tok")] {
            let err = PublishRequest::new(&s, "x.txt", "").unwrap_err();
            assert!(matches!(err, LinkError::Validation(_)), "{s:?}: {err:?}");
        }
    }

    #[test]
    fn dotted_names_stay_under_contents() {
        let base = Url::parse("https://api.github.com").unwrap();
        for name in ["...", ".hidden", "..x"] {
            let req = PublishRequest::new(&settings(), name, "").unwrap();
            assert_eq!(
                req.contents_url(&base).as_str(),
                format!("https://api.github.com/repos/al/r1/contents/{name}")
            );
        }
    }

    #[test]
    fn contents_url_keeps_base_path_prefix() {
        let req = PublishRequest::new(&settings(), "x.txt", "").unwrap();
        let url = req.contents_url(&Url::parse("http://127.0.0.1:9000/api/v3/").unwrap());
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/api/v3/repos/al/r1/contents/x.txt"
        );
    }

    #[test]
    fn debug_hides_credential() {
        let req = PublishRequest::new(&settings(), "x.txt", "").unwrap();
        assert!(!format!("{req:?}").contains("tok"));
    }
}
