//! Link generation that never leaves the machine.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::encoder::{self, LocalFile};
use crate::error::{LinkError, Result};

/// Characters escaped in a single URL path segment, matching `encodeURIComponent`.
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const MISSING_LOCATION: &str = "Please enter the GitHub username and repository.";

pub fn encode_component(segment: &str) -> String {
    utf8_percent_encode(segment, URI_COMPONENT).to_string()
}

/// Predictable GitHub Pages URL for a file at the root of `repository`.
pub fn pages_url(account: &str, repository: &str, file_name: &str) -> Result<String> {
    let account = account.trim();
    let repository = repository.trim();
    if account.is_empty() || repository.is_empty() {
        return Err(LinkError::validation(MISSING_LOCATION));
    }
    Ok(format!(
        "https://{account}.github.io/{repository}/{}",
        encode_component(file_name)
    ))
}

/// Inline data URL for `file`.
pub async fn data_url(file: &LocalFile) -> Result<String> {
    encoder::encode(file).await
}
