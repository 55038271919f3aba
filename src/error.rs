use thiserror::Error;

/// Every way producing a link can fail.
///
/// The `Display` output is the message shown to the user, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// Required settings missing before any I/O happened.
    #[error("{0}")]
    Validation(String),
    /// The local file could not be read.
    #[error("{0}")]
    Io(String),
    /// Malformed intermediate data.
    #[error("{0}")]
    Format(String),
    /// The remote host never answered.
    #[error("{0}")]
    Network(String),
    /// The remote host answered with a failure.
    #[error("{0}")]
    Remote(String),
}

impl LinkError {
    pub fn validation(message: impl Into<String>) -> Self {
        LinkError::Validation(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        LinkError::Format(message.into())
    }

    /// Short machine-readable kind, used in logs and API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            LinkError::Validation(_) => "validation",
            LinkError::Io(_) => "io",
            LinkError::Format(_) => "format",
            LinkError::Network(_) => "network",
            LinkError::Remote(_) => "remote",
        }
    }
}

pub type Result<T, E = LinkError> = std::result::Result<T, E>;
