use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    /// Directory holding the persistent key-value store
    pub data_dir: String,
    /// Base URL of the repository host API
    pub github_api_url: String,
    /// Maximum upload size in bytes
    pub max_upload_size: u64,
}

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            data_dir: "./data".to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            max_upload_size: 25 * 1024 * 1024, // 25MB
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let bind_address = std::env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address);

        let data_dir = std::env::var("DATA_DIR").unwrap_or(defaults.data_dir);

        let github_api_url = std::env::var("GITHUB_API_URL")
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.github_api_url);

        let max_upload_size = match std::env::var("MAX_UPLOAD_SIZE") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "MAX_UPLOAD_SIZE must be a number of bytes, got '{raw}'"
                ))
            })?,
            Err(_) => defaults.max_upload_size,
        };

        let config = Config {
            bind_address,
            data_dir,
            github_api_url,
            max_upload_size,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "DATA_DIR cannot be empty".to_string(),
            ));
        }

        if self.max_upload_size == 0 {
            return Err(ConfigError::ValidationError(
                "MAX_UPLOAD_SIZE must be greater than 0".to_string(),
            ));
        }

        match Url::parse(&self.github_api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "GITHUB_API_URL must be an absolute http(s) URL, got '{}'",
                    self.github_api_url
                )));
            }
        }

        if !self.bind_address.starts_with("127.") && !self.bind_address.starts_with("localhost")
        {
            tracing::warn!(
                "Binding to {} exposes stored credentials to the network.",
                self.bind_address
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_upload_size() {
        let config = Config {
            max_upload_size: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("MAX_UPLOAD_SIZE"), "got: {err}");
    }

    #[test]
    fn rejects_non_http_api_url() {
        for bad in ["not a url", "ftp://example.com", "mailto:x@example.com"] {
            let config = Config {
                github_api_url: bad.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{bad} should be rejected");
        }
    }
}
