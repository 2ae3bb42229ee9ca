//! Application configuration module
//!
//! Provides configuration types for the application.

use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Server URL
    pub server_url: Option<String>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: String) -> Self {
        self.server_url = Some(url);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        if let Some(url) = &self.server_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(AppConfig {
            server_url: self.server_url,
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accepts_http_url() {
        let config = AppConfig::builder()
            .server_url("http://127.0.0.1:3000".to_string())
            .build()
            .unwrap();
        assert_eq!(config.server_url.as_deref(), Some("http://127.0.0.1:3000"));
    }

    #[test]
    fn test_builder_rejects_bare_host() {
        let result = AppConfig::builder()
            .server_url("127.0.0.1:3000".to_string())
            .build();
        assert!(result.is_err());
    }
}
