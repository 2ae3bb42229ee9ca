use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Client configuration wrapper.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    app: AppConfig,
    token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let server_url =
            std::env::var("GASAKBOARD_API_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let app = AppConfig::builder()
            .server_url(server_url)
            .build()
            .expect("default client config is valid");
        Self { app, token: None }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app, token: None })
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the bearer token
    pub fn token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> ClientConfig {
        ClientConfig::with_builder(
            AppConfig::builder().server_url("http://127.0.0.1:3000".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_config_new() {
        let config = local_config();
        assert_eq!(config.server_url(), "http://127.0.0.1:3000");
        assert!(config.token().is_none());
    }

    #[test]
    fn test_set_and_clear_token() {
        let mut config = local_config();
        config.set_token(Some("test_token".to_string()));
        assert_eq!(config.token(), Some(&"test_token".to_string()));
        config.clear_token();
        assert!(config.token().is_none());
    }

    #[test]
    fn test_api_url() {
        let config = local_config();
        let url = config.api_url("/api/kanban/boards");
        assert_eq!(url, "http://127.0.0.1:3000/api/kanban/boards");
    }
}
