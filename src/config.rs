// src/config.rs
// =============================================================================
// Settings for the GitHub client.
//
// Everything has a sensible default, so ClientConfig::default() talks to
// public github.com anonymously. The CLI fills in the token (from --token or
// GITHUB_TOKEN), the request timeout and optionally a different API base for
// GitHub Enterprise. Which branch or tag to read is not a client setting; it
// travels with the RepoReference.
// =============================================================================

use std::time::Duration;

use url::Url;

/// Public GitHub REST API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Per-request transport timeout. There is no timeout across the whole run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API (e.g. https://ghe.example.com/api/v3)
    pub api_base: Url,
    /// Personal access token; None restricts us to public repositories
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            token: None,
            user_agent: format!("repo-bundle/{}", env!("CARGO_PKG_VERSION")),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    // Empty tokens (e.g. `GITHUB_TOKEN=` in a .env file) count as no token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base.as_str(), "https://api.github.com/");
        assert!(config.token.is_none());
        assert!(config.user_agent.starts_with("repo-bundle/"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = ClientConfig::default().with_token(Some("  ".to_string()));
        assert!(config.token.is_none());

        let config = ClientConfig::default().with_token(Some("ghp_abc".to_string()));
        assert_eq!(config.token.as_deref(), Some("ghp_abc"));
    }

    #[test]
    fn test_with_timeout() {
        let config = ClientConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
