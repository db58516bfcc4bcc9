//! Client configuration.

use std::time::Duration;
use url::Url;

/// The page every section is read from.
pub const DEFAULT_URL: &str = "http://www.drudgereport.com";

/// Transport timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`Client`](crate::Client) and its HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Address fetched on every cache miss. Relative links on the page are
    /// resolved against it.
    pub url: Url,
    /// Upper bound on a single GET, connect through body.
    pub timeout: Duration,
    /// Sent with every request; defaults to `drudge/<version>`.
    pub user_agent: String,
}

impl ClientConfig {
    /// Read from `url` instead of the default front page.
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    /// Bound each fetch by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

fn default_url() -> Url {
    Url::parse(DEFAULT_URL).expect("DEFAULT_URL is a valid URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.url.as_str(), "http://www.drudgereport.com/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("drudge/"));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_url(Url::parse("http://localhost:8080/").unwrap())
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.url.port(), Some(8080));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
