//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Input/output file locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.base_url.trim().is_empty() {
            return Err(AppError::validation("crawler.base_url is empty"));
        }
        if url::Url::parse(&self.crawler.base_url).is_err() {
            return Err(AppError::validation("crawler.base_url is not a valid URL"));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_retries == 0 {
            return Err(AppError::validation("crawler.max_retries must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.crawler.posts_per_channel == 0 {
            return Err(AppError::validation("crawler.posts_per_channel must be > 0"));
        }
        if self.paths.channels_file.trim().is_empty() {
            return Err(AppError::validation("paths.channels_file is empty"));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Base URL of the feed front-end
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Attempts per logical fetch before giving up
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Maximum concurrent single-post fragment requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Posts to accumulate per channel before stopping
    #[serde(default = "defaults::posts_per_channel")]
    pub posts_per_channel: usize,

    /// Optional proxy URL applied to all requests (e.g. socks5h://host:port)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

impl CrawlerConfig {
    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_retries: defaults::max_retries(),
            max_concurrent: defaults::max_concurrent(),
            posts_per_channel: defaults::posts_per_channel(),
            proxy: None,
        }
    }
}

/// Input/output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// File listing channel names to crawl, one per line
    #[serde(default = "defaults::channels_file")]
    pub channels_file: String,

    /// Output JSONL file; absent means stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            channels_file: defaults::channels_file(),
            output_file: None,
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn base_url() -> String {
        "https://t.me".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:94.0) Gecko/20100101 Firefox/94.0".into()
    }
    pub fn timeout() -> u64 {
        5
    }
    pub fn max_retries() -> u32 {
        3
    }
    pub fn max_concurrent() -> usize {
        5
    }
    pub fn posts_per_channel() -> usize {
        20
    }

    // Path defaults
    pub fn channels_file() -> String {
        "data/channels.txt".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_retries() {
        let mut config = Config::default();
        config.crawler.max_retries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.crawler.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_strips_trailing_slash() {
        let mut config = CrawlerConfig::default();
        config.base_url = "https://t.me/".to_string();
        assert_eq!(config.base(), "https://t.me");
    }

    #[test]
    fn parse_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[crawler]\ntimeout_secs = 9\n").unwrap();
        assert_eq!(config.crawler.timeout_secs, 9);
        assert_eq!(config.crawler.max_retries, 3);
        assert_eq!(config.crawler.base_url, "https://t.me");
    }
}
