// src/services/client.rs

//! HTTP client for the channel feed front-end.
//!
//! Wraps the three request shapes the front-end understands: the channel
//! root page, the AJAX "load more" page, and single-post embed fragments.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Stateless feed client, safe to share across channel crawls.
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    max_concurrent: usize,
}

impl FeedClient {
    /// Create a configured client.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs));

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base().to_string(),
            max_retries: config.max_retries.max(1),
            max_concurrent: config.max_concurrent.max(1),
        })
    }

    /// GET a channel's feed root page.
    ///
    /// Succeeds only if the response lands on the requested URL; a redirect
    /// usually means the channel does not exist or was renamed.
    pub async fn fetch_channel_page(&self, channel: &str) -> Result<Html> {
        let url = format!("{}/s/{}", self.base_url, channel);
        let (final_url, document) = self.request_document(&url, false, false).await?;
        if final_url != url {
            return Err(AppError::fetch(&url, format!("redirected to {final_url}")));
        }
        Ok(document)
    }

    /// Fetch an older page via its pagination cursor.
    ///
    /// The front-end expects an AJAX-marked POST and answers with a JSON
    /// envelope holding the page markup.
    pub async fn fetch_older_page(&self, cursor: &str) -> Result<Html> {
        let url = if cursor.starts_with("http://") || cursor.starts_with("https://") {
            cursor.to_string()
        } else {
            format!("{}{}", self.base_url, cursor)
        };
        let (_, document) = self.request_document(&url, true, true).await?;
        Ok(document)
    }

    /// GET the single-post embed view used for album members and forwards.
    pub async fn fetch_post_fragment(&self, post_url: &str) -> Result<Html> {
        let url = format!("{post_url}?embed=1&single=1");
        let (_, document) = self.request_document(&url, false, false).await?;
        Ok(document)
    }

    /// Fetch many single-post fragments with bounded parallelism.
    ///
    /// Output order matches input order; each URL fails independently.
    pub async fn fetch_post_fragments(&self, post_urls: &[String]) -> Vec<Result<Html>> {
        stream::iter(post_urls)
            .map(|url| self.fetch_post_fragment(url))
            .buffered(self.max_concurrent)
            .collect()
            .await
    }

    /// Issue one logical request, retrying transient failures.
    ///
    /// Transient means transport errors (timeout, connection, proxy, TLS)
    /// and malformed bodies; a non-success status fails immediately.
    async fn request_document(
        &self,
        url: &str,
        xhr_post: bool,
        json_envelope: bool,
    ) -> Result<(String, Html)> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_retries {
            if attempt > 1 {
                log::debug!(
                    "retrying {url} (attempt {attempt}/{}): {last_error}",
                    self.max_retries
                );
            }

            let request = if xhr_post {
                self.client
                    .post(url)
                    .header("X-Requested-With", "XMLHttpRequest")
            } else {
                self.client.get(url)
            };

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    last_error = e.to_string();
                    continue;
                }
            };

            let status = response.status();
            let final_url = response.url().to_string();
            if !status.is_success() {
                return Err(AppError::fetch(url, format!("HTTP status {status}")));
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    last_error = e.to_string();
                    continue;
                }
            };

            let markup = if json_envelope {
                match serde_json::from_str::<String>(&body) {
                    Ok(markup) => markup,
                    Err(e) => {
                        last_error = format!("malformed JSON envelope: {e}");
                        continue;
                    }
                }
            } else {
                body
            };

            return Ok((final_url, Html::parse_document(&markup)));
        }

        Err(AppError::fetch(
            url,
            format!(
                "no usable response after {} attempts: {last_error}",
                self.max_retries
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_from_default_config() {
        assert!(FeedClient::new(&CrawlerConfig::default()).is_ok());
    }

    #[test]
    fn test_client_rejects_malformed_proxy() {
        let mut config = CrawlerConfig::default();
        config.proxy = Some("::not-a-proxy::".to_string());
        assert!(FeedClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_fetch_post_fragments_empty_input() {
        let client = FeedClient::new(&CrawlerConfig::default()).unwrap();
        assert!(client.fetch_post_fragments(&[]).await.is_empty());
    }
}
