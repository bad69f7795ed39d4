// src/services/history.rs

//! Per-channel crawl orchestrator.
//!
//! Drives pagination backward through a channel's history, resolving album
//! members and forwarded originals one level deep, until the configured
//! post count is reached or the history is exhausted. Every failure past
//! the root fetch degrades to a partial result instead of an error.

use crate::error::Result;
use crate::models::{ChannelProfile, Config, RawMessage};
use crate::services::channel::ChannelPage;
use crate::services::client::FeedClient;
use crate::services::message::MessageFragment;

/// Everything gathered from one channel crawl.
#[derive(Debug, Default)]
pub struct ChannelHistory {
    /// Resolved messages, newest to oldest.
    ///
    /// A list shorter than the requested limit means the history ran out
    /// or a page fetch failed; the output does not distinguish the two.
    pub messages: Vec<RawMessage>,

    /// Publisher metadata from the first page, if the root fetch succeeded.
    pub publisher: Option<ChannelProfile>,
}

/// Crawls one channel at a time through a shared [`FeedClient`].
pub struct ChannelCrawler {
    client: FeedClient,
}

impl ChannelCrawler {
    /// Create a crawler with its own feed client.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: FeedClient::new(&config.crawler)?,
        })
    }

    /// Fetch up to `limit` messages from a channel's history.
    pub async fn fetch_history(&self, channel: &str, limit: usize) -> ChannelHistory {
        let mut history = ChannelHistory::default();
        let mut cursor: Option<String> = None;

        loop {
            log::info!(
                "gathering messages from {channel}, cursor {}",
                cursor.as_deref().unwrap_or("(root)")
            );

            let fetched = match &cursor {
                None => self.client.fetch_channel_page(channel).await,
                Some(cursor) => self.client.fetch_older_page(cursor).await,
            };
            let page = match fetched {
                Ok(document) => ChannelPage::new(document),
                Err(error) => {
                    log::warn!("history of {channel} cut short: {error}");
                    break;
                }
            };

            // Publisher info exists on the root page only; never overwrite it.
            if history.publisher.is_none() {
                history.publisher = page.publisher_info();
            }

            for fragment in page.messages() {
                if history.messages.len() >= limit {
                    break;
                }

                let fragment = MessageFragment::new(fragment);
                let mut message = fragment.parse();
                message.channel_id = fragment.channel_id();

                if message.is_album() {
                    self.resolve_album(&mut message).await;
                }
                if message.forwarded.is_some() {
                    self.resolve_forward(&mut message).await;
                }

                history.messages.push(message);
            }

            if history.messages.len() >= limit {
                break;
            }
            match page.cursor() {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        log::info!(
            "gathered {} messages from {channel}",
            history.messages.len()
        );
        history
    }

    /// Fetch and parse an album placeholder's sibling posts.
    ///
    /// Children keep the link order. A failed sibling is dropped and
    /// logged; the album itself survives, possibly empty.
    async fn resolve_album(&self, message: &mut RawMessage) {
        let results = self
            .client
            .fetch_post_fragments(&message.album.message_links)
            .await;

        for result in results {
            match result {
                Ok(document) => {
                    let mut child = MessageFragment::from_document(&document).parse();
                    child.channel_id = message.channel_id.clone();
                    message.album.messages.push(child);
                }
                Err(error) => {
                    log::warn!(
                        "album member of message {} failed: {error}",
                        message.id.unwrap_or_default()
                    );
                }
            }
        }
    }

    /// Fetch the original of a forwarded post and copy its resolved
    /// channel id and publish instant into the forward header.
    ///
    /// On failure the header fields extracted from the fragment remain as
    /// they were, with no nested message.
    async fn resolve_forward(&self, message: &mut RawMessage) {
        let Some(link) = message.forwarded.as_ref().and_then(|f| f.link.clone()) else {
            return;
        };

        match self.client.fetch_post_fragment(&link).await {
            Ok(document) => {
                let fragment = MessageFragment::from_document(&document);
                let original = fragment.parse();
                if let Some(forwarded) = message.forwarded.as_mut() {
                    forwarded.channel_id = fragment.channel_id();
                    forwarded.publish_datetime = original.publish_datetime;
                    forwarded.message = Some(Box::new(original));
                }
            }
            Err(error) => {
                log::warn!(
                    "forward resolution of message {} failed: {error}",
                    message.id.unwrap_or_default()
                );
            }
        }
    }
}
