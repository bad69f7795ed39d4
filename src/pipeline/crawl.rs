// src/pipeline/crawl.rs

//! Channel crawling pipeline.
//!
//! For every channel: fetch its history, merge album groups, transform
//! each logical post into a typed record, and hand it to the sink.

use crate::error::Result;
use crate::metrics::PostCounter;
use crate::models::{ChannelList, Config};
use crate::services::ChannelCrawler;
use crate::storage::PostSink;
use crate::transform::transform;

/// Run the crawler over every channel in the list.
///
/// A channel that fails mid-crawl contributes whatever was gathered before
/// the failure; no failure stops the overall run.
pub async fn run_crawler(
    config: &Config,
    channels: &ChannelList,
    sink: &mut dyn PostSink,
    counter: &PostCounter,
) -> Result<()> {
    let crawler = ChannelCrawler::new(config)?;
    let limit = config.crawler.posts_per_channel;
    let base_url = config.crawler.base();

    log::info!("crawling {} channels, {limit} posts each", channels.len());

    for channel in channels.iter() {
        log::info!("processing {channel}");

        let history = crawler.fetch_history(channel, limit).await;
        counter.add(history.messages.len() as u64);

        for message in &history.messages {
            let record = if message.is_album() {
                // An album that resolved to no children has nothing to emit.
                if message.album.messages.is_empty() {
                    log::warn!(
                        "dropping empty album group {} from {channel}",
                        message.id.unwrap_or_default()
                    );
                    continue;
                }
                transform(&message.album.messages, history.publisher.as_ref(), base_url)
            } else {
                transform(
                    std::slice::from_ref(message),
                    history.publisher.as_ref(),
                    base_url,
                )
            };

            if let Some(post) = record {
                sink.save(&post).await?;
            }
        }
    }

    log::info!("run complete, {} posts fetched", counter.total());
    Ok(())
}
