//! Service layer for the crawler application.
//!
//! This module contains the crawling logic:
//! - Feed front-end HTTP client (`FeedClient`)
//! - Channel page extraction (`ChannelPage`)
//! - Message fragment extraction (`MessageFragment`)
//! - Per-channel history orchestration (`ChannelCrawler`)

mod channel;
mod client;
mod history;
mod message;

pub use channel::ChannelPage;
pub use client::FeedClient;
pub use history::{ChannelCrawler, ChannelHistory};
pub use message::MessageFragment;
