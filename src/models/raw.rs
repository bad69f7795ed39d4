// src/models/raw.rs

//! Raw field structures produced by the markup extractors.
//!
//! These mirror what a single fetched fragment actually contains; the
//! transform step maps them into the typed output records in `post.rs`.

use chrono::{DateTime, FixedOffset};

/// All fields extracted from one message fragment.
///
/// Every field degrades independently: a malformed attribute leaves its
/// field at the default without affecting siblings.
#[derive(Debug, Clone, Default)]
pub struct RawMessage {
    /// Channel handle decoded from the message permalink
    pub channel: Option<String>,

    /// Numeric peer id, resolved from fragment metadata by the orchestrator
    pub channel_id: Option<String>,

    /// Message permalink with its query stripped
    pub link: Option<String>,

    /// Numeric message id decoded from the permalink
    pub id: Option<i64>,

    /// View count with shorthand counts expanded
    pub views: u64,

    /// Publish instant from the fragment's last timestamp element
    pub publish_datetime: Option<DateTime<FixedOffset>>,

    /// Unix timestamp derived from `publish_datetime`
    pub publish_timestamp: Option<i64>,

    /// Message text with literal line breaks normalized
    pub text: Option<String>,

    /// Author label, present on channels that sign posts
    pub author: Option<String>,

    /// Message id this post replies to
    pub reply_to: Option<i64>,

    /// Album membership details
    pub album: AlbumInfo,

    /// Forwarded-from header, if the post re-shares another post
    pub forwarded: Option<RawForwardedInfo>,

    /// Type-discriminated content payload
    pub content: MessageContent,
}

impl RawMessage {
    /// Whether this message is an album placeholder whose content lives in
    /// the linked sibling posts.
    pub fn is_album(&self) -> bool {
        matches!(self.content, MessageContent::Album)
    }
}

/// Content payload carried by a message, exactly one variant per message.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MessageContent {
    /// Plain text post (also the fallback when no detector matches)
    #[default]
    Text,
    Photo(PhotoDetails),
    Video(VideoDetails),
    Audio(AudioDetails),
    Poll(PollDetails),
    /// Grouped placeholder; the real content is in `AlbumInfo::messages`
    Album,
}

/// Album membership extracted from a grouped message wrapper.
#[derive(Debug, Clone, Default)]
pub struct AlbumInfo {
    /// Permalinks of the sibling posts forming the group, in display order
    pub message_links: Vec<String>,

    /// Sibling posts resolved by the orchestrator
    pub messages: Vec<RawMessage>,
}

/// Header of a forwarded post, pointing back at the original.
#[derive(Debug, Clone, Default)]
pub struct RawForwardedInfo {
    /// Display name of the original author or channel
    pub user_name: Option<String>,

    /// Channel handle decoded from the original's permalink
    pub channel: Option<String>,

    /// Numeric peer id of the original's channel, resolved on fetch
    pub channel_id: Option<String>,

    /// Message id of the original post
    pub message_id: Option<i64>,

    /// Permalink of the original post
    pub link: Option<String>,

    /// Publish instant of the original, filled once the original is fetched
    pub publish_datetime: Option<DateTime<FixedOffset>>,

    /// The fetched original post itself
    pub message: Option<Box<RawMessage>>,
}

/// Photo payload details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoDetails {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: Option<String>,
}

/// Video payload details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDetails {
    pub duration: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: Option<String>,
    pub thumb_url: Option<String>,
}

/// Audio payload details. Duration is not reliably present in the embed
/// fragment and stays unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioDetails {
    pub duration: Option<u64>,
    pub title: Option<String>,
    pub performer: Option<String>,
}

/// Poll payload details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollDetails {
    pub voters: u64,
    pub question: Option<String>,
    pub options: Vec<String>,
    pub is_quiz: Option<bool>,
}

/// Per-channel publisher metadata from the channel page header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelProfile {
    pub avatar_url: Option<String>,
    pub title: Option<String>,
    pub user_name: Option<String>,
    pub subscribers_count: u64,
    pub photos_count: u64,
    pub videos_count: u64,
    pub files_count: u64,
    pub links_count: u64,
    pub description: Option<String>,
}
