// src/transform.rs

//! Maps raw extracted messages into typed post records.
//!
//! A single raw message maps one-to-one; several raw messages are the
//! resolved members of one album and merge into a single ALBUM record.

use crate::models::{
    AudioInfo, ChannelProfile, ForwardedInfo, MediaInfo, MessageContent, PhotoInfo, PollAnswer,
    PollInfo, Post, PostType, PublisherInfo, RawForwardedInfo, RawMessage, VideoInfo,
};
use crate::utils::parse::parse_hashtags;

/// Build one typed post record from the raw messages of a logical post.
///
/// `messages` holds either exactly one message, or the resolved members of
/// an album group. Returns `None` for an empty slice; the orchestration
/// layer discards empty album groups before this point.
pub fn transform(
    messages: &[RawMessage],
    publisher: Option<&ChannelProfile>,
    base_url: &str,
) -> Option<Post> {
    let first = messages.first()?;

    let mut post = Post {
        post_type: PostType::Text,
        message_id: None,
        text: None,
        hashtags: Vec::new(),
        views: Some(first.views),
        publish_datetime: first.publish_datetime,
        link: first.link.clone(),
        reply_to: first.reply_to,
        publisher_info: Some(publisher_info(first, publisher, base_url)),
        forwarded_info: first.forwarded.as_ref().map(forwarded_info),
        media: None,
        album_messages: Vec::new(),
    };

    if let [message] = messages {
        post.message_id = message.id;
        post.text = message.text.clone();
        post.hashtags = message.text.as_deref().map(parse_hashtags).unwrap_or_default();
        (post.post_type, post.media) = media_info(&message.content);
    } else {
        // An album group has no single message id; it is keyed by the
        // group's publish timestamp instead.
        let text: String = messages.iter().filter_map(|m| m.text.as_deref()).collect();
        post.post_type = PostType::Album;
        post.message_id = first.publish_timestamp;
        post.hashtags = parse_hashtags(&text);
        post.text = Some(text);
        post.album_messages = messages.iter().map(album_child).collect();
    }

    Some(post)
}

/// Map one album member into its nested child record.
fn album_child(message: &RawMessage) -> Post {
    let (post_type, media) = media_info(&message.content);
    Post {
        post_type,
        message_id: message.id,
        text: message.text.clone(),
        hashtags: message.text.as_deref().map(parse_hashtags).unwrap_or_default(),
        views: None,
        publish_datetime: None,
        link: None,
        reply_to: None,
        publisher_info: None,
        forwarded_info: None,
        media,
        album_messages: Vec::new(),
    }
}

fn publisher_info(
    first: &RawMessage,
    publisher: Option<&ChannelProfile>,
    base_url: &str,
) -> PublisherInfo {
    let mut info = PublisherInfo {
        link: first
            .channel
            .as_ref()
            .map(|channel| format!("{base_url}/{channel}")),
        channel_id: first.channel_id.clone(),
        author: first.author.clone(),
        title: None,
        username: None,
    };

    if let Some(publisher) = publisher {
        info.title = publisher.title.clone();
        info.username = first.channel.clone();
    }

    info
}

fn forwarded_info(raw: &RawForwardedInfo) -> ForwardedInfo {
    ForwardedInfo {
        user_name: raw.user_name.clone(),
        channel: raw.channel.clone(),
        channel_id: raw.channel_id.clone(),
        message_id: raw.message_id,
        link: raw.link.clone(),
        publish_datetime: raw.publish_datetime,
    }
}

/// Resolve a content payload into its record type and serialized media slot.
fn media_info(content: &MessageContent) -> (PostType, Option<MediaInfo>) {
    match content {
        MessageContent::Text => (PostType::Text, None),
        MessageContent::Album => (PostType::Album, None),
        MessageContent::Photo(details) => (
            PostType::Photo,
            Some(MediaInfo::Photo(PhotoInfo {
                width: details.width,
                height: details.height,
                url: details.url.clone(),
            })),
        ),
        MessageContent::Video(details) => (
            PostType::Video,
            Some(MediaInfo::Video(VideoInfo {
                duration: details.duration,
                width: details.width,
                height: details.height,
                url: details.url.clone(),
                thumb_url: details.thumb_url.clone(),
            })),
        ),
        MessageContent::Audio(details) => (
            PostType::Audio,
            Some(MediaInfo::Audio(AudioInfo {
                duration: details.duration,
                title: details.title.clone(),
                performer: details.performer.clone(),
            })),
        ),
        MessageContent::Poll(details) => (
            PostType::Poll,
            Some(MediaInfo::Poll(PollInfo {
                total_voters: details.voters,
                question: details.question.clone(),
                is_quiz: details.is_quiz,
                answers: details
                    .options
                    .iter()
                    .enumerate()
                    .map(|(index, text)| PollAnswer {
                        option: index.to_string(),
                        text: text.clone(),
                    })
                    .collect(),
            })),
        ),
    }
}
