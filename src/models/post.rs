// src/models/post.rs

//! Typed post records emitted by the transform step.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Discriminant of a typed post record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostType {
    Text,
    Photo,
    Video,
    Audio,
    Poll,
    Album,
}

/// One normalized output record per logical post.
///
/// Records are self-contained and independently serializable; an album
/// record nests one child record per group member.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    #[serde(rename = "type")]
    pub post_type: PostType,

    pub message_id: Option<i64>,
    pub text: Option<String>,
    pub hashtags: Vec<String>,
    pub views: Option<u64>,
    pub publish_datetime: Option<DateTime<FixedOffset>>,
    pub link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_info: Option<PublisherInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_info: Option<ForwardedInfo>,

    /// Exactly one media payload, keyed by its kind in the serialized form
    #[serde(flatten)]
    pub media: Option<MediaInfo>,

    /// Child records, populated only when `post_type` is `Album`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub album_messages: Vec<Post>,
}

/// Publisher metadata attached to a post record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublisherInfo {
    pub link: Option<String>,
    pub channel_id: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub username: Option<String>,
}

/// Reference to the original of a forwarded post.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ForwardedInfo {
    pub user_name: Option<String>,
    pub channel: Option<String>,
    pub channel_id: Option<String>,
    pub message_id: Option<i64>,
    pub link: Option<String>,
    pub publish_datetime: Option<DateTime<FixedOffset>>,
}

/// Media payload of a post record, exactly one per record.
///
/// Serializes externally tagged, so flattening it into [`Post`] yields a
/// single `photo_info` / `video_info` / `audio_info` / `poll_info` key.
#[derive(Debug, Clone, Serialize)]
pub enum MediaInfo {
    #[serde(rename = "photo_info")]
    Photo(PhotoInfo),
    #[serde(rename = "video_info")]
    Video(VideoInfo),
    #[serde(rename = "audio_info")]
    Audio(AudioInfo),
    #[serde(rename = "poll_info")]
    Poll(PollInfo),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PhotoInfo {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoInfo {
    pub duration: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: Option<String>,
    pub thumb_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AudioInfo {
    pub duration: Option<u64>,
    pub title: Option<String>,
    pub performer: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PollInfo {
    pub total_voters: u64,
    pub question: Option<String>,
    pub is_quiz: Option<bool>,
    pub answers: Vec<PollAnswer>,
}

/// A single poll option with its positional key.
#[derive(Debug, Clone, Serialize)]
pub struct PollAnswer {
    pub option: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_post(post_type: PostType) -> Post {
        Post {
            post_type,
            message_id: Some(7),
            text: Some("hello #world".to_string()),
            hashtags: vec!["world".to_string()],
            views: Some(12),
            publish_datetime: None,
            link: None,
            reply_to: None,
            publisher_info: None,
            forwarded_info: None,
            media: None,
            album_messages: Vec::new(),
        }
    }

    #[test]
    fn test_post_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&PostType::Photo).unwrap(), "\"PHOTO\"");
        assert_eq!(serde_json::to_string(&PostType::Album).unwrap(), "\"ALBUM\"");
    }

    #[test]
    fn test_media_flattens_to_single_key() {
        let mut post = bare_post(PostType::Photo);
        post.media = Some(MediaInfo::Photo(PhotoInfo {
            width: Some(400),
            height: Some(300),
            url: Some("https://cdn.example/p.jpg".to_string()),
        }));

        let value: serde_json::Value = serde_json::from_str(&serde_json::to_string(&post).unwrap()).unwrap();
        assert_eq!(value["type"], "PHOTO");
        assert_eq!(value["photo_info"]["width"], 400);
        assert!(value.get("video_info").is_none());
        assert!(value.get("poll_info").is_none());
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let post = bare_post(PostType::Text);
        let value: serde_json::Value = serde_json::from_str(&serde_json::to_string(&post).unwrap()).unwrap();
        assert!(value.get("forwarded_info").is_none());
        assert!(value.get("album_messages").is_none());
        assert!(value.get("reply_to").is_none());
        assert_eq!(value["message_id"], 7);
    }
}
