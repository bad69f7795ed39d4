// src/services/message.rs

//! Message fragment extractor.
//!
//! Parses one message container from a channel page, or a standalone
//! single-post embed fragment. Extraction is field-by-field: a malformed
//! attribute defaults that field and never aborts the rest of the fragment.

use scraper::{ElementRef, Html};

use crate::models::{
    AudioDetails, MessageContent, PhotoDetails, PollDetails, RawForwardedInfo, RawMessage,
    VideoDetails,
};
use crate::utils::html::{
    find, find_all, scaled_height, style_background_url, style_padding_ratio, style_width,
    text_with_newlines,
};
use crate::utils::parse::{decode_post_link, duration_to_seconds, expand_shorthand};

/// Extractor over a single message fragment.
pub struct MessageFragment<'a> {
    root: ElementRef<'a>,
}

impl<'a> MessageFragment<'a> {
    /// Wrap a message container taken from a channel page.
    pub fn new(root: ElementRef<'a>) -> Self {
        Self { root }
    }

    /// Wrap a standalone single-post embed document.
    pub fn from_document(document: &'a Html) -> Self {
        Self {
            root: document.root_element(),
        }
    }

    /// Extract all fields of this fragment into a [`RawMessage`].
    ///
    /// An album placeholder carries no content payload of its own; for
    /// everything else exactly one detector wins, checked in priority
    /// order poll, audio, video, photo, with text as the fallback.
    pub fn parse(&self) -> RawMessage {
        let mut message = self.generic_info();

        if self.is_grouped() {
            message.content = MessageContent::Album;
            return message;
        }

        message.content = if let Some(poll) = self.poll_details() {
            MessageContent::Poll(poll)
        } else if let Some(audio) = self.audio_details() {
            MessageContent::Audio(audio)
        } else if let Some(video) = self.video_details() {
            MessageContent::Video(video)
        } else if let Some(photo) = self.photo_details() {
            MessageContent::Photo(photo)
        } else {
            MessageContent::Text
        };

        message
    }

    /// Numeric peer identifier embedded as fragment metadata.
    ///
    /// Used to correlate forwarded/album children back to a channel id when
    /// the permalink itself does not carry one.
    pub fn channel_id(&self) -> Option<String> {
        let peer = find(self.root, "div.tgme_widget_message")
            .and_then(|el| el.value().attr("data-peer"))?;
        let id: String = peer.split('_').next()?.chars().skip(1).collect();
        if id.is_empty() { None } else { Some(id) }
    }

    fn generic_info(&self) -> RawMessage {
        let mut message = RawMessage::default();

        if let Some(href) = find(self.root, "a.tgme_widget_message_date")
            .and_then(|el| el.value().attr("href"))
        {
            let link = href.split('?').next().unwrap_or(href).to_string();
            if let Some((channel, id)) = decode_post_link(&link) {
                message.channel = Some(channel);
                message.id = Some(id);
            }
            message.link = Some(link);
        }

        message.views = find(self.root, "span.tgme_widget_message_views")
            .and_then(|el| expand_shorthand(&el.text().collect::<String>()))
            .unwrap_or(0);

        if let Some(datetime) = find_all(self.root, "time")
            .last()
            .and_then(|el| el.value().attr("datetime"))
        {
            message.publish_datetime = chrono::DateTime::parse_from_rfc3339(datetime).ok();
            message.publish_timestamp = message.publish_datetime.map(|dt| dt.timestamp());
        }

        message.text =
            find(self.root, "div.tgme_widget_message_text").map(text_with_newlines);

        message.author = find(self.root, "span.tgme_widget_message_from_author")
            .map(|el| el.text().collect::<String>());

        message.reply_to = find(self.root, "a.tgme_widget_message_reply")
            .and_then(|el| el.value().attr("href"))
            .and_then(decode_post_link)
            .map(|(_, id)| id);

        message.album.message_links = find_all(self.root, "a.grouped_media_wrap")
            .iter()
            .filter_map(|el| el.value().attr("href"))
            .map(|href| href.replace("?single", ""))
            .collect();

        message.forwarded = self.forwarded_details();

        message
    }

    fn is_grouped(&self) -> bool {
        find(self.root, "div.tgme_widget_message_grouped_wrap").is_some()
    }

    fn poll_details(&self) -> Option<PollDetails> {
        find(self.root, "div.tgme_widget_message_poll")?;
        let mut details = PollDetails::default();

        details.voters = find(self.root, "span.tgme_widget_message_voters")
            .and_then(|el| expand_shorthand(&el.text().collect::<String>()))
            .unwrap_or(0);

        details.question = find(self.root, "div.tgme_widget_message_poll_question")
            .map(|el| el.text().collect::<String>());

        details.options = find_all(self.root, "div.tgme_widget_message_poll_option")
            .iter()
            .filter_map(|option| find(*option, "div.tgme_widget_message_poll_option_text"))
            .map(|el| el.text().collect::<String>())
            .collect();

        details.is_quiz = find(self.root, "div.tgme_widget_message_poll_type")
            .map(|el| el.text().collect::<String>().to_lowercase().contains("quiz"));

        Some(details)
    }

    fn audio_details(&self) -> Option<AudioDetails> {
        find(
            self.root,
            "div.tgme_widget_message_document_icon.accent_bg.audio",
        )?;
        Some(AudioDetails {
            duration: None,
            title: find(self.root, "div.tgme_widget_message_document_title")
                .map(|el| el.text().collect::<String>()),
            performer: find(self.root, "div.tgme_widget_message_document_extra")
                .map(|el| el.text().collect::<String>()),
        })
    }

    fn video_details(&self) -> Option<VideoDetails> {
        let wrap = find(self.root, "div.tgme_widget_message_video_wrap")?;
        let mut details = VideoDetails::default();

        if let Some(style) = wrap.value().attr("style") {
            details.width = style_width(style);
            if let (Some(width), Some(ratio)) = (details.width, style_padding_ratio(style)) {
                details.height = Some(scaled_height(width, ratio));
            }
        }

        details.thumb_url = find(self.root, "i.tgme_widget_message_video_thumb")
            .and_then(|el| el.value().attr("style"))
            .and_then(style_background_url);

        details.duration = find(self.root, "time.message_video_duration")
            .and_then(|el| duration_to_seconds(&el.text().collect::<String>()))
            .unwrap_or(0);

        details.url = find(wrap, "video")
            .and_then(|el| el.value().attr("src"))
            .map(String::from);

        Some(details)
    }

    fn photo_details(&self) -> Option<PhotoDetails> {
        let wrap = find(self.root, "a.tgme_widget_message_photo_wrap")?;
        let mut details = PhotoDetails::default();

        if let Some(style) = wrap.value().attr("style") {
            details.width = style_width(style);
            details.url = style_background_url(style);
        }

        let ratio = find(wrap, "div.tgme_widget_message_photo")
            .and_then(|el| el.value().attr("style"))
            .and_then(style_padding_ratio);
        if let (Some(width), Some(ratio)) = (details.width, ratio) {
            details.height = Some(scaled_height(width, ratio));
        }

        Some(details)
    }

    fn forwarded_details(&self) -> Option<RawForwardedInfo> {
        let header = find(self.root, "div.tgme_widget_message_forwarded_from")?;
        let mut forwarded = RawForwardedInfo::default();

        forwarded.user_name = find(header, "span.tgme_widget_message_forwarded_from_name")
            .or_else(|| find(header, "a.tgme_widget_message_forwarded_from_name"))
            .map(|el| el.text().collect::<String>());

        if let Some(href) = find(header, "a").and_then(|el| el.value().attr("href")) {
            let link = href.split('?').next().unwrap_or(href).to_string();
            if let Some((channel, id)) = decode_post_link(&link) {
                forwarded.channel = Some(channel);
                forwarded.message_id = Some(id);
            }
            forwarded.link = Some(link);
        }

        Some(forwarded)
    }
}
