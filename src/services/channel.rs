// src/services/channel.rs

//! Channel page extractor.
//!
//! Works on the feed root page and on "load more" pages alike; publisher
//! metadata only exists on the root page.

use scraper::{ElementRef, Html};

use crate::models::ChannelProfile;
use crate::utils::html::{find, find_all, text_with_newlines};
use crate::utils::parse::expand_shorthand;

/// One fetched channel page, root or "load more".
pub struct ChannelPage {
    document: Html,
}

impl ChannelPage {
    pub fn new(document: Html) -> Self {
        Self { document }
    }

    /// All message fragments on the page, in document order.
    pub fn messages(&self) -> Vec<ElementRef<'_>> {
        find_all(self.document.root_element(), "div.tgme_widget_message_wrap")
    }

    /// Publisher metadata from the channel header; absent on "load more" pages.
    pub fn publisher_info(&self) -> Option<ChannelProfile> {
        let info = find(self.document.root_element(), "div.tgme_channel_info")?;
        let mut profile = ChannelProfile::default();

        profile.avatar_url = find(info, "img")
            .and_then(|img| img.value().attr("src"))
            .map(String::from);

        profile.title = find(info, "div.tgme_channel_info_header_title")
            .map(|el| el.text().collect::<String>());

        profile.user_name = find(info, "div.tgme_channel_info_header_username")
            .map(|el| el.text().collect::<String>().replace('@', ""));

        for counter in find_all(info, "div.tgme_channel_info_counter") {
            let Some(label) = find(counter, "span.counter_type") else {
                continue;
            };
            let Some(value) = find(counter, "span.counter_value")
                .and_then(|el| expand_shorthand(&el.text().collect::<String>()))
            else {
                continue;
            };
            // Unrecognized badge labels are ignored
            match label.text().collect::<String>().to_lowercase().as_str() {
                "subscribers" => profile.subscribers_count = value,
                "photos" => profile.photos_count = value,
                "videos" => profile.videos_count = value,
                "files" => profile.files_count = value,
                "links" => profile.links_count = value,
                _ => {}
            }
        }

        profile.description =
            find(info, "div.tgme_channel_info_description").map(text_with_newlines);

        Some(profile)
    }

    /// Cursor locating the next older page; `None` means history is exhausted.
    ///
    /// Prefers the `rel=prev` navigation link, falling back to the
    /// "load more" anchor.
    pub fn cursor(&self) -> Option<String> {
        let root = self.document.root_element();
        if let Some(prev) = find(root, r#"link[rel="prev"]"#) {
            return prev.value().attr("href").map(String::from);
        }
        find(root, "a.tme_messages_more")
            .and_then(|el| el.value().attr("href"))
            .map(String::from)
    }
}
