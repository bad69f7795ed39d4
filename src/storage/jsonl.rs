//! Append-only JSONL file sink.

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::Post;
use crate::storage::PostSink;

/// Appends records to a file as line-delimited JSON.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Open (or create) the output file for appending.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self { file })
    }
}

#[async_trait]
impl PostSink for JsonlSink {
    async fn save(&mut self, post: &Post) -> Result<()> {
        let mut line = serde_json::to_vec(post)?;
        line.push(b'\n');
        self.file.write_all(&line).await?;
        self.file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostType;

    #[tokio::test]
    async fn test_appends_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.jsonl");

        let post = crate::models::Post {
            post_type: PostType::Text,
            message_id: Some(1),
            text: Some("hello".to_string()),
            hashtags: Vec::new(),
            views: Some(0),
            publish_datetime: None,
            link: None,
            reply_to: None,
            publisher_info: None,
            forwarded_info: None,
            media: None,
            album_messages: Vec::new(),
        };

        let mut sink = JsonlSink::open(&path).await.unwrap();
        sink.save(&post).await.unwrap();
        sink.save(&post).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["type"], "TEXT");
    }
}
