//! Stdout sink, one JSON record per line.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Post;
use crate::storage::PostSink;

/// Writes records to stdout as line-delimited JSON.
#[derive(Debug, Default)]
pub struct ConsoleSink;

#[async_trait]
impl PostSink for ConsoleSink {
    async fn save(&mut self, post: &Post) -> Result<()> {
        println!("{}", serde_json::to_string(post)?);
        Ok(())
    }
}
