//! Output sinks for finished post records.
//!
//! Each record is self-contained, so a sink only needs to serialize and
//! emit one record at a time (line-delimited JSON).

mod console;
mod jsonl;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Post;

pub use console::ConsoleSink;
pub use jsonl::JsonlSink;

/// Trait for record sink backends.
#[async_trait]
pub trait PostSink: Send {
    /// Serialize and emit one finished post record.
    async fn save(&mut self, post: &Post) -> Result<()>;
}
