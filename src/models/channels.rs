// src/models/channels.rs

//! Channel list input collaborator.

use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};

/// Ordered list of channel names to crawl.
#[derive(Debug, Clone, Default)]
pub struct ChannelList {
    channels: Vec<String>,
}

impl ChannelList {
    /// Load channel names from a plain text file, one per line.
    ///
    /// Whitespace is stripped and blank lines are dropped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            AppError::config(format!(
                "cannot read channel list {:?}: {e}",
                path.as_ref()
            ))
        })?;
        Ok(Self::from_lines(&content))
    }

    /// Build a list from newline-separated text.
    pub fn from_lines(content: &str) -> Self {
        let channels = content
            .lines()
            .map(|line| line.split_whitespace().collect::<String>())
            .filter(|name| !name.is_empty())
            .collect();
        Self { channels }
    }

    /// Build a list from already collected names.
    pub fn from_names(names: Vec<String>) -> Self {
        Self { channels: names }
    }

    /// Iterate over channel names in input order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
