//! Display surface for the running volume counter

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::Result;

/// Element key the grand total is written to
pub const COUNTER_ELEMENT_ID: &str = "counter";

#[async_trait]
pub trait CounterDisplay: Send + Sync {
    /// Replace the content of `element_id` with `text`
    async fn render(&self, element_id: &str, text: &str) -> Result<()>;
}

/// Writes the counter to the log
#[derive(Debug, Clone, Default)]
pub struct LogDisplay;

#[async_trait]
impl CounterDisplay for LogDisplay {
    async fn render(&self, element_id: &str, text: &str) -> Result<()> {
        tracing::info!(element = element_id, "{}", text);
        Ok(())
    }
}

/// Overwrites a file with the counter text on every render
#[derive(Debug, Clone)]
pub struct FileDisplay {
    path: PathBuf,
}

impl FileDisplay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CounterDisplay for FileDisplay {
    async fn render(&self, element_id: &str, text: &str) -> Result<()> {
        tokio::fs::write(&self.path, text).await?;
        tracing::debug!(element = element_id, path = %self.path.display(), "Counter written");
        Ok(())
    }
}
