use reqwest::header::HeaderMap;
use serde::Serialize;
use tokio::runtime::{Builder, Runtime};

use super::ntfy::{Publisher, PublisherConfig};
use crate::errors::{NtfyError, NtfyResult};
use crate::ntfy::{Message, PublishResult};

/// Synchronous wrapper around [`Publisher`]
///
/// Owns a current-thread runtime and blocks on each publish. Must not be used
/// from inside another async runtime.
pub struct BlockingPublisher {
    inner: Publisher,
    runtime: Runtime,
}

impl BlockingPublisher {
    pub fn new(config: PublisherConfig) -> NtfyResult<Self> {
        Self::from_publisher(Publisher::new(config)?)
    }

    pub fn from_publisher(inner: Publisher) -> NtfyResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| NtfyError::config_with_source("failed to create blocking runtime", e))?;

        Ok(Self { inner, runtime })
    }

    /// Publish a message (blocking)
    pub fn publish<B: Serialize>(&self, message: &Message<B>) -> NtfyResult<PublishResult> {
        self.runtime.block_on(self.inner.publish(message))
    }

    /// Publish with per-call header overrides (blocking)
    pub fn publish_with_headers<B: Serialize>(
        &self,
        message: &Message<B>,
        headers: &HeaderMap,
    ) -> NtfyResult<PublishResult> {
        self.runtime
            .block_on(self.inner.publish_with_headers(message, headers))
    }

    pub fn publisher(&self) -> &Publisher {
        &self.inner
    }
}
