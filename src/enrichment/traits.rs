//! Trait definitions for the enrichment boundaries.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`HttpFetcher`](super::fetch::HttpFetcher) and
//! [`SymphoniaEstimator`](super::duration::SymphoniaEstimator), while tests
//! substitute the implementations in [`mocks`].

use std::time::Duration;

use async_trait::async_trait;

use super::domain::{DecodeError, FetchError};

/// Retrieval of raw audio bytes.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Fetch the full payload at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Play-time estimation for an audio payload.
pub trait DurationEstimator: Send + Sync {
    /// Total play time of `payload`. `extension` is an optional format hint.
    ///
    /// Takes the payload by value; recordings can be large.
    fn estimate(&self, payload: Vec<u8>, extension: Option<&str>) -> Result<Duration, DecodeError>;
}

#[async_trait]
impl AudioFetcher for super::fetch::HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetch_bytes(url).await
    }
}
